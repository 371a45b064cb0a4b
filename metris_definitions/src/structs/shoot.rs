use super::Metadata;
use crate::Result;

/// A shoot resource from the hosting control plane.
///
/// The provider section is the only part of the spec the collector reads;
/// `infrastructureConfig` is an opaque provider-embedded document and is
/// decoded under a provider-specific schema by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Shoot {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ShootSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShootSpec {
    #[serde(default)]
    pub provider: ShootProvider,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ShootProvider {
    #[serde(default, rename = "type")]
    pub provider_type: String,
    #[serde(
        default,
        rename = "infrastructureConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub infrastructure_config: Option<serde_json::Value>,
}

/// The slice of the azure provider's infrastructure document we read.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AzureInfrastructureConfig {
    #[serde(default)]
    pub networks: AzureNetworks,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AzureNetworks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnet: Option<AzureVnet>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AzureVnet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

impl AzureInfrastructureConfig {
    /// Decode the opaque infrastructure document under the azure schema.
    pub fn from_value(value: &serde_json::Value) -> Result<AzureInfrastructureConfig> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// One virtual network is provisioned when a vnet CIDR is declared.
    pub fn vnet_count(&self) -> i64 {
        match &self.networks.vnet {
            Some(vnet) if vnet.cidr.is_some() => 1,
            _ => 0,
        }
    }
}
