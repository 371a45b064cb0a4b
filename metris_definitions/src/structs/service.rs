use super::Metadata;

/// A cluster service; only the service type is read.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Service {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ServiceSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ServiceSpec {
    #[serde(default, rename = "type")]
    pub service_type: String,
}

impl Service {
    /// LoadBalancer services each hold one provisioned external IP.
    pub fn is_load_balancer(&self) -> bool {
        self.spec.service_type == "LoadBalancer"
    }
}
