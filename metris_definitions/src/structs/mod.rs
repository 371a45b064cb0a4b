use std::collections::BTreeMap;

/// The slice of object metadata the collector reads.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Generic Kubernetes list envelope.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ObjectList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for ObjectList<T> {
    fn default() -> Self {
        ObjectList { items: Vec::new() }
    }
}

mod node;
pub use self::node::Node;

mod pvc;
pub use self::pvc::PersistentVolumeClaim;

mod service;
pub use self::service::Service;

mod secret;
pub use self::secret::Secret;

mod shoot;
pub use self::shoot::{AzureInfrastructureConfig, Shoot, ShootProvider, ShootSpec};
