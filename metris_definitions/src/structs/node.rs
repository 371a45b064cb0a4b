use super::Metadata;

/// Label carrying the machine type the node runs on.
pub const INSTANCE_TYPE_LABEL: &str = "node.kubernetes.io/instance-type";

/// A workload-cluster node; only the labels are read.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Node {
    #[serde(default)]
    pub metadata: Metadata,
}

impl Node {
    /// The VM type from the instance-type label, if the node carries one.
    pub fn instance_type(&self) -> Option<&str> {
        self.metadata
            .labels
            .get(INSTANCE_TYPE_LABEL)
            .map(|s| s.as_str())
    }
}
