use std::collections::BTreeMap;

use super::Metadata;
use crate::math::quantity_to_gib;
use crate::Result;

/// A persistent volume claim; only the provisioned capacity is read.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PersistentVolumeClaim {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub status: PvcStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PvcStatus {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capacity: BTreeMap<String, String>,
}

impl PersistentVolumeClaim {
    /// Provisioned storage in whole GiB; zero when the claim is unbound.
    pub fn storage_gib(&self) -> Result<i64> {
        match self.status.capacity.get("storage") {
            Some(quantity) => quantity_to_gib(quantity),
            None => Ok(0),
        }
    }
}
