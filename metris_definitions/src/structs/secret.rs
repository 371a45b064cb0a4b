use std::collections::BTreeMap;

use super::Metadata;
use crate::Result;

/// A Kubernetes secret; `data` values are base64 as the API serves them.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Secret {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Secret {
    /// Decode one data key into a UTF-8 string.
    pub fn decoded(&self, key: &str) -> Result<String> {
        let raw = self
            .data
            .get(key)
            .ok_or_else(|| format_err!("secret '{}' has no '{}' key", self.metadata.name, key))?;
        let bytes = base64::decode(raw).map_err(|e| {
            format_err!("secret '{}' key '{}' is not base64: {}", self.metadata.name, key, e)
        })?;
        Ok(String::from_utf8(bytes).map_err(|e| {
            format_err!("secret '{}' key '{}' is not utf-8: {}", self.metadata.name, key, e)
        })?)
    }
}
