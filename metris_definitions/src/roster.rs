/// One page of the broker's runtime roster.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimesPage {
    #[serde(default)]
    pub data: Vec<RuntimeDTO>,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub total_count: i64,
}

/// A tenant runtime as the broker reports it.
///
/// Only the fields the collector reads; the broker document carries more.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDTO {
    #[serde(default)]
    pub sub_account_id: String,
    #[serde(default)]
    pub shoot_name: String,
    #[serde(default)]
    pub status: RuntimeStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprovisioning: Option<Operation>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub state: String,
}

pub const STATE_SUCCEEDED: &str = "succeeded";

impl RuntimeDTO {
    /// Whether this runtime should be scraped.
    ///
    /// A tenant is tracked once provisioning has succeeded and only while
    /// no deprovisioning operation exists.
    pub fn trackable(&self) -> bool {
        let provisioned = self
            .status
            .provisioning
            .as_ref()
            .map(|op| op.state == STATE_SUCCEEDED)
            .unwrap_or(false);
        provisioned && self.status.deprovisioning.is_none()
    }
}
