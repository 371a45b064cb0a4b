/// The consumption record shipped for one tenant per scrape.
///
/// Field names are the wire contract of the ingestion endpoint; do not
/// rename without coordinating a data-stream version bump.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ConsumptionMetrics {
    pub compute: Compute,
    pub networking: Networking,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Compute {
    pub vm_types: Vec<VMType>,
    pub provisioned_cpus: i64,
    pub provisioned_ram_gb: f64,
    pub provisioned_volumes: ProvisionedVolumes,
}

/// One VM type observed in the fleet and how many nodes run it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VMType {
    pub name: String,
    pub count: i64,
}

/// Storage totals across node local disks and PVCs.
///
/// `size_gb_rounded` is `size_gb_total` rounded up to a 32 GiB block.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProvisionedVolumes {
    pub size_gb_total: i64,
    pub count: i64,
    pub size_gb_rounded: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Networking {
    pub provisioned_vnets: i64,
    pub provisioned_ips: i64,
}
