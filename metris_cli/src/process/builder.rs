use std::collections::BTreeMap;

use metris_definitions::math;
use metris_definitions::metrics::{
    Compute, ConsumptionMetrics, Networking, ProvisionedVolumes, VMType,
};
use metris_definitions::structs::{
    AzureInfrastructureConfig, Node, PersistentVolumeClaim, Service, Shoot,
};
use metris_definitions::Catalog;

use crate::Result;

// Failure modes of a build; every one aborts the sample and sends the
// caller down the fallback path.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum BuildErrKind {
    #[fail(display = "cluster reported no nodes, nothing to meter")]
    EmptyFleet,

    #[fail(display = "node '{}' carries no instance-type label", _0)]
    MissingInstanceType(String),

    #[fail(display = "no infrastructure decoder for provider '{}'", _0)]
    UnsupportedProvider(String),
}

/// Derive one consumption record from a cluster's live inventory.
///
/// Pure: identical inputs always produce identical records, and the
/// VM-type list comes out sorted by name.
pub fn build(
    shoot: &Shoot,
    nodes: &[Node],
    pvcs: &[PersistentVolumeClaim],
    services: &[Service],
    catalog: &Catalog,
) -> Result<ConsumptionMetrics> {
    if nodes.is_empty() {
        return Err(BuildErrKind::EmptyFleet)?;
    }
    let provider = shoot.spec.provider.provider_type.as_str();

    let mut provisioned_cpus: i64 = 0;
    let mut provisioned_ram_gb: f64 = 0.0;
    let mut node_storage_gib: i64 = 0;
    let mut volume_count: i64 = 0;
    let mut vm_counts: BTreeMap<String, i64> = BTreeMap::new();

    for node in nodes {
        let vm_type = node
            .instance_type()
            .ok_or_else(|| BuildErrKind::MissingInstanceType(node.metadata.name.clone()))?
            .to_lowercase();
        let features = catalog.lookup(provider, &vm_type)?;
        provisioned_cpus += features.cpu_cores;
        provisioned_ram_gb += features.memory_gb;
        node_storage_gib += features.storage_gb;
        volume_count += 1;
        *vm_counts.entry(vm_type).or_insert(0) += 1;
    }

    let mut pvc_storage_gib: i64 = 0;
    for pvc in pvcs {
        pvc_storage_gib += pvc.storage_gib()?;
        volume_count += 1;
    }

    let provisioned_ips = services.iter().filter(|svc| svc.is_load_balancer()).count() as i64;
    let provisioned_vnets = vnet_count(shoot)?;

    let size_gb_total = node_storage_gib + pvc_storage_gib;
    Ok(ConsumptionMetrics {
        compute: Compute {
            vm_types: vm_counts
                .into_iter()
                .map(|(name, count)| VMType { name, count })
                .collect(),
            provisioned_cpus,
            provisioned_ram_gb,
            provisioned_volumes: ProvisionedVolumes {
                size_gb_total,
                count: volume_count,
                size_gb_rounded: math::round_up_to_block(size_gb_total),
            },
        },
        networking: Networking {
            provisioned_vnets,
            provisioned_ips,
        },
    })
}

/// Provider-specific virtual network count.
///
/// The infrastructure document is opaque until dispatched on the provider
/// tag; new providers plug in here with their own schema.
fn vnet_count(shoot: &Shoot) -> Result<i64> {
    let provider = &shoot.spec.provider;
    match provider.provider_type.as_str() {
        "azure" => match &provider.infrastructure_config {
            Some(document) => Ok(AzureInfrastructureConfig::from_value(document)?.vnet_count()),
            None => Ok(0),
        },
        other => Err(BuildErrKind::UnsupportedProvider(other.to_string()))?,
    }
}
