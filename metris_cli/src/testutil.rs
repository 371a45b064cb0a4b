//! Shared fixtures for the test suite: roster entries, cluster inventory
//! documents, kubeconfigs pointing at a mock server, and a fully wired
//! `Process` with tight timeouts.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use metris_definitions::roster::{Operation, RuntimeDTO, RuntimesPage, RuntimeStatus};
use metris_definitions::structs::{Node, PersistentVolumeClaim, Service, Shoot};
use metris_definitions::{BrokerConfig, Catalog, IngestionConfig};

use crate::broker::BrokerClient;
use crate::edp::EdpClient;
use crate::gardener::GardenerClient;
use crate::kube::{KubeClient, KubeConfig};
use crate::process::Process;
use crate::queue::DelayingQueue;
use crate::registry::Registry;

/// Serialises tests that mock the shared workload-cluster paths
/// (`/api/v1/nodes` etc.) on the global mockito server.
static WORKLOAD_PATHS: Mutex<()> = Mutex::new(());

pub fn workload_guard() -> MutexGuard<'static, ()> {
    WORKLOAD_PATHS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub const SPECS: &str = r#"{
    "data": {
        "azure": {
            "specs": {
                "vms": {
                    "Standard_D8_v3": {
                        "features": {
                            "cpu_cores": 8,
                            "memory_gb": 32.0,
                            "storage_gb": 200,
                            "max_nics": 4
                        }
                    },
                    "Standard_A2_v2": {
                        "features": {
                            "cpu_cores": 2,
                            "memory_gb": 4.0,
                            "storage_gb": 20,
                            "max_nics": 2
                        }
                    }
                }
            }
        },
        "gcp": {
            "specs": {
                "vms": {
                    "Standard_D8_v3": {
                        "features": {
                            "cpu_cores": 8,
                            "memory_gb": 32.0,
                            "storage_gb": 200,
                            "max_nics": 4
                        }
                    }
                }
            }
        }
    }
}"#;

pub fn catalog() -> Catalog {
    Catalog::from_json(SPECS).unwrap()
}

pub fn kubeconfig_for(server: &str) -> String {
    format!(
        r#"apiVersion: v1
kind: Config
clusters:
- name: shoot
  cluster:
    server: {}
users:
- name: shoot-token
  user:
    token: shoot-token-value
contexts:
- name: shoot
  context:
    cluster: shoot
    user: shoot-token
current-context: shoot
"#,
        server
    )
}

pub fn kube_client(server: &str) -> KubeClient {
    let config = KubeConfig::parse(&kubeconfig_for(server)).unwrap();
    KubeClient::from_kubeconfig(&config, Duration::from_secs(2)).unwrap()
}

pub fn azure_shoot(name: &str) -> Shoot {
    serde_json::from_value(json!({
        "metadata": { "name": name, "namespace": "garden-kyma" },
        "spec": {
            "provider": {
                "type": "azure",
                "infrastructureConfig": {
                    "apiVersion": "azure.provider.extensions.gardener.cloud/v1alpha1",
                    "kind": "InfrastructureConfig",
                    "networks": { "vnet": { "cidr": "10.250.0.0/16" } }
                }
            }
        }
    }))
    .unwrap()
}

pub fn node_json(name: &str, vm_type: &str) -> serde_json::Value {
    json!({
        "metadata": {
            "name": name,
            "labels": { "node.kubernetes.io/instance-type": vm_type }
        }
    })
}

pub fn node(name: &str, vm_type: &str) -> Node {
    serde_json::from_value(node_json(name, vm_type)).unwrap()
}

pub fn pvc_json(name: &str, storage: &str) -> serde_json::Value {
    json!({
        "metadata": { "name": name, "namespace": "default" },
        "status": { "capacity": { "storage": storage } }
    })
}

pub fn pvc(name: &str, storage: &str) -> PersistentVolumeClaim {
    serde_json::from_value(pvc_json(name, storage)).unwrap()
}

pub fn service_json(name: &str, service_type: &str) -> serde_json::Value {
    json!({
        "metadata": { "name": name, "namespace": "default" },
        "spec": { "type": service_type }
    })
}

pub fn service(name: &str, service_type: &str) -> Service {
    serde_json::from_value(service_json(name, service_type)).unwrap()
}

pub fn succeeded_runtime(sub_account_id: &str, shoot_name: &str) -> RuntimeDTO {
    RuntimeDTO {
        sub_account_id: sub_account_id.to_string(),
        shoot_name: shoot_name.to_string(),
        status: RuntimeStatus {
            provisioning: Some(Operation { state: "succeeded".into() }),
            deprovisioning: None,
        },
    }
}

pub fn failed_runtime(sub_account_id: &str, shoot_name: &str) -> RuntimeDTO {
    let mut runtime = succeeded_runtime(sub_account_id, shoot_name);
    runtime.status.provisioning = Some(Operation { state: "failed".into() });
    runtime
}

pub fn deprovisioning_runtime(sub_account_id: &str, shoot_name: &str) -> RuntimeDTO {
    let mut runtime = succeeded_runtime(sub_account_id, shoot_name);
    runtime.status.deprovisioning = Some(Operation { state: "in progress".into() });
    runtime
}

pub fn roster_page(data: Vec<RuntimeDTO>) -> RuntimesPage {
    let count = data.len() as i64;
    RuntimesPage {
        data,
        count,
        total_count: count,
    }
}

/// A `Process` wired against the global mockito server, with timeouts
/// tight enough for tests and a 100ms scrape cadence.
pub fn process() -> Process {
    let server = mockito::server_url();
    let broker = BrokerClient::new(&BrokerConfig {
        url: format!("{}/runtimes", server),
        timeout: Duration::from_millis(50),
        retry_count: 1,
    })
    .unwrap();
    let edp = EdpClient::new(&IngestionConfig {
        url: server.clone(),
        token: "edp-token".into(),
        namespace: "kyma-dev".into(),
        data_stream: "consumption-metrics".into(),
        data_stream_version: "1".into(),
        data_stream_env: "dev".into(),
        timeout: Duration::from_millis(50),
        retry_count: 2,
    })
    .unwrap();
    let gardener = GardenerClient::new(kube_client(&server), "garden-kyma");

    Process {
        broker,
        edp,
        gardener,
        catalog: catalog(),
        registry: Registry::new(),
        queue: DelayingQueue::new(),
        scrape_interval: Duration::from_millis(100),
        discovery_interval: Duration::from_millis(100),
        kube_timeout: Duration::from_secs(2),
        workers: 1,
    }
}
