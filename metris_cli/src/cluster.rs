use std::time::Duration;

use super::kube::{KubeClient, KubeConfig};
use super::structs::{Node, ObjectList, PersistentVolumeClaim, Service};
use super::Result;

/// Reader for one tenant's workload cluster.
///
/// Built per scrape from the cached kubeconfig; nothing here outlives the
/// scrape that created it.
pub struct ClusterClient {
    kube: KubeClient,
}

impl ClusterClient {
    pub fn from_kubeconfig(kubeconfig: &str, timeout: Duration) -> Result<ClusterClient> {
        let config = KubeConfig::parse(kubeconfig)?;
        Ok(ClusterClient {
            kube: KubeClient::from_kubeconfig(&config, timeout)?,
        })
    }

    pub fn list_nodes(&self) -> Result<Vec<Node>> {
        let list: ObjectList<Node> = self
            .kube
            .get("/api/v1/nodes")
            .map_err(|e| format_err!("failed to list nodes: {}", e))?;
        Ok(list.items)
    }

    /// Claims across all namespaces.
    pub fn list_pvcs(&self) -> Result<Vec<PersistentVolumeClaim>> {
        let list: ObjectList<PersistentVolumeClaim> = self
            .kube
            .get("/api/v1/persistentvolumeclaims")
            .map_err(|e| format_err!("failed to list persistent volume claims: {}", e))?;
        Ok(list.items)
    }

    /// Services across all namespaces.
    pub fn list_services(&self) -> Result<Vec<Service>> {
        let list: ObjectList<Service> = self
            .kube
            .get("/api/v1/services")
            .map_err(|e| format_err!("failed to list services: {}", e))?;
        Ok(list.items)
    }
}

#[cfg(test)]
mod tests {
    use super::ClusterClient;
    use crate::testutil;
    use std::time::Duration;

    #[test]
    fn lists_cluster_inventory() {
        let _workload = testutil::workload_guard();
        let _nodes = mockito::mock("GET", "/api/v1/nodes")
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        testutil::node_json("node-a", "Standard_D8_v3"),
                        testutil::node_json("node-b", "Standard_D8_v3")
                    ]
                })
                .to_string(),
            )
            .create();
        let _pvcs = mockito::mock("GET", "/api/v1/persistentvolumeclaims")
            .with_status(200)
            .with_body(json!({ "items": [testutil::pvc_json("data", "20Gi")] }).to_string())
            .create();
        let _svcs = mockito::mock("GET", "/api/v1/services")
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        testutil::service_json("ingress", "LoadBalancer"),
                        testutil::service_json("internal", "ClusterIP")
                    ]
                })
                .to_string(),
            )
            .create();

        let client = ClusterClient::from_kubeconfig(
            &testutil::kubeconfig_for(&mockito::server_url()),
            Duration::from_secs(2),
        )
        .unwrap();

        let nodes = client.list_nodes().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].instance_type(), Some("Standard_D8_v3"));

        let pvcs = client.list_pvcs().unwrap();
        assert_eq!(pvcs.len(), 1);
        assert_eq!(pvcs[0].storage_gib().unwrap(), 20);

        let services = client.list_services().unwrap();
        assert_eq!(services.iter().filter(|s| s.is_load_balancer()).count(), 1);
    }

    #[test]
    fn unreachable_clusters_surface_transport_errors() {
        // nothing listens on this port
        let client = ClusterClient::from_kubeconfig(
            &testutil::kubeconfig_for("http://127.0.0.1:1"),
            Duration::from_millis(200),
        )
        .unwrap();
        assert!(client.list_nodes().is_err());
    }
}
