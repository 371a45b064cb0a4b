use std::time::Duration;

use super::kube::{KubeClient, KubeConfig};
use super::structs::{Secret, Shoot};
use super::Result;

/// Reader for the hosting control plane: shoots and their kubeconfig secrets.
///
/// Both resources live in one configured namespace.
pub struct GardenerClient {
    kube: KubeClient,
    namespace: String,
}

impl GardenerClient {
    /// Build from the kubeconfig file the operator mounts for the control plane.
    pub fn from_kubeconfig_path(
        path: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<GardenerClient> {
        let config = KubeConfig::load(path)?;
        Ok(GardenerClient::new(
            KubeClient::from_kubeconfig(&config, timeout)?,
            namespace,
        ))
    }

    pub fn new(kube: KubeClient, namespace: &str) -> GardenerClient {
        GardenerClient {
            kube,
            namespace: namespace.to_string(),
        }
    }

    /// Read one shoot resource by name.
    pub fn get_shoot(&self, shoot_name: &str) -> Result<Shoot> {
        let path = format!(
            "/apis/core.gardener.cloud/v1beta1/namespaces/{}/shoots/{}",
            self.namespace, shoot_name
        );
        let shoot: Shoot = self
            .kube
            .get(&path)
            .map_err(|e| format_err!("failed to get shoot {}: {}", shoot_name, e))?;
        Ok(shoot)
    }

    /// Read the workload cluster's kubeconfig from the `{shoot}.kubeconfig` secret.
    pub fn get_shoot_kubeconfig(&self, shoot_name: &str) -> Result<String> {
        let path = format!(
            "/api/v1/namespaces/{}/secrets/{}.kubeconfig",
            self.namespace, shoot_name
        );
        let secret: Secret = self
            .kube
            .get(&path)
            .map_err(|e| format_err!("failed to get kubeconfig secret for shoot {}: {}", shoot_name, e))?;
        Ok(secret.decoded("kubeconfig")?)
    }
}

#[cfg(test)]
mod tests {
    use super::GardenerClient;
    use crate::testutil;

    #[test]
    fn reads_shoots_from_the_configured_namespace() {
        let _m = mockito::mock(
            "GET",
            "/apis/core.gardener.cloud/v1beta1/namespaces/garden-kyma/shoots/c-7f5ab21",
        )
        .with_status(200)
        .with_body(
            r#"{
                "metadata": { "name": "c-7f5ab21", "namespace": "garden-kyma" },
                "spec": { "provider": { "type": "azure" } }
            }"#,
        )
        .create();

        let client = GardenerClient::new(
            testutil::kube_client(&mockito::server_url()),
            "garden-kyma",
        );
        let shoot = client.get_shoot("c-7f5ab21").unwrap();
        assert_eq!(shoot.metadata.name, "c-7f5ab21");
        assert_eq!(shoot.spec.provider.provider_type, "azure");
    }

    #[test]
    fn decodes_the_kubeconfig_secret() {
        let _m = mockito::mock(
            "GET",
            "/api/v1/namespaces/garden-kyma/secrets/c-7f5ab22.kubeconfig",
        )
        .with_status(200)
        .with_body(json!({
            "metadata": { "name": "c-7f5ab22.kubeconfig" },
            "data": { "kubeconfig": base64::encode("apiVersion: v1") }
        }).to_string())
        .create();

        let client = GardenerClient::new(
            testutil::kube_client(&mockito::server_url()),
            "garden-kyma",
        );
        let kubeconfig = client.get_shoot_kubeconfig("c-7f5ab22").unwrap();
        assert_eq!(kubeconfig, "apiVersion: v1");
    }

    #[test]
    fn missing_shoots_are_errors() {
        let _m = mockito::mock(
            "GET",
            "/apis/core.gardener.cloud/v1beta1/namespaces/garden-kyma/shoots/gone",
        )
        .with_status(404)
        .create();

        let client = GardenerClient::new(
            testutil::kube_client(&mockito::server_url()),
            "garden-kyma",
        );
        assert!(client.get_shoot("gone").is_err());
    }
}
