use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Certificate, Url};
use serde::de::DeserializeOwned;

// All main errors that can happen talking to a Kubernetes API
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum KErrKind {
    #[fail(display = "kubeconfig has no clusters")]
    NoClusters,

    #[fail(display = "kubeconfig has no users")]
    NoUsers,

    #[fail(display = "unexpected HTTP status {} from {}", _0, _1)]
    UnexpectedHttpStatus(u16, String),

    #[fail(display = "could not access URL '{}'", _0)]
    Url(Url),
}
use failure::ResultExt;

use super::Result;

/// The slice of a kubeconfig document the collector understands.
///
/// Token (or unauthenticated) access only; client certificates would need
/// an identity store and no shoot we scrape requires them.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct KubeConfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct NamedCluster {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster: ClusterEntry,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ClusterEntry {
    #[serde(default)]
    pub server: String,
    #[serde(default, rename = "certificate-authority-data")]
    pub certificate_authority_data: Option<String>,
    #[serde(default, rename = "insecure-skip-tls-verify")]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct NamedUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user: UserEntry,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct UserEntry {
    #[serde(default)]
    pub token: Option<String>,
}

impl KubeConfig {
    /// Parse a kubeconfig document from its YAML serialization.
    pub fn parse(raw: &str) -> Result<KubeConfig> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Read and parse a kubeconfig file.
    pub fn load(path: &str) -> Result<KubeConfig> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format_err!("failed to read kubeconfig {}: {}", path, e))?;
        KubeConfig::parse(&raw)
    }
}

/// An authenticated HTTP interface to one Kubernetes API server.
pub struct KubeClient {
    client: Client,
    server: Url,
    token: Option<String>,
}

impl KubeClient {
    /// Build a client for the first cluster/user of a kubeconfig.
    pub fn from_kubeconfig(config: &KubeConfig, timeout: Duration) -> Result<KubeClient> {
        let cluster = &config.clusters.first().ok_or(KErrKind::NoClusters)?.cluster;
        let user = &config.users.first().ok_or(KErrKind::NoUsers)?.user;

        let mut builder = Client::builder().timeout(timeout);
        if let Some(ca) = &cluster.certificate_authority_data {
            let pem = base64::decode(ca)
                .map_err(|e| format_err!("certificate-authority-data is not base64: {}", e))?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }
        if cluster.insecure_skip_tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(KubeClient {
            client: builder.build()?,
            server: Url::parse(&cluster.server)?,
            token: user.token.clone(),
        })
    }

    /// GET an API path and decode the JSON response.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.server.join(path)?;
        debug!("GET {}", url);

        let mut req = self.client.get(url.clone());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let res = req.send().context(KErrKind::Url(url.clone()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            return Err(KErrKind::UnexpectedHttpStatus(status, url.to_string()))?;
        }

        let body = res.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
