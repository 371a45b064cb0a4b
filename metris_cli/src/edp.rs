use failure::ResultExt;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use metris_definitions::IngestionConfig;

use super::broker::USER_AGENT;
use super::retry::{self, Backoff};
use super::Result;

const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

// All main errors that can happen shipping events
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum EErrKind {
    #[fail(display = "unexpected HTTP status {} from {}", _0, _1)]
    UnexpectedHttpStatus(u16, String),

    #[fail(display = "could not access URL '{}'", _0)]
    Url(Url),
}

/// Client for the data ingestion endpoint.
///
/// One instance serves every tenant; the tenant only shows up in the
/// event path.
pub struct EdpClient {
    client: Client,
    config: IngestionConfig,
    base: Url,
    backoff: Backoff,
}

impl EdpClient {
    pub fn new(config: &IngestionConfig) -> Result<EdpClient> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(EdpClient {
            client,
            base: Url::parse(&config.url)?,
            backoff: Backoff::for_client(config.timeout, config.retry_count),
            config: config.clone(),
        })
    }

    fn events_url(&self, tenant: &str) -> Result<Url> {
        let path = format!(
            "namespaces/{}/dataStreams/{}/{}/dataTenants/{}/{}/events",
            self.config.namespace,
            self.config.data_stream,
            self.config.data_stream_version,
            tenant,
            self.config.data_stream_env,
        );
        Ok(self.base.join(&path)?)
    }

    /// POST one serialized consumption record for a tenant.
    ///
    /// The endpoint answers 201 on acceptance; any 2xx is treated as
    /// delivered. Everything else is retried and surfaced after the
    /// backoff is exhausted.
    pub fn send(&self, tenant: &str, payload: &[u8]) -> Result<()> {
        let url = self.events_url(tenant)?;
        retry::on_error(&self.backoff, || {
            debug!("POST {}", url);
            let res = self
                .client
                .post(url.clone())
                .bearer_auth(&self.config.token)
                .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
                .body(payload.to_vec())
                .send()
                .context(EErrKind::Url(url.clone()))?;
            if !res.status().is_success() {
                let status = res.status().as_u16();
                return Err(EErrKind::UnexpectedHttpStatus(status, url.to_string()))?;
            }
            Ok(())
        })
        .map_err(|e| format_err!("failed to send event for tenant {}: {}", tenant, e))?;
        Ok(())
    }
}
