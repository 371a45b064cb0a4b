use failure::ResultExt;
use reqwest::blocking::Client;
use reqwest::Url;

use metris_definitions::roster::RuntimesPage;
use metris_definitions::BrokerConfig;

use super::retry::{self, Backoff};
use super::Result;

pub const USER_AGENT: &str = "metris";

// All main errors that can happen polling the broker
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum BErrKind {
    #[fail(display = "unexpected HTTP status {} from {}", _0, _1)]
    UnexpectedHttpStatus(u16, String),

    #[fail(display = "could not access URL '{}'", _0)]
    Url(Url),
}

/// Client for the runtime broker's roster endpoint.
pub struct BrokerClient {
    client: Client,
    url: Url,
    backoff: Backoff,
}

impl BrokerClient {
    pub fn new(config: &BrokerConfig) -> Result<BrokerClient> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(BrokerClient {
            client,
            url: Url::parse(&config.url)?,
            backoff: Backoff::for_client(config.timeout, config.retry_count),
        })
    }

    /// Fetch the full runtime roster, following the broker's pagination.
    ///
    /// Pages are requested until the reported total is collected or a page
    /// comes back empty; every page request runs under the retry envelope.
    pub fn get_runtimes(&self) -> Result<RuntimesPage> {
        let mut merged = RuntimesPage::default();
        let mut page = 1;
        loop {
            let chunk = self.get_page(page)?;
            let fetched = chunk.data.len();
            merged.data.extend(chunk.data);
            merged.total_count = chunk.total_count;
            if fetched == 0 || merged.data.len() as i64 >= chunk.total_count {
                break;
            }
            page += 1;
        }
        merged.count = merged.data.len() as i64;
        Ok(merged)
    }

    /// One roster page, retried per the backoff envelope.
    ///
    /// A non-2xx response and a decode failure are both treated the same
    /// as a transport fault: retried, and surfaced after exhaustion.
    fn get_page(&self, page: u32) -> Result<RuntimesPage> {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let chunk = retry::on_error(&self.backoff, || {
            debug!("GET {}", url);
            let res = self
                .client
                .get(url.clone())
                .send()
                .context(BErrKind::Url(url.clone()))?;
            if !res.status().is_success() {
                let status = res.status().as_u16();
                return Err(BErrKind::UnexpectedHttpStatus(status, url.to_string()))?;
            }
            let body = res.text()?;
            Ok(serde_json::from_str(&body)?)
        })
        .map_err(|e| format_err!("failed to get runtimes page {} from the broker: {}", page, e))?;
        Ok(chunk)
    }
}
