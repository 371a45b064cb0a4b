use std::env;
use std::time::Duration;

use failure::{Error, ResultExt};

// All main errors that can happen while assembling configuration.
// Missing required values are fatal at startup; none of these are
// observed at steady state.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
enum ConfErrKind {
    #[fail(display = "KEB_URL not specified")]
    MissingBrokerUrl,

    #[fail(display = "EDP_TOKEN not specified")]
    MissingIngestionToken,

    #[fail(display = "{} is not a whole number of seconds", _0)]
    BadDuration(String),

    #[fail(display = "{} is not a number", _0)]
    BadNumber(String),
}
type Result<T> = std::result::Result<T, Error>;

fn env_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

fn env_duration_secs(key: &str, fallback: u64) -> Result<Duration> {
    let secs: u64 = env_or(key, &fallback.to_string())
        .parse::<u64>()
        .context(ConfErrKind::BadDuration(key.to_string()))?;
    Ok(Duration::from_secs(secs))
}

fn env_u32(key: &str, fallback: u32) -> Result<u32> {
    Ok(env_or(key, &fallback.to_string())
        .parse::<u32>()
        .context(ConfErrKind::BadNumber(key.to_string()))?)
}

/// Where and how to poll the broker for the runtime roster.
#[derive(Clone, Debug)]
pub struct BrokerConfig {
    /// Roster endpoint, e.g. http://kcp-kyma-environment-broker.kcp-system/runtimes
    pub url: String,
    /// Hard per-attempt timeout; also the base step of the retry backoff.
    pub timeout: Duration,
    /// Maximum attempts before the roster fetch is given up.
    pub retry_count: u32,
}

impl BrokerConfig {
    /// Read KEB_URL (required), KEB_TIMEOUT and KEB_RETRY from the environment.
    pub fn from_env() -> Result<BrokerConfig> {
        let url = env::var("KEB_URL").context(ConfErrKind::MissingBrokerUrl)?;
        Ok(BrokerConfig {
            url,
            timeout: env_duration_secs("KEB_TIMEOUT", 30)?,
            retry_count: env_u32("KEB_RETRY", 5)?,
        })
    }
}

/// Where and how to ship consumption records.
#[derive(Clone, Debug)]
pub struct IngestionConfig {
    pub url: String,
    pub token: String,
    pub namespace: String,
    pub data_stream: String,
    pub data_stream_version: String,
    pub data_stream_env: String,
    /// Hard per-attempt timeout; also the base step of the retry backoff.
    pub timeout: Duration,
    /// Maximum attempts per event before the send is reported failed.
    pub retry_count: u32,
}

impl IngestionConfig {
    /// Read the EDP_* variables from the environment; only the token is required.
    pub fn from_env() -> Result<IngestionConfig> {
        let token = env::var("EDP_TOKEN").context(ConfErrKind::MissingIngestionToken)?;
        Ok(IngestionConfig {
            url: env_or("EDP_URL", "https://input.yevents.io"),
            token,
            namespace: env_or("EDP_NAMESPACE", "kyma-dev"),
            data_stream: env_or("EDP_DATASTREAM_NAME", "consumption-metrics"),
            data_stream_version: env_or("EDP_DATASTREAM_VERSION", "1"),
            data_stream_env: env_or("EDP_DATASTREAM_ENV", "dev"),
            timeout: env_duration_secs("EDP_TIMEOUT", 30)?,
            retry_count: env_u32("EDP_RETRY", 5)?,
        })
    }
}
