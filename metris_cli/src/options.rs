use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use clap::{App, AppSettings, Arg, ArgMatches};

use super::Result;

/// Operational knobs supplied on the command line.
///
/// Endpoint credentials deliberately stay out of here; they come from the
/// environment so they never show up in a process listing.
#[derive(Clone, Debug)]
pub struct Options {
    pub gardener_kubeconfig_path: String,
    pub gardener_namespace: String,
    pub scrape_interval: Duration,
    pub discovery_interval: Duration,
    pub worker_pool_size: usize,
    pub kube_timeout: Duration,
}

fn app() -> App<'static, 'static> {
    App::new("metris")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Consumption telemetry collector for a fleet of managed Kubernetes clusters")
        .setting(AppSettings::ColoredHelp)
        .arg(
            Arg::with_name("gardener-kubeconfig-path")
                .long("gardener-kubeconfig-path")
                .takes_value(true)
                .default_value("/gardener/kubeconfig")
                .help("Path to the kubeconfig for the hosting control plane"),
        )
        .arg(
            Arg::with_name("gardener-namespace")
                .long("gardener-namespace")
                .takes_value(true)
                .default_value("garden-kyma-dev")
                .help("Control-plane namespace holding shoots and kubeconfig secrets"),
        )
        .arg(
            Arg::with_name("scrape-interval")
                .long("scrape-interval")
                .takes_value(true)
                .default_value("3600")
                .help("Seconds between two samples of the same tenant"),
        )
        .arg(
            Arg::with_name("discovery-interval")
                .long("discovery-interval")
                .takes_value(true)
                .default_value("600")
                .help("Seconds between two roster polls"),
        )
        .arg(
            Arg::with_name("worker-pool-size")
                .long("worker-pool-size")
                .takes_value(true)
                .default_value("1")
                .help("Number of concurrent scrape workers"),
        )
        .arg(
            Arg::with_name("kube-timeout")
                .long("kube-timeout")
                .takes_value(true)
                .default_value("30")
                .help("Seconds before any single Kubernetes API request is abandoned"),
        )
}

impl Options {
    /// Parse from the process arguments; clap prints usage and exits on
    /// malformed flags or `--help`.
    pub fn parse() -> Result<Options> {
        let matches = app().get_matches_from(std::env::args());
        Options::from_matches(&matches)
    }

    /// Parse from an explicit argument list.
    pub fn parse_from<I, T>(args: I) -> Result<Options>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Options::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Options> {
        Ok(Options {
            gardener_kubeconfig_path: matches
                .value_of("gardener-kubeconfig-path")
                .unwrap()
                .to_string(),
            gardener_namespace: matches.value_of("gardener-namespace").unwrap().to_string(),
            scrape_interval: Duration::from_secs(parse_secs(matches, "scrape-interval")?),
            discovery_interval: Duration::from_secs(parse_secs(matches, "discovery-interval")?),
            worker_pool_size: matches
                .value_of("worker-pool-size")
                .unwrap()
                .parse()
                .map_err(|e| format_err!("invalid worker-pool-size: {}", e))?,
            kube_timeout: Duration::from_secs(parse_secs(matches, "kube-timeout")?),
        })
    }
}

fn parse_secs(matches: &ArgMatches, name: &str) -> Result<u64> {
    matches
        .value_of(name)
        .unwrap()
        .parse()
        .map_err(|e| format_err!("invalid {}: {}", name, e))
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "--gardener-kubeconfig-path={} --gardener-namespace={} --scrape-interval={}s \
             --discovery-interval={}s --worker-pool-size={} --kube-timeout={}s",
            self.gardener_kubeconfig_path,
            self.gardener_namespace,
            self.scrape_interval.as_secs(),
            self.discovery_interval.as_secs(),
            self.worker_pool_size,
            self.kube_timeout.as_secs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Options;
    use std::time::Duration;

    #[test]
    fn defaults_apply_without_flags() {
        let opts = Options::parse_from(vec!["metris"]).unwrap();
        assert_eq!(opts.gardener_kubeconfig_path, "/gardener/kubeconfig");
        assert_eq!(opts.gardener_namespace, "garden-kyma-dev");
        assert_eq!(opts.scrape_interval, Duration::from_secs(3600));
        assert_eq!(opts.discovery_interval, Duration::from_secs(600));
        assert_eq!(opts.worker_pool_size, 1);
        assert_eq!(opts.kube_timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_the_defaults() {
        let opts = Options::parse_from(vec![
            "metris",
            "--gardener-kubeconfig-path",
            "/tmp/kubeconfig",
            "--gardener-namespace",
            "garden-prod",
            "--scrape-interval",
            "600",
            "--discovery-interval",
            "120",
            "--worker-pool-size",
            "8",
            "--kube-timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(opts.gardener_kubeconfig_path, "/tmp/kubeconfig");
        assert_eq!(opts.gardener_namespace, "garden-prod");
        assert_eq!(opts.scrape_interval, Duration::from_secs(600));
        assert_eq!(opts.discovery_interval, Duration::from_secs(120));
        assert_eq!(opts.worker_pool_size, 8);
        assert_eq!(opts.kube_timeout, Duration::from_secs(5));
    }

    #[test]
    fn non_numeric_intervals_are_rejected() {
        assert!(Options::parse_from(vec!["metris", "--scrape-interval", "1h"]).is_err());
        assert!(Options::parse_from(vec!["metris", "--worker-pool-size", "many"]).is_err());
    }

    #[test]
    fn displays_as_a_flag_line() {
        let opts = Options::parse_from(vec!["metris"]).unwrap();
        let line = opts.to_string();
        assert!(line.contains("--gardener-namespace=garden-kyma-dev"));
        assert!(line.contains("--worker-pool-size=1"));
    }
}
