#![allow(renamed_and_removed_lints)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate serde_yaml;

// daemon flags
extern crate clap;

// outbound http clients
extern crate reqwest;

// kubeconfig secret payloads
extern crate base64;

extern crate openssl_probe;

// backoff jitter
extern crate rand;

#[macro_use]
extern crate log;

// scrape worker pool
extern crate threadpool;

#[macro_use] extern crate failure;

pub use failure::Error; //Fail
pub type Result<T> = std::result::Result<T, Error>;

extern crate metris_definitions;
pub use metris_definitions::{BrokerConfig, Catalog, ConsumptionMetrics, IngestionConfig};
pub use metris_definitions::structs;

/// Command-line options for the daemon
pub mod options;

/// Bounded retry envelope shared by the outbound clients
pub mod retry;

/// A minimal typed Kubernetes REST interface using `reqwest`
pub mod kube;

/// Control-plane reads: shoots and kubeconfig secrets
pub mod gardener;

/// Workload-cluster reads: nodes, PVCs and services
pub mod cluster;

/// Roster client for the runtime broker
pub mod broker;

/// Event client for the data ingestion endpoint
pub mod edp;

/// Thread-safe tenant registry
pub mod registry;

/// Delaying work queue feeding the scrape workers
pub mod queue;

/// The scrape pipeline: discovery loop and worker pool
pub mod process;

#[cfg(test)]
pub mod testutil;

/// Smart initialiser with safety
pub fn init() -> Result<()> {
    openssl_probe::init_ssl_cert_env_vars(); // prerequisite for https clients
    Ok(())
}
