#[macro_use]
extern crate log;
extern crate env_logger;

extern crate metris;
extern crate metris_definitions;

use std::process;
use std::sync::Arc;

use metris::gardener::GardenerClient;
use metris::options::Options;
use metris::process::Process;
use metris::queue::DelayingQueue;
use metris::registry::Registry;
use metris::{broker::BrokerClient, edp::EdpClient};
use metris_definitions::{BrokerConfig, Catalog, IngestionConfig};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("metris failed to start: {}", e);
        eprintln!("metris failed to start: {}", e);
        process::exit(1);
    }
}

fn run() -> metris::Result<()> {
    let opts = Options::parse()?;
    metris::init()?;
    info!("starting metris with {}", opts);

    let broker_config = BrokerConfig::from_env()?;
    let ingestion_config = IngestionConfig::from_env()?;
    let catalog = Catalog::from_env()?;

    let gardener = GardenerClient::from_kubeconfig_path(
        &opts.gardener_kubeconfig_path,
        &opts.gardener_namespace,
        opts.kube_timeout,
    )?;

    let process = Arc::new(Process {
        broker: BrokerClient::new(&broker_config)?,
        edp: EdpClient::new(&ingestion_config)?,
        gardener,
        catalog,
        registry: Registry::new(),
        queue: DelayingQueue::new(),
        scrape_interval: opts.scrape_interval,
        discovery_interval: opts.discovery_interval,
        kube_timeout: opts.kube_timeout,
        workers: opts.worker_pool_size,
    });

    process.start();
    Ok(())
}
