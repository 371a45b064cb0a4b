use std::sync::Arc;
use std::time::Duration;

use threadpool::ThreadPool;

use metris_definitions::Catalog;

use super::broker::BrokerClient;
use super::edp::EdpClient;
use super::gardener::GardenerClient;
use super::queue::DelayingQueue;
use super::registry::Registry;

/// Pure consumption-record builder
pub mod builder;

/// Roster polling and registry/queue reconciliation
mod discovery;

/// The scrape worker loop
mod scrape;

/// Everything one collector run needs, wired together by the bootstrap.
///
/// Discovery and the workers only ever share the registry and the queue;
/// both synchronise internally, so the whole struct is handed around
/// behind one `Arc` with no further locking.
pub struct Process {
    pub broker: BrokerClient,
    pub edp: EdpClient,
    pub gardener: GardenerClient,
    pub catalog: Catalog,
    pub registry: Registry,
    pub queue: DelayingQueue,
    /// Pause between two samples of the same tenant.
    pub scrape_interval: Duration,
    /// Pause between two roster polls.
    pub discovery_interval: Duration,
    /// Per-request timeout for workload-cluster reads.
    pub kube_timeout: Duration,
    pub workers: usize,
}

impl Process {
    /// Spawn the scrape workers, then run discovery on the calling thread.
    ///
    /// Never returns; the process lives until it is killed. Shutting the
    /// queue down would drain the workers, but the discovery loop has no
    /// reason to stop on its own.
    pub fn start(self: Arc<Process>) {
        let workers = self.workers.max(1);
        let pool = ThreadPool::with_name("scrape-worker".into(), workers);
        for worker in 0..workers {
            let process = Arc::clone(&self);
            pool.execute(move || process.worker_loop(worker));
        }
        info!("started {} scrape workers", workers);
        self.discovery_loop();
    }
}
