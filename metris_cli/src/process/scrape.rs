use metris_definitions::ConsumptionMetrics;

use super::builder;
use super::Process;
use crate::cluster::ClusterClient;
use crate::registry::Record;
use crate::Result;

impl Process {
    /// Drain the queue until shutdown. Scrape outcomes are handled inside
    /// `scrape`; nothing a tenant does can take the worker down.
    pub(crate) fn worker_loop(&self, worker: usize) {
        debug!("scrape worker {} up", worker);
        while let Some(sub_account_id) = self.queue.get() {
            self.scrape(&sub_account_id);
        }
        debug!("scrape worker {} done, queue shut down", worker);
    }

    /// One sample for one tenant: generate a fresh record, fall back to
    /// the cached metric when generation fails, ship the payload, and
    /// schedule the next sample on success.
    pub(crate) fn scrape(&self, sub_account_id: &str) {
        let record = match self.registry.get(sub_account_id) {
            Some(record) => record,
            // deleted by discovery while queued; its queue entry just drains
            None => {
                info!("tenant {}: no longer tracked, skipping scrape", sub_account_id);
                return;
            }
        };

        match self.generate(&record) {
            Ok((kube_config, metric)) => match serde_json::to_vec(&metric) {
                Ok(payload) => {
                    if self.ship(sub_account_id, &payload) {
                        let mut updated = record;
                        updated.kube_config = kube_config;
                        updated.metric = Some(metric);
                        self.registry.set(updated);
                        self.queue.add_after(sub_account_id, self.scrape_interval);
                    }
                    // failed sends are not re-queued here; the next
                    // discovery tick re-injects the tenant if it is
                    // still trackable
                }
                Err(e) => {
                    warn!("tenant {}: failed to serialize fresh metric: {}", sub_account_id, e);
                    self.ship_fallback(&record);
                }
            },
            Err(e) => {
                warn!("tenant {}: failed to generate metric: {}", sub_account_id, e);
                self.ship_fallback(&record);
            }
        }
    }

    /// Produce a fresh metric for the record's shoot.
    ///
    /// The four reads are sequential and the first failure aborts the
    /// sample. Returns the kubeconfig that worked so the caller can cache
    /// it alongside the metric.
    fn generate(&self, record: &Record) -> Result<(String, ConsumptionMetrics)> {
        let kube_config = if record.kube_config.is_empty() {
            self.gardener.get_shoot_kubeconfig(&record.shoot_name)?
        } else {
            record.kube_config.clone()
        };

        let shoot = self.gardener.get_shoot(&record.shoot_name)?;
        let cluster = ClusterClient::from_kubeconfig(&kube_config, self.kube_timeout)?;
        let nodes = cluster.list_nodes()?;
        let pvcs = cluster.list_pvcs()?;
        let services = cluster.list_services()?;

        let metric = builder::build(&shoot, &nodes, &pvcs, &services, &self.catalog)?;
        Ok((kube_config, metric))
    }

    /// Re-emit the last successful metric so downstream never sees a gap.
    ///
    /// Without a cached metric there is nothing to send; the tenant is
    /// skipped entirely and discovery decides whether it comes back.
    fn ship_fallback(&self, record: &Record) {
        let tenant = record.sub_account_id.as_str();
        let metric = match &record.metric {
            Some(metric) => metric,
            None => {
                warn!("tenant {}: no previous metric to fall back to, skipping", tenant);
                return;
            }
        };
        match serde_json::to_vec(metric) {
            Ok(payload) => {
                info!("tenant {}: re-emitting the last successful metric", tenant);
                if self.ship(tenant, &payload) {
                    // cached state stays as-is; only the cadence continues
                    self.queue.add_after(tenant, self.scrape_interval);
                }
            }
            Err(e) => {
                error!("tenant {}: failed to serialize cached metric: {}", tenant, e);
            }
        }
    }

    fn ship(&self, tenant: &str, payload: &[u8]) -> bool {
        match self.edp.send(tenant, payload) {
            Ok(()) => {
                info!("tenant {}: consumption record delivered", tenant);
                true
            }
            Err(e) => {
                error!("tenant {}: delivery failed: {}", tenant, e);
                false
            }
        }
    }
}
