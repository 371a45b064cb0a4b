use std::thread;

use metris_definitions::roster::RuntimesPage;

use super::Process;
use crate::registry::Record;

impl Process {
    /// Poll the broker forever, folding each roster into registry + queue.
    pub(crate) fn discovery_loop(&self) {
        loop {
            match self.broker.get_runtimes() {
                Ok(page) => {
                    debug!(
                        "roster has {} runtimes ({} in total upstream)",
                        page.data.len(),
                        page.total_count
                    );
                    self.reconcile(&page);
                }
                // nothing is mutated on a failed poll; the previous roster
                // keeps being scraped at cadence
                Err(e) => error!("roster discovery failed: {}", e),
            }
            thread::sleep(self.discovery_interval);
        }
    }

    /// Fold one roster page into the registry and the queue.
    ///
    /// Newly trackable tenants are queued immediately; a changed shoot
    /// name resets the record because the cached credentials and metric
    /// belong to the old cluster; tenants that stopped being trackable
    /// are dropped and their queue entries drain through the workers.
    /// A tracked tenant that is in neither the ready queue nor a delay
    /// (its last send failed, so the worker did not re-queue it) is
    /// re-injected here.
    pub fn reconcile(&self, page: &RuntimesPage) {
        for runtime in &page.data {
            let tenant = runtime.sub_account_id.as_str();
            if tenant.is_empty() {
                warn!("roster entry without a subAccountId, skipping");
                continue;
            }

            if !runtime.trackable() {
                if self.registry.delete(tenant) {
                    info!("tenant {}: no longer trackable, dropped from the registry", tenant);
                }
                continue;
            }

            if runtime.shoot_name.is_empty() {
                warn!("tenant {}: trackable but without a shoot name, skipping", tenant);
                continue;
            }

            match self.registry.get(tenant) {
                None => {
                    self.registry
                        .add_if_absent(Record::new(tenant, &runtime.shoot_name));
                    self.queue.add(tenant);
                    info!("tenant {}: tracking shoot {}", tenant, runtime.shoot_name);
                }
                Some(ref existing) if existing.shoot_name != runtime.shoot_name => {
                    info!(
                        "tenant {}: shoot changed from {} to {}, resetting cached state",
                        tenant, existing.shoot_name, runtime.shoot_name
                    );
                    self.registry.set(Record::new(tenant, &runtime.shoot_name));
                    self.queue.add(tenant);
                }
                // a tenant serving its scrape delay keeps it; one with no
                // queue entry at all comes back now
                Some(_) => {
                    if self.queue.add_if_absent(tenant) {
                        info!("tenant {}: fell out of the queue, re-queued", tenant);
                    }
                }
            }
        }
    }
}
