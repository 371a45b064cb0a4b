use std::collections::HashMap;
use std::sync::Mutex;

use metris_definitions::ConsumptionMetrics;

/// Everything the collector remembers about one tenant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// Opaque tenant identifier from the broker.
    pub sub_account_id: String,
    /// Shoot backing the tenant's workload cluster.
    pub shoot_name: String,
    /// Serialized kubeconfig for the workload cluster; empty until a
    /// worker has fetched it, cleared whenever the shoot changes.
    pub kube_config: String,
    /// Last successfully generated metric, used as the fallback sample.
    pub metric: Option<ConsumptionMetrics>,
}

impl Record {
    pub fn new(sub_account_id: &str, shoot_name: &str) -> Record {
        Record {
            sub_account_id: sub_account_id.to_string(),
            shoot_name: shoot_name.to_string(),
            kube_config: String::new(),
            metric: None,
        }
    }
}

/// Thread-safe map of tenant id to record.
///
/// Discovery owns the lifetime of entries; workers read and replace them.
/// Contention is low, so one coarse lock over the map is plenty.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<HashMap<String, Record>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn get(&self, sub_account_id: &str) -> Option<Record> {
        self.inner.lock().unwrap().get(sub_account_id).cloned()
    }

    /// Insert only when the tenant is unknown; returns whether it inserted,
    /// which is how discovery tells a new tenant from a seen one.
    pub fn add_if_absent(&self, record: Record) -> bool {
        let mut map = self.inner.lock().unwrap();
        if map.contains_key(&record.sub_account_id) {
            return false;
        }
        map.insert(record.sub_account_id.clone(), record);
        true
    }

    /// Insert or replace unconditionally.
    pub fn set(&self, record: Record) {
        self.inner
            .lock()
            .unwrap()
            .insert(record.sub_account_id.clone(), record);
    }

    pub fn delete(&self, sub_account_id: &str) -> bool {
        self.inner.lock().unwrap().remove(sub_account_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
