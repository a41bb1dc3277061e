use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::zone::Zone;

/// Zone temperatures, shared between handlers.
///
/// Every zone has a value from construction on; only values change.
/// Clones share the same underlying map. Any integer is accepted.
#[derive(Clone)]
pub struct TemperatureStore {
    temps: Arc<Mutex<[i64; Zone::COUNT]>>,
}

impl TemperatureStore {
    pub fn new() -> Self {
        Self {
            temps: Arc::new(Mutex::new(Zone::ALL.map(Zone::default_temperature))),
        }
    }

    pub async fn get(&self, zone: Zone) -> i64 {
        self.temps.lock().await[zone.index()]
    }

    /// Overwrite the zone's value. Returns `(before, after)`.
    pub async fn set(&self, zone: Zone, value: i64) -> (i64, i64) {
        let mut temps = self.temps.lock().await;
        let before = std::mem::replace(&mut temps[zone.index()], value);
        debug!(zone = %zone, before, after = value, "temperature updated");
        (before, value)
    }

    /// All zones in declaration order, read under a single lock.
    pub async fn snapshot(&self) -> Vec<(Zone, i64)> {
        let temps = self.temps.lock().await;
        Zone::ALL.iter().map(|z| (*z, temps[z.index()])).collect()
    }
}

impl Default for TemperatureStore {
    fn default() -> Self {
        Self::new()
    }
}
