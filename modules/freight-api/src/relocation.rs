//! Background job that periodically moves every truck to a random location.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tracing::{error, info};

use freight_domains::relocate_trucks;

use crate::AppState;

/// Spawn the relocation loop. The first move happens one `every` after start.
pub fn spawn_relocation_loop(state: &Arc<AppState>, every: Duration) -> JoinHandle<()> {
    let state = Arc::clone(state);
    let handle = tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        loop {
            tokio::time::sleep(every).await;
            relocate_once(&state, &mut rng).await;
        }
    });

    info!(interval_secs = every.as_secs(), "Truck relocation loop started");
    handle
}

/// Run one relocation pass under the registry write lock.
pub async fn relocate_once(state: &AppState, rng: &mut StdRng) -> usize {
    let mut registry = state.registry.write().await;
    match relocate_trucks(&mut registry, rng) {
        Ok(moved) => moved,
        Err(e) => {
            error!(error = %e, "Truck relocation failed");
            0
        }
    }
}
