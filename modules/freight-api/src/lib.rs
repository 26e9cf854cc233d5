pub mod error;
pub mod relocation;
pub mod routes;

use tokio::sync::RwLock;

use freight_domains::FreightRegistry;
use freight_geo::Radius;

pub use error::ApiError;
pub use relocation::spawn_relocation_loop;
pub use routes::build_router;

pub struct AppState {
    pub registry: RwLock<FreightRegistry>,
    /// Truck-count radius when a listing request gives none.
    pub default_radius: Radius,
}

impl AppState {
    pub fn new(registry: FreightRegistry, default_radius: Radius) -> Self {
        Self {
            registry: RwLock::new(registry),
            default_radius,
        }
    }
}
