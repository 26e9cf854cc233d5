pub mod listing;
pub mod loader;
pub mod registry;
pub mod seed;

pub use listing::{
    cargo_detail, list_cargo, CargoDetail, CargoListFilter, CargoListItem, DetailOrder,
    TruckDistance,
};
pub use loader::{load_locations_csv, load_locations_file, LoadSummary};
pub use registry::{CargoUpdate, FreightRegistry, NewCargo, NewTruck, TruckCandidates};
pub use seed::{random_truck_number, relocate_trucks, seed_trucks};
