use rand::Rng;
use tracing::{info, warn};

use freight_common::{FreightError, Pounds, TruckNumber, MAX_POUNDS, MIN_POUNDS};

use crate::registry::{FreightRegistry, NewTruck};

/// Draws per requested truck before seeding gives up on finding a free number.
const MAX_DRAWS_PER_TRUCK: usize = 50;

/// A random plate in the `[1000-9999][A-Z]` space.
pub fn random_truck_number<R: Rng + ?Sized>(rng: &mut R) -> Result<TruckNumber, FreightError> {
    let digits: u16 = rng.random_range(1000..=9999);
    let letter = char::from(rng.random_range(b'A'..=b'Z'));
    TruckNumber::parse(&format!("{digits}{letter}"))
}

/// Fill an empty fleet with `count` random trucks. A registry that already
/// has trucks is left alone. Returns how many trucks were created.
pub fn seed_trucks<R: Rng + ?Sized>(
    registry: &mut FreightRegistry,
    count: usize,
    rng: &mut R,
) -> Result<usize, FreightError> {
    if registry.truck_count() > 0 {
        info!(existing = registry.truck_count(), "Trucks exist, skipping seed");
        return Ok(0);
    }

    let mut created = 0;
    let mut draws = 0;
    while created < count {
        draws += 1;
        if draws > count * MAX_DRAWS_PER_TRUCK {
            return Err(FreightError::Conflict(format!(
                "could not find free truck numbers after {draws} draws"
            )));
        }
        let new = NewTruck {
            number: random_truck_number(rng)?.to_string(),
            carrying_capacity: Pounds::new(rng.random_range(MIN_POUNDS..=MAX_POUNDS).into())?,
        };
        match registry.create_truck(new, rng) {
            Ok(_) => created += 1,
            Err(FreightError::Conflict(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    info!(created, "Trucks created");
    Ok(created)
}

/// Move every truck to a uniformly random location. Returns the number moved.
pub fn relocate_trucks<R: Rng + ?Sized>(
    registry: &mut FreightRegistry,
    rng: &mut R,
) -> Result<usize, FreightError> {
    if registry.location_count() == 0 {
        warn!("No locations loaded, skipping truck relocation");
        return Ok(0);
    }

    let mut moved = 0;
    for id in registry.truck_ids() {
        let Some(zip) = registry.random_zip(rng).cloned() else {
            break;
        };
        registry.update_truck_location(id, zip.as_str())?;
        moved += 1;
    }

    info!(moved, "Truck locations updated");
    Ok(moved)
}
