//! In-memory registry of locations, trucks, and cargo.
//!
//! Trucks and cargo get monotonically increasing ids and iterate in id
//! order, which gives the proximity queries a stable candidate order.

use std::collections::{BTreeMap, HashMap};

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use freight_common::{Cargo, FreightError, Location, Pounds, Truck, TruckNumber, ZipCode};
use freight_geo::{Candidate, CandidateSource, Envelope};

const MISSING_LOCATION: &str = "Location matching query does not exist.";

// --- Inputs ---

#[derive(Debug, Clone, Deserialize)]
pub struct NewCargo {
    pub pick_up: String,
    pub delivery: String,
    pub weight: Pounds,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CargoUpdate {
    pub weight: Option<Pounds>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTruck {
    pub number: String,
    pub carrying_capacity: Pounds,
}

// --- Registry ---

#[derive(Debug, Default)]
pub struct FreightRegistry {
    locations: HashMap<ZipCode, Location>,
    /// Insertion order, for uniform random picks.
    location_order: Vec<ZipCode>,
    trucks: BTreeMap<u64, Truck>,
    cargo: BTreeMap<u64, Cargo>,
    next_truck_id: u64,
    next_cargo_id: u64,
}

impl FreightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Locations ==========

    /// Insert a location. Returns `false` and keeps the existing record if
    /// the zip code is already known.
    pub fn insert_location(&mut self, location: Location) -> bool {
        if self.locations.contains_key(&location.zip_code) {
            return false;
        }
        self.location_order.push(location.zip_code.clone());
        self.locations.insert(location.zip_code.clone(), location);
        true
    }

    pub fn location(&self, zip: &ZipCode) -> Option<&Location> {
        self.locations.get(zip)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn zip_codes(&self) -> &[ZipCode] {
        &self.location_order
    }

    pub fn random_zip<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ZipCode> {
        self.location_order.choose(rng)
    }

    /// Resolve a raw zip string to a known location's key.
    fn known_zip(&self, raw: &str) -> Result<ZipCode, FreightError> {
        let zip = ZipCode::parse(raw)?;
        if !self.locations.contains_key(&zip) {
            return Err(FreightError::Validation(MISSING_LOCATION.to_string()));
        }
        Ok(zip)
    }

    // ========== Cargo ==========

    pub fn create_cargo(&mut self, new: NewCargo) -> Result<Cargo, FreightError> {
        let pick_up = self.known_zip(&new.pick_up)?;
        let delivery = self.known_zip(&new.delivery)?;

        self.next_cargo_id += 1;
        let cargo = Cargo {
            id: self.next_cargo_id,
            pick_up,
            delivery,
            weight: new.weight,
            description: new.description,
        };
        info!(id = cargo.id, pick_up = %cargo.pick_up, delivery = %cargo.delivery, "Cargo created");
        self.cargo.insert(cargo.id, cargo.clone());
        Ok(cargo)
    }

    pub fn cargo(&self, id: u64) -> Result<&Cargo, FreightError> {
        self.cargo
            .get(&id)
            .ok_or_else(|| FreightError::not_found("Cargo", id))
    }

    pub fn cargos(&self) -> impl Iterator<Item = &Cargo> {
        self.cargo.values()
    }

    pub fn update_cargo(&mut self, id: u64, update: CargoUpdate) -> Result<Cargo, FreightError> {
        let cargo = self
            .cargo
            .get_mut(&id)
            .ok_or_else(|| FreightError::not_found("Cargo", id))?;
        if let Some(weight) = update.weight {
            cargo.weight = weight;
        }
        if let Some(description) = update.description {
            cargo.description = description;
        }
        debug!(id, "Cargo updated");
        Ok(cargo.clone())
    }

    pub fn delete_cargo(&mut self, id: u64) -> Result<Cargo, FreightError> {
        let removed = self
            .cargo
            .remove(&id)
            .ok_or_else(|| FreightError::not_found("Cargo", id))?;
        info!(id, "Cargo deleted");
        Ok(removed)
    }

    // ========== Trucks ==========

    /// Register a truck at a uniformly random known location.
    pub fn create_truck<R: Rng + ?Sized>(
        &mut self,
        new: NewTruck,
        rng: &mut R,
    ) -> Result<Truck, FreightError> {
        let number = TruckNumber::parse(&new.number)?;
        if self.trucks.values().any(|t| t.number == number) {
            return Err(FreightError::Conflict(format!(
                "truck with this number already exists: {number}"
            )));
        }
        let location = self
            .random_zip(rng)
            .cloned()
            .ok_or_else(|| FreightError::Validation("no locations loaded".to_string()))?;

        self.next_truck_id += 1;
        let truck = Truck {
            id: self.next_truck_id,
            number,
            location,
            carrying_capacity: new.carrying_capacity,
        };
        info!(id = truck.id, number = %truck.number, location = %truck.location, "Truck created");
        self.trucks.insert(truck.id, truck.clone());
        Ok(truck)
    }

    pub fn truck(&self, id: u64) -> Result<&Truck, FreightError> {
        self.trucks
            .get(&id)
            .ok_or_else(|| FreightError::not_found("Truck", id))
    }

    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    pub fn truck_count(&self) -> usize {
        self.trucks.len()
    }

    pub fn truck_ids(&self) -> Vec<u64> {
        self.trucks.keys().copied().collect()
    }

    pub fn update_truck_location(&mut self, id: u64, zip: &str) -> Result<Truck, FreightError> {
        let zip = self.known_zip(zip)?;
        let truck = self
            .trucks
            .get_mut(&id)
            .ok_or_else(|| FreightError::not_found("Truck", id))?;
        truck.location = zip;
        debug!(id, location = %truck.location, "Truck moved");
        Ok(truck.clone())
    }

    /// Trucks as proximity candidates, positioned at their current location.
    pub fn truck_candidates(&self) -> TruckCandidates<'_> {
        TruckCandidates { registry: self }
    }
}

/// Borrowed view joining each truck to its location's coordinates.
pub struct TruckCandidates<'a> {
    registry: &'a FreightRegistry,
}

impl CandidateSource for TruckCandidates<'_> {
    type Id = TruckNumber;

    fn scan(&self, envelope: &Envelope) -> Vec<Candidate<TruckNumber>> {
        self.registry
            .trucks
            .values()
            .filter_map(|truck| {
                let location = self.registry.locations.get(&truck.location)?;
                envelope
                    .contains(location.point)
                    .then(|| Candidate::new(truck.number.clone(), location.point))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use freight_geo::{Point, Radius};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn location(zip: &str, lat: f64, lng: f64) -> Location {
        Location {
            zip_code: ZipCode::parse(zip).unwrap(),
            city: "Somewhere".to_string(),
            state: "Missouri".to_string(),
            point: Point::new(lat, lng).unwrap(),
        }
    }

    fn registry() -> FreightRegistry {
        let mut registry = FreightRegistry::new();
        registry.insert_location(location("64101", 39.0, -94.5));
        registry.insert_location(location("55401", 45.0, -94.5));
        registry
    }

    fn new_cargo(pick_up: &str, delivery: &str) -> NewCargo {
        NewCargo {
            pick_up: pick_up.to_string(),
            delivery: delivery.to_string(),
            weight: Pounds::new(100).unwrap(),
            description: "crates".to_string(),
        }
    }

    #[test]
    fn duplicate_zip_keeps_first_location() {
        let mut registry = registry();
        assert!(!registry.insert_location(location("64101", 0.0, 0.0)));
        let kept = registry.location(&ZipCode::parse("64101").unwrap()).unwrap();
        assert_eq!(kept.point.latitude(), 39.0);
        assert_eq!(registry.location_count(), 2);
    }

    #[test]
    fn cargo_requires_known_locations() {
        let mut registry = registry();
        let err = registry.create_cargo(new_cargo("64101", "99999")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Location matching query does not exist."
        );
        assert!(registry.create_cargo(new_cargo("6410", "55401")).is_err());

        let cargo = registry.create_cargo(new_cargo("64101", "55401")).unwrap();
        assert_eq!(cargo.id, 1);
        assert_eq!(registry.cargo(1).unwrap().pick_up.as_str(), "64101");
    }

    #[test]
    fn cargo_update_touches_only_given_fields() {
        let mut registry = registry();
        registry.create_cargo(new_cargo("64101", "55401")).unwrap();

        let updated = registry
            .update_cargo(
                1,
                CargoUpdate {
                    weight: Some(Pounds::new(900).unwrap()),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(updated.weight.get(), 900);
        assert_eq!(updated.description, "crates");

        assert!(matches!(
            registry.update_cargo(42, CargoUpdate::default()),
            Err(FreightError::NotFound { .. })
        ));
    }

    #[test]
    fn deleted_cargo_is_gone() {
        let mut registry = registry();
        registry.create_cargo(new_cargo("64101", "55401")).unwrap();
        registry.delete_cargo(1).unwrap();
        assert!(registry.cargo(1).is_err());
        assert!(registry.delete_cargo(1).is_err());
    }

    #[test]
    fn truck_lands_on_a_known_location() {
        let mut registry = registry();
        let mut rng = StdRng::seed_from_u64(7);
        let truck = registry
            .create_truck(
                NewTruck {
                    number: "1234A".to_string(),
                    carrying_capacity: Pounds::new(500).unwrap(),
                },
                &mut rng,
            )
            .unwrap();
        assert!(registry.location(&truck.location).is_some());
    }

    #[test]
    fn truck_numbers_are_unique() {
        let mut registry = registry();
        let mut rng = StdRng::seed_from_u64(7);
        let new = || NewTruck {
            number: "1234A".to_string(),
            carrying_capacity: Pounds::new(10).unwrap(),
        };
        registry.create_truck(new(), &mut rng).unwrap();
        assert!(matches!(
            registry.create_truck(new(), &mut rng),
            Err(FreightError::Conflict(_))
        ));
    }

    #[test]
    fn truck_creation_needs_locations() {
        let mut registry = FreightRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let result = registry.create_truck(
            NewTruck {
                number: "1234A".to_string(),
                carrying_capacity: Pounds::new(10).unwrap(),
            },
            &mut rng,
        );
        assert!(matches!(result, Err(FreightError::Validation(_))));
    }

    #[test]
    fn candidates_follow_truck_location_and_envelope() {
        let mut registry = registry();
        let mut rng = StdRng::seed_from_u64(3);
        for number in ["1111A", "2222B"] {
            registry
                .create_truck(
                    NewTruck {
                        number: number.to_string(),
                        carrying_capacity: Pounds::new(10).unwrap(),
                    },
                    &mut rng,
                )
                .unwrap();
        }
        registry.update_truck_location(1, "64101").unwrap();
        registry.update_truck_location(2, "55401").unwrap();

        let all = registry.truck_candidates().scan(&Envelope::Unbounded);
        let numbers: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(numbers, vec!["1111A", "2222B"]);

        let near_kc = Envelope::around(
            Point::new(39.0, -94.5).unwrap(),
            Radius::miles(100.0).unwrap(),
        );
        let boxed = registry.truck_candidates().scan(&near_kc);
        assert_eq!(boxed.len(), 1);
        assert_eq!(boxed[0].id.as_str(), "1111A");
    }

    #[test]
    fn moving_a_truck_to_an_unknown_zip_fails() {
        let mut registry = registry();
        let mut rng = StdRng::seed_from_u64(3);
        registry
            .create_truck(
                NewTruck {
                    number: "1111A".to_string(),
                    carrying_capacity: Pounds::new(10).unwrap(),
                },
                &mut rng,
            )
            .unwrap();
        assert!(registry.update_truck_location(1, "00000").is_err());
        assert!(registry.update_truck_location(9, "64101").is_err());
    }
}
