//! Cargo list and detail views with nearby-truck information.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use freight_common::{Cargo, FreightError, Pounds, TruckNumber, ZipCode};
use freight_geo::{enumerate, rank_by_distance, BatchContext, Radius, RadiusQuery};

use crate::registry::FreightRegistry;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CargoListFilter {
    pub weight_from: Option<u16>,
    pub weight_up_to: Option<u16>,
    /// Radius for the truck count. When set, cargo with no truck inside it
    /// is dropped from the listing.
    pub miles_to_trucks: Option<f64>,
}

impl CargoListFilter {
    fn admits_weight(&self, weight: Pounds) -> bool {
        let w = weight.get();
        self.weight_from.map_or(true, |from| w >= from)
            && self.weight_up_to.map_or(true, |up_to| w <= up_to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoListItem {
    pub pk: u64,
    pub pick_up: ZipCode,
    pub delivery: ZipCode,
    pub weight: Pounds,
    pub description: String,
    /// Trucks within the listing radius of the pick-up point.
    pub trucks: usize,
}

/// List cargo matching `filter`, each with its nearby-truck count.
///
/// Counts are computed once per distinct pick-up zip for the whole listing.
pub fn list_cargo(
    registry: &FreightRegistry,
    filter: &CargoListFilter,
    default_radius: Radius,
) -> Result<Vec<CargoListItem>, FreightError> {
    let radius = match filter.miles_to_trucks {
        Some(miles) => Radius::miles(miles)?,
        None => default_radius,
    };
    let trucks = registry.truck_candidates();
    let mut batch: BatchContext<ZipCode> = BatchContext::new(radius);

    let mut items = Vec::new();
    for cargo in registry.cargos().filter(|c| filter.admits_weight(c.weight)) {
        let Some(pick_up) = registry.location(&cargo.pick_up) else {
            warn!(id = cargo.id, pick_up = %cargo.pick_up, "Cargo pick-up location missing");
            continue;
        };
        let nearby = batch.count_within_cached(&trucks, cargo.pick_up.clone(), pick_up.point);
        if filter.miles_to_trucks.is_some() && nearby == 0 {
            continue;
        }
        items.push(list_item(cargo, nearby));
    }

    debug!(
        listed = items.len(),
        pick_up_points = batch.len(),
        cache_hits = batch.hits(),
        %radius,
        "Cargo listing computed"
    );
    Ok(items)
}

fn list_item(cargo: &Cargo, trucks: usize) -> CargoListItem {
    CargoListItem {
        pk: cargo.id,
        pick_up: cargo.pick_up.clone(),
        delivery: cargo.delivery.clone(),
        weight: cargo.weight,
        description: cargo.description.clone(),
        trucks,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailOrder {
    /// Fleet order, as registered.
    #[default]
    Input,
    /// Nearest truck first.
    Distance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckDistance {
    #[serde(rename = "truck number")]
    pub truck_number: TruckNumber,
    /// Display form, e.g. `"414.56 miles"`.
    pub distance: String,
    pub distance_miles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoDetail {
    pub pick_up: ZipCode,
    pub delivery: ZipCode,
    pub weight: Pounds,
    pub description: String,
    pub trucks: Vec<TruckDistance>,
}

/// One cargo with every truck in the fleet and its distance to the pick-up.
pub fn cargo_detail(
    registry: &FreightRegistry,
    id: u64,
    order: DetailOrder,
) -> Result<CargoDetail, FreightError> {
    let cargo = registry.cargo(id)?;
    let pick_up = registry
        .location(&cargo.pick_up)
        .ok_or_else(|| FreightError::not_found("Location", &cargo.pick_up))?;

    let query = RadiusQuery::with_default_radius(pick_up.point);
    let mut entries = enumerate(&registry.truck_candidates(), &query);
    if order == DetailOrder::Distance {
        entries = rank_by_distance(entries);
    }

    let trucks = entries
        .into_iter()
        .map(|entry| TruckDistance {
            distance: entry.display_distance(),
            distance_miles: entry.distance_miles,
            truck_number: entry.id,
        })
        .collect();

    Ok(CargoDetail {
        pick_up: cargo.pick_up.clone(),
        delivery: cargo.delivery.clone(),
        weight: cargo.weight,
        description: cargo.description.clone(),
        trucks,
    })
}
