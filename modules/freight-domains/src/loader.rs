//! Bulk loading of the location table from a `uszips.csv`-style file.
//!
//! Only the `zip`, `lat`, `lng`, `city` and `state_name` columns are read;
//! anything else in the header is ignored. Records are one per line. Quoted
//! fields may contain commas and doubled quotes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use freight_common::{Location, ZipCode};
use freight_geo::Point;

use crate::registry::FreightRegistry;

const REQUIRED_COLUMNS: [&str; 5] = ["zip", "lat", "lng", "city", "state_name"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped_rows: usize,
    /// The registry already had locations, so nothing was read.
    pub already_present: bool,
}

pub fn load_locations_file(registry: &mut FreightRegistry, path: &Path) -> Result<LoadSummary> {
    if registry.location_count() > 0 {
        info!("Locations exist, skipping load");
        return Ok(LoadSummary {
            already_present: true,
            ..Default::default()
        });
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open locations file: {}", path.display()))?;
    load_locations_csv(registry, BufReader::new(file))
        .with_context(|| format!("Failed to load locations from {}", path.display()))
}

pub fn load_locations_csv<R: BufRead>(
    registry: &mut FreightRegistry,
    reader: R,
) -> Result<LoadSummary> {
    if registry.location_count() > 0 {
        info!("Locations exist, skipping load");
        return Ok(LoadSummary {
            already_present: true,
            ..Default::default()
        });
    }

    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => split_record(&line.context("Failed to read header")?)?,
        None => bail!("locations file is empty"),
    };
    let columns = ColumnIndex::from_header(&header)?;

    let mut summary = LoadSummary::default();
    for (n, line) in lines.enumerate() {
        let line_no = n + 2;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        match split_record(&line).and_then(|fields| columns.location(&fields)) {
            Ok(location) => {
                if registry.insert_location(location) {
                    summary.inserted += 1;
                } else {
                    summary.skipped_rows += 1;
                }
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed location row");
                summary.skipped_rows += 1;
            }
        }
    }

    info!(
        inserted = summary.inserted,
        skipped = summary.skipped_rows,
        "Locations created"
    );
    Ok(summary)
}

struct ColumnIndex {
    zip: usize,
    lat: usize,
    lng: usize,
    city: usize,
    state: usize,
}

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| anyhow!("locations header is missing column {name:?}"))
        };
        let [zip, lat, lng, city, state] = REQUIRED_COLUMNS;
        Ok(Self {
            zip: find(zip)?,
            lat: find(lat)?,
            lng: find(lng)?,
            city: find(city)?,
            state: find(state)?,
        })
    }

    fn location(&self, fields: &[String]) -> Result<Location> {
        let field = |i: usize| {
            fields.get(i).map(|s| s.trim()).ok_or_else(|| {
                anyhow!("row has {} fields, expected at least {}", fields.len(), i + 1)
            })
        };
        let latitude: f64 = field(self.lat)?.parse().context("bad lat")?;
        let longitude: f64 = field(self.lng)?.parse().context("bad lng")?;

        Ok(Location {
            zip_code: ZipCode::parse(field(self.zip)?)?,
            city: field(self.city)?.to_string(),
            state: field(self.state)?.to_string(),
            point: Point::new(latitude, longitude)?,
        })
    }
}

/// Split one CSV record into fields.
fn split_record(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if in_quotes {
        bail!("unterminated quoted field");
    }
    fields.push(field);
    Ok(fields)
}
