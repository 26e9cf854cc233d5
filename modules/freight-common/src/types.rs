use std::fmt;
use std::str::FromStr;

use freight_geo::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FreightError;

// --- Identifiers ---

/// Five-digit US ZIP code; the natural key of a [`Location`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(value: &str) -> Result<Self, FreightError> {
        if value.len() != 5 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(FreightError::Validation(format!(
                "zip code must be exactly 5 digits, got {value:?}"
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZipCode {
    type Error = FreightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ZipCode::parse(&value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

impl FromStr for ZipCode {
    type Err = FreightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZipCode::parse(s)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truck plate: four digits followed by one capital letter, e.g. `1234A`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "String", into = "String")]
pub struct TruckNumber(String);

impl TruckNumber {
    pub fn parse(value: &str) -> Result<Self, FreightError> {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() != 5 {
            return Err(FreightError::Validation("Must be 5".to_string()));
        }
        if !chars[4].is_ascii_uppercase() {
            return Err(FreightError::Validation("Must be capital letter".to_string()));
        }
        if !chars[..4].iter().all(|c| c.is_ascii_digit()) {
            return Err(FreightError::Validation("Must be digit".to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TruckNumber {
    type Error = FreightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TruckNumber::parse(&value)
    }
}

impl From<TruckNumber> for String {
    fn from(number: TruckNumber) -> Self {
        number.0
    }
}

impl FromStr for TruckNumber {
    type Err = FreightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TruckNumber::parse(s)
    }
}

impl fmt::Display for TruckNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Quantities ---

pub const MIN_POUNDS: u16 = 1;
pub const MAX_POUNDS: u16 = 1000;

/// Cargo weight or truck carrying capacity, 1..=1000 pounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "i64", into = "u16")]
pub struct Pounds(u16);

impl Pounds {
    pub fn new(value: i64) -> Result<Self, FreightError> {
        if !(MIN_POUNDS as i64..=MAX_POUNDS as i64).contains(&value) {
            return Err(FreightError::Validation(format!(
                "Ensure this value is between {MIN_POUNDS} and {MAX_POUNDS}, got {value}"
            )));
        }
        Ok(Self(value as u16))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for Pounds {
    type Error = FreightError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Pounds::new(value)
    }
}

impl From<Pounds> for u16 {
    fn from(pounds: Pounds) -> Self {
        pounds.0
    }
}

impl fmt::Display for Pounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb", self.0)
    }
}

// --- Records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub zip_code: ZipCode,
    pub city: String,
    pub state: String,
    pub point: Point,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.zip_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Truck {
    pub id: u64,
    pub number: TruckNumber,
    /// Zip code of the truck's current location.
    pub location: ZipCode,
    pub carrying_capacity: Pounds,
}

impl fmt::Display for Truck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Cargo {
    pub id: u64,
    pub pick_up: ZipCode,
    pub delivery: ZipCode,
    pub weight: Pounds,
    pub description: String,
}

impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pick_up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_code_requires_five_digits() {
        assert_eq!(ZipCode::parse("64101").unwrap().as_str(), "64101");
        assert!(ZipCode::parse("6410").is_err());
        assert!(ZipCode::parse("641011").is_err());
        assert!(ZipCode::parse("6410a").is_err());
    }

    #[test]
    fn truck_number_messages_follow_check_order() {
        let msg = |s: &str| match TruckNumber::parse(s) {
            Err(FreightError::Validation(m)) => m,
            other => panic!("expected validation error for {s}, got {other:?}"),
        };
        assert_eq!(msg("123A"), "Must be 5");
        assert_eq!(msg("1234a"), "Must be capital letter");
        assert_eq!(msg("12X4A"), "Must be digit");
        assert_eq!(TruckNumber::parse("1234A").unwrap().to_string(), "1234A");
    }

    #[test]
    fn pounds_bounds_are_inclusive() {
        assert!(Pounds::new(0).is_err());
        assert!(Pounds::new(1001).is_err());
        assert!(Pounds::new(-3).is_err());
        assert_eq!(Pounds::new(1).unwrap().get(), 1);
        assert_eq!(Pounds::new(1000).unwrap().get(), 1000);
    }

    #[test]
    fn cargo_deserializes_with_validation() {
        let cargo: Cargo = serde_json::from_str(
            r#"{"id": 1, "pick_up": "64101", "delivery": "10001", "weight": 250, "description": "pallets"}"#,
        )
        .unwrap();
        assert_eq!(cargo.to_string(), "64101");
        assert_eq!(cargo.weight.get(), 250);

        let bad = serde_json::from_str::<Cargo>(
            r#"{"id": 1, "pick_up": "64101", "delivery": "10001", "weight": 5000, "description": ""}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn pounds_serialize_as_plain_numbers() {
        let json = serde_json::to_value(Pounds::new(42).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(42));
    }
}
