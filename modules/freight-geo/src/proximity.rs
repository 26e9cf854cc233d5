use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounding_box::Envelope;
use crate::distance::{distance_miles, is_within_radius};
use crate::point::{Point, Radius};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A location-bearing record evaluated for proximity (a truck, usually).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate<Id> {
    pub id: Id,
    pub point: Point,
}

impl<Id> Candidate<Id> {
    pub fn new(id: Id, point: Point) -> Self {
        Self { id, point }
    }
}

/// "Which candidates are within `radius` of `center`?"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RadiusQuery {
    pub center: Point,
    #[serde(default)]
    pub radius: Radius,
}

impl RadiusQuery {
    pub fn new(center: Point, radius: Radius) -> Self {
        Self { center, radius }
    }

    pub fn with_default_radius(center: Point) -> Self {
        Self::new(center, Radius::default())
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::around(self.center, self.radius)
    }
}

/// One candidate with its exact distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry<Id> {
    pub id: Id,
    pub distance_miles: f64,
}

impl<Id> MatchEntry<Id> {
    pub fn within(&self, radius: Radius) -> bool {
        is_within_radius(self.distance_miles, radius.as_miles())
    }

    /// Distance rendered for display, e.g. `"414.56 miles"`.
    pub fn display_distance(&self) -> String {
        self.to_string()
    }
}

impl<Id> std::fmt::Display for MatchEntry<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} miles", self.distance_miles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Box-reduced count of candidates inside the radius.
    Count,
    /// Every candidate with its distance, radius or not.
    Enumerate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult<Id> {
    Count(usize),
    Entries(Vec<MatchEntry<Id>>),
}

// ---------------------------------------------------------------------------
// Candidate sources
// ---------------------------------------------------------------------------

/// Anything that can hand out candidates, optionally pre-filtered by an envelope.
///
/// Implementations must return candidates in a stable order (the same order
/// on every call for unchanged data) and must not drop anything the envelope
/// contains. Box filtering is inclusive on all four edges.
pub trait CandidateSource {
    type Id: Clone;

    fn scan(&self, envelope: &Envelope) -> Vec<Candidate<Self::Id>>;
}

impl<Id: Clone> CandidateSource for [Candidate<Id>] {
    type Id = Id;

    fn scan(&self, envelope: &Envelope) -> Vec<Candidate<Id>> {
        self.iter()
            .filter(|c| envelope.contains(c.point))
            .cloned()
            .collect()
    }
}

impl<Id: Clone> CandidateSource for Vec<Candidate<Id>> {
    type Id = Id;

    fn scan(&self, envelope: &Envelope) -> Vec<Candidate<Id>> {
        self.as_slice().scan(envelope)
    }
}

// ---------------------------------------------------------------------------
// Query modes
// ---------------------------------------------------------------------------

/// Count mode: box-reduce the source, then count exact matches.
pub fn count_within<S>(source: &S, query: &RadiusQuery) -> usize
where
    S: CandidateSource + ?Sized,
{
    let envelope = query.envelope();
    let candidates = source.scan(&envelope);
    let radius = query.radius.as_miles();

    let matched = candidates
        .iter()
        .filter(|c| is_within_radius(distance_miles(query.center, c.point), radius))
        .count();

    debug!(
        center = %query.center,
        radius = %query.radius,
        unbounded = envelope.is_unbounded(),
        scanned = candidates.len(),
        matched,
        "Counted candidates within radius"
    );
    matched
}

/// Enumerate mode: every candidate in source order with its distance.
///
/// Not box-reduced: the result covers the whole source, inside the radius
/// or not.
pub fn enumerate<S>(source: &S, query: &RadiusQuery) -> Vec<MatchEntry<S::Id>>
where
    S: CandidateSource + ?Sized,
{
    let entries: Vec<_> = source
        .scan(&Envelope::Unbounded)
        .into_iter()
        .map(|c| MatchEntry {
            distance_miles: distance_miles(query.center, c.point),
            id: c.id,
        })
        .collect();

    debug!(center = %query.center, total = entries.len(), "Enumerated candidate distances");
    entries
}

pub fn evaluate<S>(source: &S, query: &RadiusQuery, mode: QueryMode) -> MatchResult<S::Id>
where
    S: CandidateSource + ?Sized,
{
    match mode {
        QueryMode::Count => MatchResult::Count(count_within(source, query)),
        QueryMode::Enumerate => MatchResult::Entries(enumerate(source, query)),
    }
}

/// Sort entries nearest first. Stable, so equal distances keep source order.
pub fn rank_by_distance<Id>(mut entries: Vec<MatchEntry<Id>>) -> Vec<MatchEntry<Id>> {
    entries.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    entries
}
