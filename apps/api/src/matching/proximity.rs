//! Proximity ranking over raw latitude/longitude.
//!
//! Distance is the squared Euclidean distance in degrees. No great-circle
//! correction: only meaningful for comparing points within a small local
//! area, which is how it is used.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate only when both parts are present and finite.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Coordinate { lat, lon })
            }
            _ => None,
        }
    }

    pub fn squared_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<Id> {
    pub id: Id,
    pub distance: f64,
}

/// Ranked candidates plus the number dropped for lacking a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidates<Id> {
    pub ranked: Vec<Ranked<Id>>,
    pub excluded: usize,
}

/// Orders candidates by ascending squared distance to `origin`.
/// Equal distances keep input order. Candidates without a coordinate are
/// left out of `ranked` and counted in `excluded`.
pub fn rank<Id, I>(origin: Coordinate, candidates: I) -> RankedCandidates<Id>
where
    I: IntoIterator<Item = (Id, Option<Coordinate>)>,
{
    let mut excluded = 0;
    let mut ranked: Vec<Ranked<Id>> = candidates
        .into_iter()
        .filter_map(|(id, coordinate)| match coordinate {
            Some(c) => Some(Ranked {
                id,
                distance: origin.squared_distance(&c),
            }),
            None => {
                excluded += 1;
                None
            }
        })
        .collect();

    // slice::sort_by is stable
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    RankedCandidates { ranked, excluded }
}
