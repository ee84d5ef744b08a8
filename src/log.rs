//! The ordered placement history and its persisted form.
//!
//! The log is the single source of truth: the decorated cube at any time is
//! defined as "base images + replay of this sequence in order", nothing else.
//! It grows by append, shrinks only by pop-tail (undo) or clear, and is never
//! edited in the middle.

use crate::error::{CubestampError, CubestampResult};

/// One stamp application.
///
/// `stamp` and `face` stay raw integers so an imported log can carry
/// out-of-range values; they are validated at seed time, not here. u and v
/// are face-local and resolution independent; angle is radians in [0, 2π).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "PlacementTuple", into = "PlacementTuple")]
pub struct Placement {
    pub stamp: u32,
    pub face: u32,
    pub u: f64,
    pub v: f64,
    pub angle: f64,
}

/// The canonical persisted shape: `[stamp, face, u, v, angle]`.
type PlacementTuple = (u32, u32, f64, f64, f64);

impl From<PlacementTuple> for Placement {
    fn from((stamp, face, u, v, angle): PlacementTuple) -> Self {
        Self {
            stamp,
            face,
            u,
            v,
            angle,
        }
    }
}

impl From<Placement> for PlacementTuple {
    fn from(p: Placement) -> Self {
        (p.stamp, p.face, p.u, p.v, p.angle)
    }
}

/// Outcome of seeding from an imported array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Entries applied, in order.
    pub applied: usize,
    /// Input positions of entries skipped for out-of-range indices.
    pub skipped: Vec<usize>,
}

/// Ordered, mostly-append placement history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementLog {
    entries: Vec<Placement>,
}

impl PlacementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, placement: Placement) {
        self.entries.push(placement);
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<Placement> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full history in order; this slice is the canonical export.
    pub fn as_slice(&self) -> &[Placement] {
        &self.entries
    }

    /// Serialize as the flat array of 5-tuples.
    pub fn to_json(&self) -> CubestampResult<String> {
        serde_json::to_string(&self.entries)
            .map_err(|e| CubestampError::serde(format!("serialize placement log: {e}")))
    }

    /// Parse the flat array of 5-tuples. No range validation happens here;
    /// that is seed's job.
    pub fn parse_json(json: &str) -> CubestampResult<Vec<Placement>> {
        serde_json::from_str(json)
            .map_err(|e| CubestampError::serde(format!("parse placement log: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(stamp: u32, face: u32) -> Placement {
        Placement {
            stamp,
            face,
            u: 0.5,
            v: 0.25,
            angle: 1.0,
        }
    }

    #[test]
    fn push_pop_preserves_order() {
        let mut log = PlacementLog::new();
        log.push(p(0, 1));
        log.push(p(1, 2));
        log.push(p(2, 3));
        assert_eq!(log.len(), 3);
        assert_eq!(log.pop(), Some(p(2, 3)));
        assert_eq!(log.as_slice(), &[p(0, 1), p(1, 2)]);
    }

    #[test]
    fn pop_on_empty_is_none() {
        assert_eq!(PlacementLog::new().pop(), None);
    }

    #[test]
    fn serializes_as_flat_tuples() {
        let mut log = PlacementLog::new();
        log.push(Placement {
            stamp: 2,
            face: 4,
            u: 0.5,
            v: 0.25,
            angle: 0.0,
        });
        assert_eq!(log.to_json().unwrap(), "[[2,4,0.5,0.25,0.0]]");
    }

    #[test]
    fn json_round_trips_bit_identically() {
        let entries = vec![
            Placement {
                stamp: 0,
                face: 5,
                u: 0.123456789,
                v: 0.987654321,
                angle: 5.435,
            },
            p(3, 0),
        ];
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(PlacementLog::parse_json(&json).unwrap(), entries);
    }

    #[test]
    fn parse_accepts_out_of_range_indices() {
        let parsed = PlacementLog::parse_json("[[9,9,0.1,0.2,0.3]]").unwrap();
        assert_eq!(parsed[0].face, 9);
        assert_eq!(parsed[0].stamp, 9);
    }

    #[test]
    fn parse_rejects_malformed_tuples() {
        assert!(PlacementLog::parse_json("[[1,2,0.5]]").is_err());
        assert!(PlacementLog::parse_json("{}").is_err());
    }
}
