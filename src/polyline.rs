//! Polyline representation for route geometries.
//!
//! Routes are held as decoded coordinate sequences for internal processing.
//! The compact encoded format only appears at the provider boundary, where
//! [`Polyline::decode`] unpacks it.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// A route geometry as a decoded coordinate sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Decodes the encoded-polyline format (5 decimal places per axis).
    ///
    /// Returns `None` on malformed input: a truncated value or a byte
    /// outside the encoding alphabet.
    pub fn decode(encoded: &str) -> Option<Self> {
        let mut bytes = encoded.bytes().peekable();
        let mut points = Vec::new();
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;

        while bytes.peek().is_some() {
            lat += decode_value(&mut bytes)?;
            lng += decode_value(&mut bytes)?;
            points.push(Coordinate::new(lat as f64 * 1e-5, lng as f64 * 1e-5));
        }

        Some(Self { points })
    }
}

/// Reads one zigzag-encoded value from a base-64-offset byte stream.
fn decode_value(bytes: &mut impl Iterator<Item = u8>) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let chunk = i64::from(bytes.next()?) - 63;
        if !(0..=0x3f).contains(&chunk) || shift > 30 {
            return None;
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
