//! Request and response types for the directions seam.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;
use crate::polyline::Polyline;

/// Travel mode requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// A routed-path request: depot to depot through the stop waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
    /// Let the provider reorder waypoints; the requested order is a hint.
    pub optimize_waypoints: bool,
    pub travel_mode: TravelMode,
}

/// One leg of a routed path. Providers may omit either metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Leg distance in meters.
    pub distance_m: Option<u32>,
    /// Leg duration in seconds.
    pub duration_s: Option<u32>,
}

/// A routed path as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub legs: Vec<RouteLeg>,
    pub path: Polyline,
    /// Waypoint visit order chosen by the provider, indexing into the
    /// requested waypoint list.
    pub waypoint_order: Vec<usize>,
}

impl Directions {
    /// Total distance in meters; a missing leg metric counts as zero.
    pub fn total_distance_m(&self) -> u32 {
        self.legs.iter().map(|leg| leg.distance_m.unwrap_or(0)).sum()
    }

    /// Total duration in seconds; a missing leg metric counts as zero.
    pub fn total_duration_s(&self) -> u32 {
        self.legs.iter().map(|leg| leg.duration_s.unwrap_or(0)).sum()
    }
}

/// Failure modes of a directions request.
#[derive(Debug)]
pub enum DirectionsError {
    /// Transport-level failure.
    Http(reqwest::Error),
    /// Provider answered with a non-OK status.
    Status(String),
    /// Provider answered OK but returned no routes.
    NoRoutes,
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(err) => write!(f, "http error: {}", err),
            DirectionsError::Status(status) => {
                write!(f, "directions request failed with status {}", status)
            }
            DirectionsError::NoRoutes => write!(f, "directions response contained no routes"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_sum_legs() {
        let directions = Directions {
            legs: vec![
                RouteLeg {
                    distance_m: Some(1500),
                    duration_s: Some(300),
                },
                RouteLeg {
                    distance_m: Some(2500),
                    duration_s: Some(450),
                },
            ],
            path: Polyline::default(),
            waypoint_order: vec![0, 1],
        };
        assert_eq!(directions.total_distance_m(), 4000);
        assert_eq!(directions.total_duration_s(), 750);
    }

    #[test]
    fn test_missing_leg_metric_counts_as_zero() {
        let directions = Directions {
            legs: vec![
                RouteLeg {
                    distance_m: None,
                    duration_s: Some(120),
                },
                RouteLeg {
                    distance_m: Some(900),
                    duration_s: None,
                },
            ],
            path: Polyline::default(),
            waypoint_order: Vec::new(),
        };
        assert_eq!(directions.total_distance_m(), 900);
        assert_eq!(directions.total_duration_s(), 120);
    }

    #[test]
    fn test_empty_legs_total_zero() {
        let directions = Directions {
            legs: Vec::new(),
            path: Polyline::default(),
            waypoint_order: Vec::new(),
        };
        assert_eq!(directions.total_distance_m(), 0);
        assert_eq!(directions.total_duration_s(), 0);
    }
}
