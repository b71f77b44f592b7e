//! Domain types for the pickup planner.

use serde::{Deserialize, Serialize};

/// A WGS-84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A student to be picked up.
///
/// Identity is the `id`: two passengers may share a coordinate without being
/// the same passenger, so pool bookkeeping must never filter by location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: u32,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Passenger {
    pub fn new(id: u32, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

/// An assistant seated on a vehicle before passenger pickup begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub id: u32,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Companion {
    pub fn new(id: u32, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

/// A fleet vehicle.
///
/// The seat coordinate is filled in during assignment when a companion is
/// placed on the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub name: Option<String>,
    pub seat: Option<Coordinate>,
}

impl Vehicle {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            seat: None,
        }
    }

    /// An unnamed vehicle added by fleet growth or overflow spill.
    pub fn synthesized(id: u32) -> Self {
        Self {
            id,
            name: None,
            seat: None,
        }
    }
}

/// The shared origin and destination of every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub id: u32,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Depot {
    pub fn new(id: u32, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

/// A single stop on a route.
///
/// A companion stop is always first in its route and never counts against
/// passenger capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stop {
    Passenger(Passenger),
    Companion(Companion),
}

impl Stop {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Stop::Passenger(passenger) => passenger.coordinate,
            Stop::Companion(companion) => companion.coordinate,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Stop::Passenger(passenger) => &passenger.name,
            Stop::Companion(companion) => &companion.name,
        }
    }

    pub fn is_passenger(&self) -> bool {
        matches!(self, Stop::Passenger(_))
    }
}

/// Ordered stops for one vehicle, in greedy selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub vehicle_id: u32,
    pub stops: Vec<Stop>,
}

impl Route {
    pub fn new(vehicle_id: u32) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
        }
    }

    /// Passenger stops only; companions are excluded.
    pub fn passenger_count(&self) -> usize {
        self.stops.iter().filter(|stop| stop.is_passenger()).count()
    }

    /// Stop coordinates in pickup order, for the directions request.
    pub fn waypoints(&self) -> Vec<Coordinate> {
        self.stops.iter().map(Stop::coordinate).collect()
    }
}
