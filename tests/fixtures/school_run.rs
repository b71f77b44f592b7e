//! A small school-run scenario around Henderson, NV.
//!
//! One school depot, a spread of student homes, and two assistants.

use pickup_planner::model::{Companion, Coordinate, Depot, Passenger};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const SCHOOL: Place = Place::new("Pinecrest Academy", 36.0397, -115.0498);

pub const HOMES: &[Place] = &[
    Place::new("Adam", 36.0512, -115.0671),
    Place::new("Bea", 36.0288, -115.0419),
    Place::new("Carlos", 36.0450, -115.0233),
    Place::new("Dina", 36.0159, -115.0587),
    Place::new("Ezra", 36.0604, -115.0405),
    Place::new("Fern", 36.0331, -115.0762),
    Place::new("Gus", 36.0223, -115.0150),
];

pub const ASSISTANTS: &[Place] = &[
    Place::new("Helen", 36.0421, -115.0533),
    Place::new("Ivan", 36.0260, -115.0301),
];

pub fn depot() -> Depot {
    Depot::new(0, SCHOOL.name, SCHOOL.coordinate())
}

pub fn passengers() -> Vec<Passenger> {
    HOMES
        .iter()
        .enumerate()
        .map(|(index, place)| Passenger::new(index as u32 + 1, place.name, place.coordinate()))
        .collect()
}

pub fn companions() -> Vec<Companion> {
    ASSISTANTS
        .iter()
        .enumerate()
        .map(|(index, place)| Companion::new(index as u32 + 1, place.name, place.coordinate()))
        .collect()
}
