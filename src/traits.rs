//! Collaborator seams for the pickup planner.
//!
//! The planner core only decides stop order. Road routing, persistence,
//! and map drawing are external services behind these traits; concrete
//! apps plug in their own implementations.

use crate::directions::{Directions, DirectionsError, RouteRequest};
use crate::model::Coordinate;
use crate::polyline::Polyline;

/// Turns a finished stop order into a routed path with per-leg metrics.
///
/// The waypoint order in the request is a hint: providers are free to
/// reorder stops and report the order they chose.
pub trait DirectionsProvider {
    fn route(&self, request: &RouteRequest) -> Result<Directions, DirectionsError>;
}

/// Write-only key-value persistence for computed route orders.
///
/// The planner never reads these entries back.
pub trait RouteStore {
    fn put(&mut self, key: &str, value: String);
}

/// Marker icon shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Depot,
    Passenger,
    Companion,
}

/// A labeled point drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub icon: MarkerIcon,
}

/// The visual canvas: marker placement and route path display.
pub trait MapCanvas {
    /// Establishes the canvas centered on `center` at `zoom`.
    fn init(&mut self, center: Coordinate, zoom: i32);

    fn place_marker(&mut self, marker: Marker);

    /// Renders the path for the vehicle at `index` in the given stroke color.
    fn attach_path(&mut self, index: usize, path: &Polyline, color: &str);

    /// Hides the path for the vehicle at `index`, if one is rendered.
    fn detach_path(&mut self, index: usize);
}
