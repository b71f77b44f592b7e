//! Public planner wrapper.
//!
//! Thin orchestration over the assignment engine and the external
//! collaborators: configuration, marker setup, route computation with
//! persistence and directions fan-out, and exclusive route display.

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, error, info};

use crate::assign::{self, AssignOptions, VehicleIdAllocator};
use crate::directions::{Directions, RouteRequest, TravelMode};
use crate::model::{Companion, Depot, Passenger, Route, Vehicle};
use crate::store::{dropoff_key, route_key};
use crate::traits::{DirectionsProvider, MapCanvas, Marker, MarkerIcon, RouteStore};

/// Stroke colors cycled across vehicle routes.
const ROUTE_COLORS: [&str; 4] = ["#FF0000", "#00FF00", "#0000FF", "#FFFF00"];

/// Stroke color for the vehicle at `index`, cycling the palette.
pub fn color_for_vehicle(index: usize) -> &'static str {
    ROUTE_COLORS[index % ROUTE_COLORS.len()]
}

/// One full configuration load, supplied before any routing.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub depot: Depot,
    pub passengers: Vec<Passenger>,
    /// May be empty; the fleet is grown to seat every passenger.
    pub vehicles: Vec<Vehicle>,
    pub companions: Vec<Companion>,
    /// Passenger seats per vehicle; must be positive.
    pub capacity: usize,
    /// Display-only map zoom.
    pub zoom: i32,
}

#[derive(Debug)]
pub enum PlannerError {
    /// An operation ran before `configure`.
    NotConfigured,
    /// Capacity must be a positive integer.
    InvalidCapacity,
    /// Route query for a vehicle index outside the fleet.
    InvalidIndex { index: usize, fleet: usize },
    /// A persisted route entry failed to serialize.
    Serialize(serde_json::Error),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::NotConfigured => write!(f, "planner is not configured"),
            PlannerError::InvalidCapacity => write!(f, "vehicle capacity must be positive"),
            PlannerError::InvalidIndex { index, fleet } => {
                write!(f, "vehicle index {} out of range for fleet of {}", index, fleet)
            }
            PlannerError::Serialize(err) => write!(f, "failed to serialize route entry: {}", err),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialize(err)
    }
}

/// Aggregate metrics for one displayed route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Assigns passengers to vehicles and drives the map/persistence seams.
#[derive(Debug, Default)]
pub struct RoutePlanner {
    config: Option<PlannerConfig>,
    ids: VehicleIdAllocator,
    routes: Vec<Route>,
    directions: Vec<Option<Directions>>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration and grows the fleet to seat every passenger.
    ///
    /// Clears any previously computed routes. Growth is a top-up, so
    /// reloading the same configuration does not duplicate synthetic
    /// vehicles.
    pub fn configure(&mut self, mut config: PlannerConfig) -> Result<(), PlannerError> {
        if config.capacity == 0 {
            return Err(PlannerError::InvalidCapacity);
        }
        let mut ids = VehicleIdAllocator::starting_after(&config.vehicles);
        assign::grow_fleet(
            &mut config.vehicles,
            config.passengers.len(),
            config.capacity,
            &mut ids,
        );
        self.ids = ids;
        self.routes.clear();
        self.directions.clear();
        self.config = Some(config);
        Ok(())
    }

    /// The fleet as currently known, including synthesized vehicles.
    pub fn vehicles(&self) -> &[Vehicle] {
        self.config
            .as_ref()
            .map(|config| config.vehicles.as_slice())
            .unwrap_or(&[])
    }

    /// Computed routes, one per vehicle, in fleet order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Centers the canvas on the depot and places all markers.
    pub fn init_map(&self, canvas: &mut impl MapCanvas) -> Result<(), PlannerError> {
        let config = self.config.as_ref().ok_or(PlannerError::NotConfigured)?;
        canvas.init(config.depot.coordinate, config.zoom);

        canvas.place_marker(Marker {
            coordinate: config.depot.coordinate,
            label: config.depot.name.clone(),
            icon: MarkerIcon::Depot,
        });
        for passenger in &config.passengers {
            canvas.place_marker(Marker {
                coordinate: passenger.coordinate,
                label: format!("{} - S{}", passenger.name, passenger.id),
                icon: MarkerIcon::Passenger,
            });
        }
        for companion in &config.companions {
            canvas.place_marker(Marker {
                coordinate: companion.coordinate,
                label: format!("{} - A{}", companion.name, companion.id),
                icon: MarkerIcon::Companion,
            });
        }
        Ok(())
    }

    /// Assigns passengers to vehicles, persists the stop orders, and issues
    /// one directions request per non-empty route.
    ///
    /// The assignment phase completes before any request goes out. Requests
    /// for different vehicles are dispatched concurrently and complete in no
    /// particular order; a failed request is logged and only leaves its own
    /// vehicle without directions.
    pub fn compute_routes<D, S>(&mut self, provider: &D, store: &mut S) -> Result<(), PlannerError>
    where
        D: DirectionsProvider + Sync,
        S: RouteStore,
    {
        let config = self.config.as_mut().ok_or(PlannerError::NotConfigured)?;
        let options = AssignOptions {
            capacity: config.capacity,
        };
        self.routes = assign::assign_routes(
            &config.depot,
            &mut config.vehicles,
            &config.passengers,
            &config.companions,
            &mut self.ids,
            &options,
        );
        debug!(
            vehicles = config.vehicles.len(),
            routes = self.routes.len(),
            "assignment complete"
        );

        for (index, route) in self.routes.iter().enumerate() {
            let outbound = serde_json::to_string(&route.stops)?;
            let dropoff_stops: Vec<_> = route.stops.iter().rev().collect();
            let dropoff = serde_json::to_string(&dropoff_stops)?;
            store.put(&route_key(index + 1), outbound);
            store.put(&dropoff_key(index + 1), dropoff);
        }

        let depot = config.depot.coordinate;
        self.directions = self
            .routes
            .par_iter()
            .enumerate()
            .map(|(index, route)| {
                if route.stops.is_empty() {
                    return None;
                }
                let request = RouteRequest {
                    origin: depot,
                    destination: depot,
                    waypoints: route.waypoints(),
                    optimize_waypoints: true,
                    travel_mode: TravelMode::Driving,
                };
                match provider.route(&request) {
                    Ok(directions) => Some(directions),
                    Err(err) => {
                        error!(vehicle = index + 1, error = %err, "directions request failed");
                        None
                    }
                }
            })
            .collect();

        Ok(())
    }

    /// Exclusively displays the route of the vehicle at `index` (zero-based)
    /// and logs its aggregate distance and duration.
    ///
    /// Every other rendered path is detached first. Returns `None` when the
    /// vehicle's directions request failed or its route is empty; the
    /// selection still hides the other paths.
    pub fn show_route(
        &self,
        index: usize,
        canvas: &mut impl MapCanvas,
    ) -> Result<Option<RouteSummary>, PlannerError> {
        if index >= self.routes.len() {
            return Err(PlannerError::InvalidIndex {
                index,
                fleet: self.routes.len(),
            });
        }
        for other in 0..self.routes.len() {
            canvas.detach_path(other);
        }

        let directions = match self.directions.get(index).and_then(Option::as_ref) {
            Some(directions) => directions,
            None => return Ok(None),
        };

        canvas.attach_path(index, &directions.path, color_for_vehicle(index));
        let summary = RouteSummary {
            distance_km: f64::from(directions.total_distance_m()) / 1000.0,
            duration_min: f64::from(directions.total_duration_s()) / 60.0,
        };
        info!(
            driver = index + 1,
            "total distance {:.2} km, total duration {:.2} min",
            summary.distance_km,
            summary.duration_min
        );
        Ok(Some(summary))
    }
}
