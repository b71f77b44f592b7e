//! Route assignment engine.
//!
//! Greedy partition of passengers across a capacity-constrained fleet.
//! Each vehicle optionally pre-seats the nearest unassigned companion, is
//! seeded with the passenger farthest from the depot, then filled
//! nearest-neighbor from its rolling position. Leftover passengers are
//! spread round-robin over the fleet's remembered capacity counters,
//! spilling onto synthesized vehicles once every counter is exhausted.

use crate::haversine::distance_km;
use crate::model::{Companion, Coordinate, Depot, Passenger, Route, Stop, Vehicle};

#[derive(Debug, Clone)]
pub struct AssignOptions {
    /// Maximum passenger stops per vehicle. Companions do not count.
    pub capacity: usize,
}

/// Monotonic id source for synthesized vehicles.
#[derive(Debug, Clone, Default)]
pub struct VehicleIdAllocator {
    next: u32,
}

impl VehicleIdAllocator {
    pub fn new(next: u32) -> Self {
        Self { next }
    }

    /// Seeds the allocator past the highest id already in the fleet, so
    /// synthesized ids never collide with caller-supplied ones.
    pub fn starting_after(vehicles: &[Vehicle]) -> Self {
        let next = vehicles.iter().map(|vehicle| vehicle.id + 1).max().unwrap_or(0);
        Self { next }
    }

    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Number of vehicles needed to seat `passenger_count` passengers.
pub fn required_vehicle_count(passenger_count: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    passenger_count.div_ceil(capacity)
}

/// Appends synthesized vehicles until the fleet can seat every passenger.
///
/// Existing vehicles are never removed or renumbered, and growth is a
/// top-up: a fleet already at or above the required size is left alone.
pub fn grow_fleet(
    vehicles: &mut Vec<Vehicle>,
    passenger_count: usize,
    capacity: usize,
    ids: &mut VehicleIdAllocator,
) {
    let required = required_vehicle_count(passenger_count, capacity);
    while vehicles.len() < required {
        vehicles.push(Vehicle::synthesized(ids.allocate()));
    }
}

/// Rolling per-vehicle assignment state.
#[derive(Debug, Clone)]
struct VehicleState {
    remaining_capacity: usize,
    position: Coordinate,
}

/// Partitions passengers into one route per vehicle.
///
/// Vehicles that receive a companion get their seat coordinate updated to
/// the companion's coordinate. If the fleet runs out of capacity before the
/// passenger pool empties, fresh vehicles are synthesized (and appended to
/// `vehicles`) so the capacity bound holds on every route.
///
/// A zero capacity assigns nothing and returns one empty route per vehicle.
pub fn assign_routes(
    depot: &Depot,
    vehicles: &mut Vec<Vehicle>,
    passengers: &[Passenger],
    companions: &[Companion],
    ids: &mut VehicleIdAllocator,
    options: &AssignOptions,
) -> Vec<Route> {
    let mut routes: Vec<Route> = vehicles.iter().map(|vehicle| Route::new(vehicle.id)).collect();
    if options.capacity == 0 {
        return routes;
    }

    let mut pool: Vec<Passenger> = passengers.to_vec();
    let mut companion_pool: Vec<Companion> = companions.to_vec();
    let mut states: Vec<VehicleState> = vehicles
        .iter()
        .map(|_| VehicleState {
            remaining_capacity: options.capacity,
            position: depot.coordinate,
        })
        .collect();

    for (index, vehicle) in vehicles.iter_mut().enumerate() {
        if pool.is_empty() {
            break;
        }
        let state = &mut states[index];
        let route = &mut routes[index];

        if let Some(slot) = nearest_companion(state.position, &companion_pool) {
            let companion = companion_pool.remove(slot);
            state.position = companion.coordinate;
            vehicle.seat = Some(companion.coordinate);
            route.stops.push(Stop::Companion(companion));
        }

        // Seed with the passenger farthest from the depot, not from the
        // vehicle's current position.
        if state.remaining_capacity > 0 {
            if let Some(slot) = farthest_passenger(depot.coordinate, &pool) {
                take_passenger(slot, &mut pool, state, route);
            }
        }

        while state.remaining_capacity > 0 {
            match nearest_passenger(state.position, &pool) {
                Some(slot) => take_passenger(slot, &mut pool, state, route),
                None => break,
            }
        }
    }

    if !pool.is_empty() {
        overflow(depot, vehicles, &mut routes, &mut states, &mut pool, ids, options);
    }

    routes
}

fn take_passenger(
    slot: usize,
    pool: &mut Vec<Passenger>,
    state: &mut VehicleState,
    route: &mut Route,
) {
    let passenger = pool.remove(slot);
    state.position = passenger.coordinate;
    state.remaining_capacity -= 1;
    route.stops.push(Stop::Passenger(passenger));
}

/// Round-robin distribution of leftover passengers.
///
/// Each vehicle is filled from its last known position while its remembered
/// capacity counter is positive. Once every counter hits zero a fresh
/// vehicle is synthesized at the depot and the cycle continues.
fn overflow(
    depot: &Depot,
    vehicles: &mut Vec<Vehicle>,
    routes: &mut Vec<Route>,
    states: &mut Vec<VehicleState>,
    pool: &mut Vec<Passenger>,
    ids: &mut VehicleIdAllocator,
    options: &AssignOptions,
) {
    let mut index = 0;
    while !pool.is_empty() {
        if states.iter().all(|state| state.remaining_capacity == 0) {
            let vehicle = Vehicle::synthesized(ids.allocate());
            routes.push(Route::new(vehicle.id));
            states.push(VehicleState {
                remaining_capacity: options.capacity,
                position: depot.coordinate,
            });
            vehicles.push(vehicle);
            index = routes.len() - 1;
        }

        let state = &mut states[index];
        while state.remaining_capacity > 0 {
            match nearest_passenger(state.position, pool) {
                Some(slot) => take_passenger(slot, pool, state, &mut routes[index]),
                None => break,
            }
        }
        index = (index + 1) % routes.len();
    }
}

/// Index of the pool entry nearest `from`. Ties keep the earliest candidate.
fn nearest_slot<T>(from: Coordinate, pool: &[T], location: impl Fn(&T) -> Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (slot, item) in pool.iter().enumerate() {
        let dist = distance_km(from, location(item));
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((slot, dist)),
        }
    }
    best.map(|(slot, _)| slot)
}

/// Index of the pool entry farthest from `from`. Ties keep the earliest
/// candidate.
fn farthest_slot<T>(from: Coordinate, pool: &[T], location: impl Fn(&T) -> Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (slot, item) in pool.iter().enumerate() {
        let dist = distance_km(from, location(item));
        match best {
            Some((_, best_dist)) if dist <= best_dist => {}
            _ => best = Some((slot, dist)),
        }
    }
    best.map(|(slot, _)| slot)
}

fn nearest_passenger(from: Coordinate, pool: &[Passenger]) -> Option<usize> {
    nearest_slot(from, pool, |passenger| passenger.coordinate)
}

fn farthest_passenger(from: Coordinate, pool: &[Passenger]) -> Option<usize> {
    farthest_slot(from, pool, |passenger| passenger.coordinate)
}

fn nearest_companion(from: Coordinate, pool: &[Companion]) -> Option<usize> {
    nearest_slot(from, pool, |companion| companion.coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(id: u32, lat: f64, lng: f64) -> Passenger {
        Passenger::new(id, format!("p{}", id), Coordinate::new(lat, lng))
    }

    #[test]
    fn test_nearest_empty_pool_is_none() {
        let pool: Vec<Passenger> = Vec::new();
        assert_eq!(nearest_passenger(Coordinate::new(0.0, 0.0), &pool), None);
    }

    #[test]
    fn test_nearest_picks_closer() {
        let pool = vec![passenger(1, 0.0, 5.0), passenger(2, 0.0, 1.0)];
        assert_eq!(nearest_passenger(Coordinate::new(0.0, 0.0), &pool), Some(1));
    }

    #[test]
    fn test_farthest_picks_farther() {
        let pool = vec![passenger(1, 0.0, 5.0), passenger(2, 0.0, 1.0)];
        assert_eq!(farthest_passenger(Coordinate::new(0.0, 0.0), &pool), Some(0));
    }

    #[test]
    fn test_ties_keep_earliest() {
        // (0, 1) and (1, 0) are the same haversine distance from the origin.
        let pool = vec![passenger(1, 0.0, 1.0), passenger(2, 1.0, 0.0)];
        assert_eq!(nearest_passenger(Coordinate::new(0.0, 0.0), &pool), Some(0));
        assert_eq!(farthest_passenger(Coordinate::new(0.0, 0.0), &pool), Some(0));
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = VehicleIdAllocator::new(5);
        assert_eq!(ids.allocate(), 5);
        assert_eq!(ids.allocate(), 6);
        assert_eq!(ids.allocate(), 7);
    }

    #[test]
    fn test_allocator_starts_past_existing_ids() {
        let vehicles = vec![Vehicle::synthesized(7), Vehicle::synthesized(3)];
        let mut ids = VehicleIdAllocator::starting_after(&vehicles);
        assert_eq!(ids.allocate(), 8);
    }

    #[test]
    fn test_allocator_for_empty_fleet() {
        let mut ids = VehicleIdAllocator::starting_after(&[]);
        assert_eq!(ids.allocate(), 0);
    }
}
