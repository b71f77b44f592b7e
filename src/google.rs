//! Google Directions HTTP adapter.

use serde::Deserialize;

use crate::directions::{Directions, DirectionsError, RouteLeg, RouteRequest};
use crate::model::Coordinate;
use crate::polyline::Polyline;
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct GoogleDirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GoogleDirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    config: GoogleDirectionsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleDirectionsClient {
    pub fn new(config: GoogleDirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DirectionsProvider for GoogleDirectionsClient {
    fn route(&self, request: &RouteRequest) -> Result<Directions, DirectionsError> {
        let waypoints = request
            .waypoints
            .iter()
            .map(coordinate_param)
            .collect::<Vec<_>>()
            .join("|");
        let waypoints = if request.optimize_waypoints {
            format!("optimize:true|{}", waypoints)
        } else {
            waypoints
        };

        let url = format!("{}/maps/api/directions/json", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("origin", coordinate_param(&request.origin)),
                ("destination", coordinate_param(&request.destination)),
                ("waypoints", waypoints),
                ("mode", request.travel_mode.as_str().to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        if response.status != "OK" {
            return Err(DirectionsError::Status(response.status));
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoRoutes)?;

        let legs = route
            .legs
            .iter()
            .map(|leg| RouteLeg {
                distance_m: leg.distance.as_ref().map(|metric| metric.value),
                duration_s: leg.duration.as_ref().map(|metric| metric.value),
            })
            .collect();

        // A malformed or absent geometry degrades to an empty path; the leg
        // metrics are still usable.
        let path = route
            .overview_polyline
            .and_then(|polyline| Polyline::decode(&polyline.points))
            .unwrap_or_default();

        Ok(Directions {
            legs,
            path,
            waypoint_order: route.waypoint_order,
        })
    }
}

fn coordinate_param(coordinate: &Coordinate) -> String {
    format!("{:.6},{:.6}", coordinate.lat, coordinate.lng)
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    overview_polyline: Option<ApiPolyline>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: Option<ApiMetric>,
    duration: Option<ApiMetric>,
}

#[derive(Debug, Deserialize)]
struct ApiMetric {
    value: u32,
}

#[derive(Debug, Deserialize)]
struct ApiPolyline {
    points: String,
}
