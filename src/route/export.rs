use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use wkt::ToWkt;

use super::query::Route;
use crate::graph::NavigationGraph;

/// Route as a GeoJSON `LineString` feature, positions in `[lon, lat]`.
pub fn to_geojson_feature(route: &Route, graph: &NavigationGraph) -> Feature {
    let positions: Vec<Vec<f64>> = route
        .coordinates(graph)
        .into_iter()
        .map(|c| c.to_position())
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("origin".to_string(), JsonValue::from(route.origin.name.clone()));
    properties.insert(
        "destination".to_string(),
        JsonValue::from(route.destination.name.clone()),
    );
    properties.insert("distance_m".to_string(), JsonValue::from(route.total_distance));
    properties.insert("nodes".to_string(), JsonValue::from(route.path.clone()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(positions))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Route as a WKT `LINESTRING`, `lon lat` order.
pub fn to_wkt(route: &Route, graph: &NavigationGraph) -> String {
    let line: geo::LineString<f64> = route
        .coordinates(graph)
        .into_iter()
        .map(geo::Point::from)
        .collect();
    line.wkt_string()
}
