pub mod dijkstra;
pub mod export;
pub mod query;

pub use dijkstra::{shortest_path, shortest_path_with, PathResult, SearchMode};
pub use export::{to_geojson_feature, to_wkt};
pub use query::{find_route, Endpoint, Route, RouteOutcome};

// test
#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::distance;
    use crate::graph::{
        Connection, Coordinate, MapData, MapNode, NavigationGraph, PointOfInterest, RouteGraph,
        TravelType,
    };
    use std::collections::HashMap;

    fn square() -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        for (id, lat, lon) in [
            ("A", 0.0, 0.0),
            ("B", 0.0, 1.0),
            ("C", 1.0, 1.0),
            ("D", 1.0, 0.0),
            ("E", 5.0, 5.0),
        ] {
            graph.add_node(id.to_string(), Coordinate::new(lat, lon));
        }
        for (a, b) in [("A", "B"), ("B", "C"), ("A", "D"), ("D", "C")] {
            graph.add_edge(a, b, TravelType::Walk).unwrap();
        }
        for (id, node, name) in [("0", "A", "Library"), ("1", "C", "Gym"), ("2", "E", "Island")] {
            graph.add_poi(PointOfInterest {
                id: id.to_string(),
                node_id: node.to_string(),
                name: name.to_string(),
                tags: HashMap::new(),
            });
        }
        graph
    }

    fn coord(graph: &NavigationGraph, id: &str) -> Coordinate {
        graph.coordinate(id).unwrap()
    }

    #[test]
    fn test_shortest_path_picks_lighter_branch() {
        let graph = square();
        let via_b = distance(coord(&graph, "A"), coord(&graph, "B"))
            + distance(coord(&graph, "B"), coord(&graph, "C"));
        let via_d = distance(coord(&graph, "A"), coord(&graph, "D"))
            + distance(coord(&graph, "D"), coord(&graph, "C"));
        assert!(via_d < via_b);

        let result = shortest_path(&graph, "A", "C");
        assert!(result.is_valid());
        assert_eq!(result.path, vec!["A", "D", "C"]);
        assert!((result.total_distance - via_d).abs() <= 1e-6 * via_d);
        assert_eq!(result.start().unwrap(), "A");
        assert_eq!(result.destination().unwrap(), "C");
    }

    #[test]
    fn test_unreachable_destination() {
        let graph = square();
        let result = shortest_path(&graph, "A", "E");
        assert_eq!(result.path, vec!["E"]);
        assert!(!result.is_valid());
        assert_eq!(result.total_distance, 0.0);

        // edges are directed
        let back = shortest_path(&graph, "C", "A");
        assert_eq!(back.path, vec!["A"]);
    }

    #[test]
    fn test_unknown_start_and_same_node() {
        let graph = square();
        assert_eq!(shortest_path(&graph, "Z", "C").path, vec!["C"]);
        assert!(!shortest_path(&graph, "A", "A").is_valid());
    }

    fn ring() -> NavigationGraph {
        // six nodes, two cycles sharing the 2-3 edge, plus a chord
        let nodes = [
            (22.600, 113.990),
            (22.601, 113.991),
            (22.603, 113.991),
            (22.603, 113.994),
            (22.601, 113.996),
            (22.599, 113.993),
        ];
        let data = MapData {
            nodes: nodes
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| MapNode {
                    id: i.to_string(),
                    lat: *lat,
                    lon: *lon,
                })
                .collect(),
            connections: [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 5), (2, 4)]
                .iter()
                .map(|(a, b)| Connection {
                    node1: a.to_string(),
                    node2: b.to_string(),
                    directional: *a == 2 && *b == 4,
                    travel_type: TravelType::Walk,
                })
                .collect(),
            pois: vec![],
        };
        NavigationGraph::from_map_data(data).0
    }

    #[test]
    fn test_early_exit_matches_exhaustive() {
        let graph = ring();
        let reference = RouteGraph::new(&graph);
        for from in 0..6 {
            let from = from.to_string();
            let all = reference.distances_from(&from).unwrap();
            for to in 0..6 {
                let to = to.to_string();
                let early = shortest_path_with(&graph, &from, &to, SearchMode::EarlyExit);
                let full = shortest_path_with(&graph, &from, &to, SearchMode::Exhaustive);
                assert_eq!(early, full);
                if from != to {
                    assert!(early.is_valid());
                    let expected = all[&to];
                    assert!((early.total_distance - expected).abs() <= 1e-6 * expected);
                }
            }
        }
    }

    #[test]
    fn test_find_route_by_name() {
        let graph = square();
        let outcome = find_route(&graph, "Library", "Gym");
        let route = outcome.route().unwrap();
        assert_eq!(route.path.first().unwrap(), "A");
        assert_eq!(route.path.last().unwrap(), "C");
        assert!(route.total_distance > 0.0);
        assert_eq!(route.origin.name, "Library");
        assert_eq!(route.coordinates(&graph).len(), 3);
        assert!(outcome.reason().is_none());
    }

    #[test]
    fn test_find_route_failures() {
        let graph = square();
        let outcome = find_route(&graph, "Library", "Nowhere");
        assert_eq!(
            outcome,
            RouteOutcome::NameNotFound {
                endpoint: Endpoint::Destination,
                name: "Nowhere".to_string(),
            }
        );
        assert_eq!(outcome.reason().unwrap(), "cannot find place: Nowhere");

        assert!(matches!(
            find_route(&graph, "Nowhere", "Also nowhere"),
            RouteOutcome::NameNotFound {
                endpoint: Endpoint::Origin,
                ..
            }
        ));

        let outcome = find_route(&graph, "Library", "Island");
        assert_eq!(
            outcome,
            RouteOutcome::NoPathExists {
                origin: "Library".to_string(),
                destination: "Island".to_string(),
            }
        );
        assert!(!outcome.is_found());
        assert_eq!(
            outcome.to_string(),
            "cannot create a route from Library to Island"
        );
    }

    #[test]
    fn test_poi_on_missing_node_is_unroutable() {
        let mut graph = square();
        let diagnostic = graph.add_poi(PointOfInterest {
            id: "3".to_string(),
            node_id: "9".to_string(),
            name: "Ghost".to_string(),
            tags: HashMap::new(),
        });
        assert!(diagnostic.is_some());
        assert!(graph.find_poi("Ghost").is_some());

        assert_eq!(
            find_route(&graph, "Library", "Ghost"),
            RouteOutcome::NoPathExists {
                origin: "Library".to_string(),
                destination: "Ghost".to_string(),
            }
        );
        assert_eq!(
            find_route(&graph, "Ghost", "Library"),
            RouteOutcome::NoPathExists {
                origin: "Ghost".to_string(),
                destination: "Library".to_string(),
            }
        );
        assert!(!shortest_path(&graph, "9", "A").is_valid());
    }

    #[test]
    fn test_route_export() {
        let graph = square();
        let outcome = find_route(&graph, "Library", "Gym");
        let route = outcome.route().unwrap();

        let feature = to_geojson_feature(route, &graph);
        match &feature.geometry.as_ref().unwrap().value {
            geojson::Value::LineString(line) => {
                assert_eq!(line.len(), 3);
                assert_eq!(line[0], vec![0.0, 0.0]);
                assert_eq!(line[1], vec![0.0, 1.0]);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
        let props = feature.properties.as_ref().unwrap();
        assert_eq!(props["origin"], "Library");
        assert_eq!(props["destination"], "Gym");

        let wkt = to_wkt(route, &graph);
        assert!(wkt.starts_with("LINESTRING"));
        assert!(wkt.contains("0 1"));
    }
}
