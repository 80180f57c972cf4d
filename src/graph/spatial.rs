use super::model::{Coordinate, NodeId};
use super::network::NavigationGraph;
use crate::algorithm;
use log::debug;
use rtree_rs::{RTree, Rect};

/// Slack on the search box so points right at the radius are not cut off.
const BOX_MARGIN: f64 = 1.1;

/// R-tree over node positions, for picking the node under a map position.
pub struct NodeLocator {
    ids: Vec<NodeId>,
    coords: Vec<Coordinate>,
    rtree: RTree<2, f64, usize>,
}

impl NodeLocator {
    pub fn new(graph: &NavigationGraph) -> Self {
        let mut locator = NodeLocator {
            ids: Vec::with_capacity(graph.node_count()),
            coords: Vec::with_capacity(graph.node_count()),
            rtree: RTree::new(),
        };
        for id in graph.sorted_node_ids() {
            if let Some(c) = graph.coordinate(id) {
                let pos = [c.longitude, c.latitude];
                locator.rtree.insert(Rect::new(pos, pos), locator.ids.len());
                locator.ids.push(id.clone());
                locator.coords.push(c);
            }
        }
        debug!("build node rtree success, {} nodes", locator.ids.len());
        locator
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Nearest node within `radius` meters of `at`, with its distance.
    /// Equal distances resolve to the node that sorts first.
    pub fn nearest(&self, at: Coordinate, radius: f64) -> Option<(NodeId, f64)> {
        if radius.is_nan() || radius < 0.0 {
            return None;
        }
        let d_lat = (radius * BOX_MARGIN / algorithm::EARTH_RADIUS).to_degrees();
        // 经度方向的度数随纬度变化
        let cos_lat = at.latitude.to_radians().cos().abs().max(1e-6);
        let d_lon = (d_lat / cos_lat).min(360.0);
        let (west, east) = (at.longitude - d_lon, at.longitude + d_lon);

        // 跨越 ±180° 时在另一侧再查一次
        let mut spans = vec![(west, east)];
        if west < -180.0 {
            spans.push((west + 360.0, east + 360.0));
        }
        if east > 180.0 {
            spans.push((west - 360.0, east - 360.0));
        }

        let mut best: Option<(usize, f64)> = None;
        for (w, e) in spans {
            let bbox = Rect::new([w, at.latitude - d_lat], [e, at.latitude + d_lat]);
            for item in self.rtree.search(bbox) {
                let index = *item.data;
                let d = algorithm::distance(at, self.coords[index]);
                if d > radius {
                    continue;
                }
                best = match best {
                    Some((b, bd)) if bd < d || (bd == d && b <= index) => Some((b, bd)),
                    _ => Some((index, d)),
                };
            }
        }
        best.map(|(index, d)| (self.ids[index].clone(), d))
    }
}
