use crate::graph::Coordinate;

/// Mean earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// 计算两个坐标之间的半正弦(haversine)距离, 单位米
///
/// Inputs are degrees and are not validated.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS * c
}

/// 计算坐标序列的总长度
pub fn path_length(coords: &[Coordinate]) -> f64 {
    coords.windows(2).map(|w| distance(w[0], w[1])).sum()
}
