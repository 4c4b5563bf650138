//! Minimal GPX 1.1 writer: one track, one segment, one `<trkpt>` per point.

use crate::constants::{GPX_CREATOR, GPX_NAMESPACE};
use crate::models::{Coordinates, Route};

/// Render `points` as a GPX 1.1 document.
///
/// Total over any input, including an empty slice. Coordinates are written
/// with the shortest decimal form that parses back to the same `f64`.
pub fn serialize(points: &[Coordinates]) -> String {
    // ~40 bytes per trkpt line plus ~170 bytes of fixed markup
    let mut gpx = String::with_capacity(192 + points.len() * 48);

    gpx.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    gpx.push_str(&format!(
        "<gpx version=\"1.1\" creator=\"{}\" xmlns=\"{}\">\n",
        GPX_CREATOR, GPX_NAMESPACE
    ));
    gpx.push_str("<trk>\n<trkseg>\n");
    for point in points {
        gpx.push_str(&format!(
            "<trkpt lat=\"{}\" lon=\"{}\"/>\n",
            point.lat, point.lng
        ));
    }
    gpx.push_str("</trkseg>\n</trk>\n</gpx>\n");

    gpx
}

pub fn serialize_route(route: &Route) -> String {
    serialize(&route.points)
}
