//! Map overlay geometry for routes and for the full network. Output is
//! plain data (polylines, markers, fit bounds) in the same shape the line
//! geometry API uses, so any map frontend can draw it. Each call builds a
//! fresh overlay; the previous one is replaced wholesale, never diffed.

use serde::Serialize;

use crate::models::{LineColor, MetroLine, PathSegment, Stop};
use crate::network::{MAP_CENTER, MAP_DEFAULT_ZOOM};

/// Fallback for route segments whose color name is not in the line table.
pub const ROUTE_FALLBACK_COLOR: &str = "#e94560";

const ROUTE_LINE_WEIGHT: u32 = 6;
const ROUTE_LINE_OPACITY: f64 = 0.9;
const NETWORK_LINE_WEIGHT: u32 = 5;
const NETWORK_LINE_OPACITY: f64 = 0.8;

const ENDPOINT_MARKER_SIZE: u32 = 18;
const STOP_MARKER_SIZE: u32 = 12;
const NETWORK_MARKER_SIZE: u32 = 14;

const SOURCE_FILL: &str = "#00ff88";
const DESTINATION_FILL: &str = "#e94560";
const STOP_FILL: &str = "#ffffff";
const INTERCHANGE_FILL: &str = "#e94560";

/// Padding applied when fitting the viewport to the drawn path, in pixels.
const FIT_PADDING: [u32; 2] = [30, 30];

/// One colored polyline, coordinates as `[lat, lng]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePolyline {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Source,
    Destination,
    Intermediate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopMarker {
    pub name: String,
    pub position: [f64; 2],
    pub kind: MarkerKind,
    pub size: u32,
    pub fill: String,
    pub popup: String,
}

/// Bounding region over the drawn coordinates, for viewport fitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub padding: [u32; 2],
}

impl FitBounds {
    fn from_points(points: &[[f64; 2]]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = FitBounds {
            south: first[0],
            west: first[1],
            north: first[0],
            east: first[1],
            padding: FIT_PADDING,
        };
        for point in &points[1..] {
            bounds.south = bounds.south.min(point[0]);
            bounds.north = bounds.north.max(point[0]);
            bounds.west = bounds.west.min(point[1]);
            bounds.east = bounds.east.max(point[1]);
        }
        Some(bounds)
    }
}

/// Overlay for one booked route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub center: [f64; 2],
    pub zoom: u8,
    pub polylines: Vec<RoutePolyline>,
    pub markers: Vec<StopMarker>,
    /// `None` when no segment resolved to a known stop.
    pub fit: Option<FitBounds>,
}

fn segment_color(segment: &PathSegment) -> String {
    LineColor::from_name(&segment.route_color)
        .map(|c| c.hex().to_string())
        .unwrap_or_else(|| ROUTE_FALLBACK_COLOR.to_string())
}

fn route_marker(segment: &PathSegment, stop: &Stop, kind: MarkerKind) -> StopMarker {
    let (size, fill) = match kind {
        MarkerKind::Source => (ENDPOINT_MARKER_SIZE, SOURCE_FILL),
        MarkerKind::Destination => (ENDPOINT_MARKER_SIZE, DESTINATION_FILL),
        MarkerKind::Intermediate => (STOP_MARKER_SIZE, STOP_FILL),
    };

    let mut popup = segment.stop_name.clone();
    if let Some(route) = &segment.route_name {
        popup.push('\n');
        popup.push_str(route);
    }
    if segment.interchange {
        popup.push_str("\n🔄 Interchange");
    }
    match kind {
        MarkerKind::Source => popup.push_str("\n🟢 Start"),
        MarkerKind::Destination => popup.push_str("\n🔴 End"),
        MarkerKind::Intermediate => {}
    }

    StopMarker {
        name: segment.stop_name.clone(),
        position: [stop.lat, stop.lng],
        kind,
        size,
        fill: fill.to_string(),
        popup,
    }
}

/// Build the overlay for a booked route: polylines segmented by line color,
/// one marker per resolved stop, and bounds fitted over the drawn path.
///
/// Segments whose stop name has no match in the static table are skipped
/// silently. Path segmentation breaks on color transitions only; the
/// `interchange` flag never splits a polyline.
pub fn build_route_overlay(
    source_name: &str,
    dest_name: &str,
    path: &[PathSegment],
    stops: &[Stop],
) -> RouteOverlay {
    let mut overlay = RouteOverlay {
        center: MAP_CENTER,
        zoom: MAP_DEFAULT_ZOOM,
        polylines: Vec::new(),
        markers: Vec::new(),
        fit: None,
    };

    let mut current_coords: Vec<[f64; 2]> = Vec::new();
    let mut current_color = String::new();
    let mut resolved: Vec<[f64; 2]> = Vec::new();

    for segment in path {
        let Some(stop) = stops.iter().find(|s| s.name == segment.stop_name) else {
            continue;
        };
        let coord = [stop.lat, stop.lng];
        let color = segment_color(segment);

        if resolved.is_empty() {
            // Seed the accumulator from the first resolved segment
            current_color = color.clone();
        }

        if color != current_color {
            if current_coords.len() > 1 {
                overlay.polylines.push(RoutePolyline {
                    color: current_color.clone(),
                    weight: ROUTE_LINE_WEIGHT,
                    opacity: ROUTE_LINE_OPACITY,
                    coordinates: std::mem::take(&mut current_coords),
                });
            }
            current_coords = vec![coord];
            current_color = color;
        } else {
            current_coords.push(coord);
        }

        // Source wins if a stop is degenerately both endpoints
        let kind = if segment.stop_name == source_name {
            MarkerKind::Source
        } else if segment.stop_name == dest_name {
            MarkerKind::Destination
        } else {
            MarkerKind::Intermediate
        };
        overlay.markers.push(route_marker(segment, stop, kind));

        resolved.push(coord);
    }

    if current_coords.len() > 1 {
        overlay.polylines.push(RoutePolyline {
            color: current_color,
            weight: ROUTE_LINE_WEIGHT,
            opacity: ROUTE_LINE_OPACITY,
            coordinates: current_coords,
        });
    }

    overlay.fit = FitBounds::from_points(&resolved);
    overlay
}

/// One full line drawn through its ordered stop list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkPolyline {
    pub label: String,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkMarker {
    pub name: String,
    pub position: [f64; 2],
    pub size: u32,
    pub fill: String,
    pub popup: String,
}

/// Overlay of the whole static network for the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkOverlay {
    pub center: [f64; 2],
    pub zoom: u8,
    pub polylines: Vec<NetworkPolyline>,
    pub markers: Vec<NetworkMarker>,
}

/// Draw every line and every stop once, independent of any booking. Lines
/// are homogeneous in color by construction, so no segmentation is needed.
pub fn build_network_overlay(lines: &[MetroLine], stops: &[Stop]) -> NetworkOverlay {
    let polylines = lines
        .iter()
        .map(|line| NetworkPolyline {
            label: line.name.to_string(),
            color: line.color.hex().to_string(),
            weight: NETWORK_LINE_WEIGHT,
            opacity: NETWORK_LINE_OPACITY,
            coordinates: line
                .stops
                .iter()
                .filter_map(|id| stops.iter().find(|s| s.id == *id))
                .map(|s| [s.lat, s.lng])
                .collect(),
        })
        .collect();

    let markers = stops
        .iter()
        .map(|stop| {
            let mut popup = format!("{}\nCode: {}", stop.name, stop.code);
            if stop.interchange {
                popup.push_str("\n🔄 Interchange Station");
            }
            NetworkMarker {
                name: stop.name.to_string(),
                position: [stop.lat, stop.lng],
                size: NETWORK_MARKER_SIZE,
                fill: if stop.interchange {
                    INTERCHANGE_FILL.to_string()
                } else {
                    STOP_FILL.to_string()
                },
                popup,
            }
        })
        .collect();

    NetworkOverlay {
        center: MAP_CENTER,
        zoom: MAP_DEFAULT_ZOOM,
        polylines,
        markers,
    }
}
