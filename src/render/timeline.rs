//! Step-by-step timeline of an itinerary. Pure data in, pure data out; the
//! caller replaces any previously rendered timeline wholesale.

use std::fmt::Write;

use crate::models::{LineColor, PathSegment};

/// Fallback when a segment's color name is not in the line table.
pub const TIMELINE_FALLBACK_COLOR: &str = "#00d4ff";
/// Dot color for the origin step.
pub const START_COLOR: &str = "#00ff88";
/// Dot color for the destination step.
pub const END_COLOR: &str = "#e94560";

const CONNECTOR_OPACITY: f64 = 0.4;

/// Connector drawn from a step down to the next one. It belongs to the step
/// it originates from, so it keeps that step's line color even across a
/// transfer boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStep {
    pub stop_name: String,
    pub route_name: Option<String>,
    /// Resolved line color (hex), falling back for unrecognized names.
    pub line_color: String,
    pub dot_color: String,
    pub connector: Option<Connector>,
    pub interchange: bool,
    pub is_start: bool,
    pub is_end: bool,
}

fn segment_color(segment: &PathSegment) -> String {
    LineColor::from_name(&segment.route_color)
        .map(|c| c.hex().to_string())
        .unwrap_or_else(|| TIMELINE_FALLBACK_COLOR.to_string())
}

/// Build the timeline steps for an itinerary. The first segment is the
/// start, the last is the end; a single-segment route is both. The
/// interchange badge is independent of role.
pub fn build_timeline(path: &[PathSegment]) -> Vec<TimelineStep> {
    path.iter()
        .enumerate()
        .map(|(index, segment)| {
            let is_start = index == 0;
            let is_end = index + 1 == path.len();
            let line_color = segment_color(segment);

            let dot_color = if is_start {
                START_COLOR.to_string()
            } else if is_end {
                END_COLOR.to_string()
            } else {
                line_color.clone()
            };

            let connector = if is_end {
                None
            } else {
                Some(Connector {
                    color: line_color.clone(),
                    opacity: CONNECTOR_OPACITY,
                })
            };

            TimelineStep {
                stop_name: segment.stop_name.clone(),
                route_name: segment.route_name.clone(),
                line_color,
                dot_color,
                connector,
                interchange: segment.interchange,
                is_start,
                is_end,
            }
        })
        .collect()
}

/// Render the timeline as terminal text for the result view.
pub fn render_text(steps: &[TimelineStep]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str("● ");
        out.push_str(&step.stop_name);
        if let Some(route) = &step.route_name {
            let _ = write!(out, "  [{}]", route);
        }
        if step.interchange {
            out.push_str("  🔄 Interchange");
        }
        if step.is_start {
            out.push_str("  ● Start");
        }
        if step.is_end {
            out.push_str("  ● End");
        }
        out.push('\n');
        if step.connector.is_some() {
            out.push_str("│\n");
        }
    }
    out
}
