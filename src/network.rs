//! Static reference data for the metro network: stop coordinates and line
//! topology used by the map renderers. The backend remains the source of
//! truth for bookable stops; this table only supplies geometry.

use crate::models::{LineColor, MetroLine, Stop};

/// Default map view over the network (Delhi).
pub const MAP_CENTER: [f64; 2] = [28.6139, 77.2090];
pub const MAP_DEFAULT_ZOOM: u8 = 11;

#[rustfmt::skip]
pub const STOPS: &[Stop] = &[
    Stop { id: 1, name: "Rajiv Chowk", code: "RJC", lat: 28.6328, lng: 77.2197, interchange: true },
    Stop { id: 2, name: "Kashmere Gate", code: "KSG", lat: 28.6678, lng: 77.2285, interchange: true },
    Stop { id: 3, name: "Central Secretariat", code: "CSS", lat: 28.6149, lng: 77.2090, interchange: true },
    Stop { id: 4, name: "Dwarka Sector 21", code: "DWK", lat: 28.5521, lng: 77.0588, interchange: false },
    Stop { id: 5, name: "Vaishali", code: "VSH", lat: 28.6453, lng: 77.3411, interchange: false },
    Stop { id: 6, name: "Huda City Centre", code: "HCC", lat: 28.4595, lng: 77.0266, interchange: false },
    Stop { id: 7, name: "Samaypur Badli", code: "SPB", lat: 28.7452, lng: 77.1429, interchange: false },
    Stop { id: 8, name: "New Delhi", code: "NDL", lat: 28.6419, lng: 77.2194, interchange: true },
    Stop { id: 9, name: "Chandni Chowk", code: "CHC", lat: 28.6506, lng: 77.2303, interchange: false },
    Stop { id: 10, name: "Welcome", code: "WLC", lat: 28.6726, lng: 77.2942, interchange: true },
    Stop { id: 11, name: "Noida Sector 18", code: "NS18", lat: 28.57, lng: 77.321, interchange: false },
    Stop { id: 12, name: "Botanical Garden", code: "BTG", lat: 28.5644, lng: 77.335, interchange: true },
    Stop { id: 13, name: "Janakpuri West", code: "JNW", lat: 28.6219, lng: 77.0831, interchange: false },
    Stop { id: 14, name: "Lajpat Nagar", code: "LJN", lat: 28.57, lng: 77.2432, interchange: true },
    Stop { id: 15, name: "IGI Airport", code: "IGI", lat: 28.5562, lng: 77.1, interchange: false },
];

#[rustfmt::skip]
pub const LINES: &[MetroLine] = &[
    MetroLine { name: "Yellow Line", color: LineColor::Yellow, stops: &[7, 2, 1, 3, 6] },
    MetroLine { name: "Blue Line", color: LineColor::Blue, stops: &[4, 1, 2, 5] },
    MetroLine { name: "Pink Line", color: LineColor::Pink, stops: &[8, 10, 13, 1, 14] },
    MetroLine { name: "Orange Line", color: LineColor::Orange, stops: &[4, 15, 9] },
];

/// Exact-name lookup against the static stop table.
pub fn stop_by_name(name: &str) -> Option<&'static Stop> {
    STOPS.iter().find(|s| s.name == name)
}

pub fn stop_by_id(id: i64) -> Option<&'static Stop> {
    STOPS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_lookup_by_name_is_exact() {
        assert_eq!(stop_by_name("Rajiv Chowk").map(|s| s.id), Some(1));
        assert!(stop_by_name("rajiv chowk").is_none());
        assert!(stop_by_name("Rajiv").is_none());
    }

    #[test]
    fn stop_lookup_by_id() {
        assert_eq!(stop_by_id(15).map(|s| s.code), Some("IGI"));
        assert!(stop_by_id(99).is_none());
    }

    #[test]
    fn every_line_stop_resolves() {
        for line in LINES {
            for &stop_id in line.stops {
                assert!(
                    stop_by_id(stop_id).is_some(),
                    "{} references unknown stop {}",
                    line.name,
                    stop_id
                );
            }
        }
    }

    #[test]
    fn line_endpoints() {
        let yellow = &LINES[0];
        assert_eq!(yellow.color, LineColor::Yellow);
        assert_eq!(stop_by_id(yellow.stops[0]).unwrap().name, "Samaypur Badli");
        assert_eq!(
            stop_by_id(*yellow.stops.last().unwrap()).unwrap().name,
            "Huda City Centre"
        );
    }

    #[test]
    fn stop_ids_are_unique() {
        for (i, a) in STOPS.iter().enumerate() {
            for b in &STOPS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.code, b.code);
                assert_ne!(a.name, b.name);
            }
        }
    }
}
