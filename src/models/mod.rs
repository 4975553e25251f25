use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Metro line color as named by the backend.
///
/// Itinerary segments carry the color as a free-form string, so lookups go
/// through [`LineColor::from_name`] and render sites fall back to their own
/// default when the name is unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineColor {
    Yellow,
    Blue,
    Pink,
    Orange,
}

impl LineColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "YELLOW" => Some(LineColor::Yellow),
            "BLUE" => Some(LineColor::Blue),
            "PINK" => Some(LineColor::Pink),
            "ORANGE" => Some(LineColor::Orange),
            _ => None,
        }
    }

    /// Display hex value for the line color.
    pub fn hex(self) -> &'static str {
        match self {
            LineColor::Yellow => "#FFD700",
            LineColor::Blue => "#1E90FF",
            LineColor::Pink => "#FF69B4",
            LineColor::Orange => "#FF8C00",
        }
    }
}

/// Static reference stop with map coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: i64,
    pub name: &'static str,
    pub code: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Whether multiple lines cross here.
    pub interchange: bool,
}

/// Metro line as static reference data. Stop order defines adjacency along
/// the line; it is not validated against the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MetroLine {
    pub name: &'static str,
    pub color: LineColor,
    pub stops: &'static [i64],
}

/// Stop row as returned by the backend's `/stops` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "isInterchange", default)]
    pub is_interchange: bool,
}

/// One step of a computed itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub stop_name: String,
    #[serde(default)]
    pub stop_code: Option<String>,
    #[serde(default)]
    pub route_name: Option<String>,
    /// Line color name, opaque to the client; may be unrecognized.
    #[serde(default)]
    pub route_color: String,
    #[serde(default)]
    pub interchange: bool,
}

/// Credentials payload for login and registration.
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Response from the auth endpoints. A missing token means the backend
/// rejected the credentials; `error` carries its message when it sent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub source_stop_id: i64,
    pub destination_stop_id: i64,
}

/// Booking result with the computed itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[serde(default)]
    pub source_stop: Option<String>,
    #[serde(default)]
    pub destination_stop: Option<String>,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    #[serde(default)]
    pub total_stops: u32,
    #[serde(default)]
    pub total_interchanges: u32,
    #[serde(default)]
    pub estimated_time: f64,
    #[serde(default)]
    pub qr_string: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Backend-reported failure (e.g. no path between the stops).
    #[serde(default)]
    pub error: Option<String>,
}

/// Cached profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_color_lookup() {
        assert_eq!(LineColor::from_name("YELLOW"), Some(LineColor::Yellow));
        assert_eq!(LineColor::from_name("ORANGE"), Some(LineColor::Orange));
        assert_eq!(LineColor::from_name("TEAL"), None);
        assert_eq!(LineColor::from_name(""), None);
        assert_eq!(LineColor::from_name("yellow"), None);
    }

    #[test]
    fn line_color_hex_values() {
        assert_eq!(LineColor::Yellow.hex(), "#FFD700");
        assert_eq!(LineColor::Blue.hex(), "#1E90FF");
        assert_eq!(LineColor::Pink.hex(), "#FF69B4");
        assert_eq!(LineColor::Orange.hex(), "#FF8C00");
    }

    #[test]
    fn stop_record_from_backend_json() {
        let stop: StopRecord =
            serde_json::from_str(r#"{"id":1,"name":"A","code":"A1","isInterchange":false}"#)
                .unwrap();
        assert_eq!(stop.id, 1);
        assert_eq!(stop.name, "A");
        assert_eq!(stop.code, "A1");
        assert!(!stop.is_interchange);
    }

    #[test]
    fn stop_record_interchange_defaults_to_false() {
        let stop: StopRecord =
            serde_json::from_str(r#"{"id":2,"name":"B","code":"B1"}"#).unwrap();
        assert!(!stop.is_interchange);
    }

    #[test]
    fn path_segment_from_backend_json() {
        let segment: PathSegment = serde_json::from_str(
            r#"{"stopName":"Rajiv Chowk","stopCode":"RJC","routeName":"Yellow Line","routeColor":"YELLOW","interchange":true}"#,
        )
        .unwrap();
        assert_eq!(segment.stop_name, "Rajiv Chowk");
        assert_eq!(segment.route_name.as_deref(), Some("Yellow Line"));
        assert_eq!(segment.route_color, "YELLOW");
        assert!(segment.interchange);
    }

    #[test]
    fn booking_response_with_error_payload() {
        let response: BookingResponse =
            serde_json::from_str(r#"{"error":"No path found between stops"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("No path found between stops"));
        assert!(response.path.is_empty());
        assert!(response.booking_id.is_none());
    }

    #[test]
    fn booking_response_full_payload() {
        let response: BookingResponse = serde_json::from_str(
            r#"{
                "bookingId": 7,
                "bookingReference": "MB-2024-0007",
                "sourceStop": "Rajiv Chowk",
                "destinationStop": "Vaishali",
                "path": [{"stopName":"Rajiv Chowk","routeColor":"BLUE","interchange":true}],
                "totalStops": 4,
                "totalInterchanges": 0,
                "estimatedTime": 12.5,
                "status": "CONFIRMED",
                "createdAt": "2024-05-01T09:30:00"
            }"#,
        )
        .unwrap();
        assert_eq!(response.booking_id, Some(7));
        assert_eq!(response.path.len(), 1);
        assert_eq!(response.total_stops, 4);
        assert!(response.created_at.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn booking_request_wire_keys() {
        let request = BookingRequest {
            source_stop_id: 1,
            destination_stop_id: 5,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"sourceStopId":1,"destinationStopId":5}"#);
    }
}
