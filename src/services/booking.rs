//! Stop loading and the booking flow: validate the selection before any
//! network call, submit the booking, and persist the itinerary for the
//! result view. Authorization expiry clears the session here; navigation
//! is left to the caller.

use thiserror::Error;

use crate::models::{BookingRequest, BookingResponse, StopRecord};
use crate::providers::{ApiOutcome, BackendClient, BackendError};
use crate::session::{SessionError, SessionStore};

#[derive(Debug, Error)]
pub enum BookingFlowError {
    #[error("Please select both source and destination!")]
    MissingSelection,
    #[error("Source and destination cannot be the same!")]
    SameStop,
    #[error("Session expired, please log in again")]
    SessionExpired,
    /// Backend accepted the request but reported a booking failure.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Dropdown label for a stop, with the interchange suffix only when the
/// stop is one.
pub fn stop_option_label(stop: &StopRecord) -> String {
    if stop.is_interchange {
        format!("{} ({}) 🔄", stop.name, stop.code)
    } else {
        format!("{} ({})", stop.name, stop.code)
    }
}

/// Validate the source/destination pair before any network call.
pub fn validate_selection(
    source: Option<i64>,
    destination: Option<i64>,
) -> Result<(i64, i64), BookingFlowError> {
    match (source, destination) {
        (Some(source), Some(destination)) if source == destination => {
            Err(BookingFlowError::SameStop)
        }
        (Some(source), Some(destination)) => Ok((source, destination)),
        _ => Err(BookingFlowError::MissingSelection),
    }
}

/// Swap the selected source and destination.
pub fn swap(source: &mut Option<i64>, destination: &mut Option<i64>) {
    std::mem::swap(source, destination);
}

fn settle<T>(
    outcome: ApiOutcome<T>,
    store: &mut SessionStore,
) -> Result<T, BookingFlowError> {
    match outcome {
        ApiOutcome::Ok(value) => Ok(value),
        ApiOutcome::AuthExpired => {
            // Forced logout; the caller decides where to navigate
            store.clear()?;
            Err(BookingFlowError::SessionExpired)
        }
    }
}

fn require_token(store: &SessionStore) -> Result<String, BookingFlowError> {
    store
        .token()
        .map(str::to_string)
        .ok_or(BookingFlowError::SessionExpired)
}

/// Fetch the bookable stops for the selector dropdowns.
pub async fn load_stops(
    client: &BackendClient,
    store: &mut SessionStore,
) -> Result<Vec<StopRecord>, BookingFlowError> {
    let token = require_token(store)?;
    let stops = settle(client.stops(&token).await?, store)?;
    tracing::debug!(count = stops.len(), "Loaded stops");
    Ok(stops)
}

/// Book a ride. On success the itinerary is persisted as the last booking
/// so the result view can pick it up after navigation.
pub async fn book(
    client: &BackendClient,
    store: &mut SessionStore,
    source: Option<i64>,
    destination: Option<i64>,
) -> Result<BookingResponse, BookingFlowError> {
    let (source_stop_id, destination_stop_id) = validate_selection(source, destination)?;
    let token = require_token(store)?;

    let request = BookingRequest {
        source_stop_id,
        destination_stop_id,
    };
    let mut response = settle(client.create_booking(&token, &request).await?, store)?;

    if let Some(error) = response.error.take() {
        return Err(BookingFlowError::Rejected(error));
    }

    store.set_last_booking(response.clone())?;
    tracing::info!(
        reference = response.booking_reference.as_deref().unwrap_or("?"),
        stops = response.total_stops,
        interchanges = response.total_interchanges,
        "Booking confirmed"
    );
    Ok(response)
}

/// Read the persisted itinerary for the result view.
pub fn last_booking(store: &SessionStore) -> Option<&BookingResponse> {
    store.last_booking()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use std::path::PathBuf;

    fn temp_store() -> (SessionStore, PathBuf) {
        let path =
            std::env::temp_dir().join(format!("metrobook-booking-{}.json", uuid::Uuid::new_v4()));
        (SessionStore::open(&path).unwrap(), path)
    }

    #[test]
    fn labels_mark_interchanges_only() {
        let plain = StopRecord {
            id: 1,
            name: "A".to_string(),
            code: "A1".to_string(),
            is_interchange: false,
        };
        assert_eq!(stop_option_label(&plain), "A (A1)");

        let interchange = StopRecord {
            id: 2,
            name: "Rajiv Chowk".to_string(),
            code: "RJC".to_string(),
            is_interchange: true,
        };
        assert_eq!(stop_option_label(&interchange), "Rajiv Chowk (RJC) 🔄");
    }

    #[test]
    fn selection_must_be_complete_and_distinct() {
        assert!(matches!(
            validate_selection(None, Some(2)),
            Err(BookingFlowError::MissingSelection)
        ));
        assert!(matches!(
            validate_selection(Some(1), None),
            Err(BookingFlowError::MissingSelection)
        ));
        assert!(matches!(
            validate_selection(Some(3), Some(3)),
            Err(BookingFlowError::SameStop)
        ));
        assert_eq!(validate_selection(Some(1), Some(2)).unwrap(), (1, 2));
    }

    #[test]
    fn swap_exchanges_the_selection() {
        let mut source = Some(1);
        let mut destination = Some(5);
        swap(&mut source, &mut destination);
        assert_eq!(source, Some(5));
        assert_eq!(destination, Some(1));

        let mut source = Some(1);
        let mut destination = None;
        swap(&mut source, &mut destination);
        assert_eq!(source, None);
        assert_eq!(destination, Some(1));
    }

    #[test]
    fn auth_expiry_clears_the_session_before_returning() {
        let (mut store, path) = temp_store();
        store
            .set_session(
                "stale-token".to_string(),
                UserProfile {
                    email: "a@b.c".to_string(),
                    name: "a".to_string(),
                    role: "USER".to_string(),
                },
            )
            .unwrap();
        assert!(store.is_authenticated());

        let result: Result<Vec<StopRecord>, _> =
            settle(ApiOutcome::AuthExpired, &mut store);
        assert!(matches!(result, Err(BookingFlowError::SessionExpired)));
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn successful_outcome_passes_through() {
        let (mut store, path) = temp_store();
        let stops = vec![StopRecord {
            id: 1,
            name: "A".to_string(),
            code: "A1".to_string(),
            is_interchange: false,
        }];
        let result = settle(ApiOutcome::Ok(stops), &mut store).unwrap();
        assert_eq!(result.len(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_token_is_session_expired() {
        let (store, path) = temp_store();
        assert!(matches!(
            require_token(&store),
            Err(BookingFlowError::SessionExpired)
        ));
        let _ = std::fs::remove_file(&path);
    }
}
