//! Login and registration flows: call the backend, populate the session
//! store on success, and map token-less responses to user-facing errors.

use thiserror::Error;

use crate::models::{AuthRequest, AuthResponse, UserProfile};
use crate::providers::{BackendClient, BackendError};
use crate::session::{SessionError, SessionStore};

#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error("Invalid email or password!")]
    InvalidCredentials,
    #[error("{0}")]
    RegistrationFailed(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Extract the token and profile from an auth response. `None` when the
/// backend declined to issue a token. Profile fields the backend omitted
/// fall back to what the user typed.
fn accept_auth(response: AuthResponse, fallback_email: &str) -> Option<(String, UserProfile)> {
    let token = response.token?;
    let profile = UserProfile {
        email: response.email.unwrap_or_else(|| fallback_email.to_string()),
        name: response.name.unwrap_or_default(),
        role: response.role.unwrap_or_else(|| "USER".to_string()),
    };
    Some((token, profile))
}

pub async fn login(
    client: &BackendClient,
    store: &mut SessionStore,
    email: &str,
    password: &str,
) -> Result<UserProfile, AuthFlowError> {
    let response = client
        .login(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;

    // A rejected login leaves any existing session untouched
    let Some((token, profile)) = accept_auth(response, email) else {
        return Err(AuthFlowError::InvalidCredentials);
    };

    store.set_session(token, profile.clone())?;
    tracing::info!(email = %profile.email, "Logged in");
    Ok(profile)
}

pub async fn register(
    client: &BackendClient,
    store: &mut SessionStore,
    email: &str,
    password: &str,
) -> Result<UserProfile, AuthFlowError> {
    let response = client
        .register(&AuthRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;

    let backend_message = response.error.clone();
    let Some((token, profile)) = accept_auth(response, email) else {
        return Err(AuthFlowError::RegistrationFailed(
            backend_message.unwrap_or_else(|| "Registration failed!".to_string()),
        ));
    };

    store.set_session(token, profile.clone())?;
    tracing::info!(email = %profile.email, "Registered new account");
    Ok(profile)
}

pub fn logout(store: &mut SessionStore) -> Result<(), SessionError> {
    tracing::info!("Logged out");
    store.clear()
}

/// Page-load guard: whether a stored session exists. Callers send the user
/// to the login screen when it does not.
pub fn check_auth(store: &SessionStore) -> bool {
    store.is_authenticated()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(token: Option<&str>) -> AuthResponse {
        AuthResponse {
            token: token.map(str::to_string),
            email: Some("rider@example.com".to_string()),
            name: Some("rider".to_string()),
            role: Some("USER".to_string()),
            error: None,
        }
    }

    #[test]
    fn accept_auth_with_token() {
        let (token, profile) = accept_auth(response(Some("tok-1")), "typed@example.com").unwrap();
        assert_eq!(token, "tok-1");
        assert_eq!(profile.email, "rider@example.com");
        assert_eq!(profile.role, "USER");
    }

    #[test]
    fn accept_auth_without_token_is_rejected() {
        assert!(accept_auth(response(None), "typed@example.com").is_none());
    }

    #[test]
    fn accept_auth_falls_back_to_typed_email() {
        let response = AuthResponse {
            token: Some("tok-2".to_string()),
            email: None,
            name: None,
            role: None,
            error: None,
        };
        let (_, profile) = accept_auth(response, "typed@example.com").unwrap();
        assert_eq!(profile.email, "typed@example.com");
        assert_eq!(profile.name, "");
        assert_eq!(profile.role, "USER");
    }

    #[test]
    fn guard_follows_store_state() {
        let path =
            std::env::temp_dir().join(format!("metrobook-auth-{}.json", uuid::Uuid::new_v4()));
        let mut store = SessionStore::open(&path).unwrap();
        assert!(!check_auth(&store));

        store
            .set_session(
                "tok".to_string(),
                UserProfile {
                    email: "a@b.c".to_string(),
                    name: "a".to_string(),
                    role: "USER".to_string(),
                },
            )
            .unwrap();
        assert!(check_auth(&store));

        logout(&mut store).unwrap();
        assert!(!check_auth(&store));
    }
}
