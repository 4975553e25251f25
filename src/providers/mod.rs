pub mod backend;

pub use backend::{ApiOutcome, BackendClient, BackendError};
