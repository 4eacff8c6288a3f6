//! Web layer for the trip logger.
//!
//! A JSON API over the trip store, the cost estimator and the geocoder,
//! plus static file serving for the front end.

mod dto;
mod error;
mod routes;
mod state;


pub use dto::*;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
