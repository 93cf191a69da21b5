pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use error::{AuthError, BlotterError, SessionError};
pub use router::{BlotterState, blotter_router};
