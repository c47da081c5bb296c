//! # vidstream-api
//!
//! HTTP layer: axum handlers, routing, middleware and server setup.
//! Every endpoint responds with the uniform
//! `{ statusCode, data, message, success }` envelope.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use response::{ApiError, ApiJson, ApiResult, Created, Envelope};
pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
