//! HTTP service surface — REST + WebSocket routes over the engine.

pub mod routes;

pub use routes::{service_routes, AppState};
