//! # Sinaxario HTTP Server Module
//!
//! Transport adapter: maps HTTP requests onto the record service and
//! service results onto status codes.
//!
//! # Endpoints
//!
//! - `POST /sinaxario` - Create a record
//! - `GET /sinaxario` - List every record
//! - `GET /sinaxario/findby?data=` - Find one record by date
//! - `GET /health` - Store liveness

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod response;
pub mod server;
pub mod sinaxario_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use response::{HealthResponse, ResultResponse};
pub use server::{shutdown_signal, HttpServer};
pub use sinaxario_routes::SinaxarioState;
