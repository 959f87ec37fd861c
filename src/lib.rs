//! sinaxario - REST service for daily Sinaxario calendar records
//!
//! Request flow: `http_server` -> `service` -> (`identity`, `store`) -> MongoDB.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod identity;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
