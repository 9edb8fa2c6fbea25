pub mod config;
pub mod controller;
pub mod export;
pub mod metrics_server;
pub mod observability;
pub mod runtime;
pub mod stats;
pub mod ui;

pub use controller::{update, DashboardState, Effect, Event};
