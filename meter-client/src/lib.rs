pub mod api;
pub mod domain;

pub use api::{Backend, ClientError, ExceptionQuery, HttpBackend};
