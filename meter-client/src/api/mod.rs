pub mod queries;

pub use queries::{Backend, ClientError, ExceptionQuery, HttpBackend};
