pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod model;
pub mod server;

pub use error::{Error, Result};
