pub mod capture;
pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod tessellation;

pub use config::CaptureConfig;
pub use error::{Result, RoomshotError};
