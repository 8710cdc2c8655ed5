#![forbid(unsafe_code)]

pub mod access;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod redirect;
pub mod time;

pub use error::Error;
pub use time::Clock;
