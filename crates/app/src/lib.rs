#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod log;
mod service;
mod settings;

pub use service::*;
pub use settings::*;
