#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod exercise;
mod generator;
mod name;
mod preferences;
mod preset;
mod service;
mod statistics;
mod user;
mod workout;
mod workout_log;
mod workout_session;

pub use catalog::*;
pub use error::*;
pub use exercise::*;
pub use generator::*;
pub use name::*;
pub use preferences::*;
pub use preset::*;
pub use service::*;
pub use statistics::*;
pub use user::*;
pub use workout::*;
pub use workout_log::*;
pub use workout_session::*;
