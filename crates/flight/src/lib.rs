#![warn(missing_docs)]
//! Plane kinematics: throttle-coupled attitude, gravity, terrain clamp,
//! and landing/crash resolution.

mod controls;
mod model;

pub use controls::FlightControls;
pub use model::{FlightModel, FlightStatus};
