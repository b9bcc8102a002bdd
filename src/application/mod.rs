//! Application layer managing state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing application state, map framing, and reactions to location changes.

pub mod state;
pub mod camera;

pub use state::*;
pub use camera::*;
