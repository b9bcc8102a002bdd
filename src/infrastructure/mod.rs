//! Infrastructure layer providing external service integrations.
//!
//! This module contains the preferences file, the simulated platform
//! location service, command-line configuration, clipboard access and
//! log setup.

pub mod persistence;
pub mod simulated_location;
pub mod config;
pub mod logging;
pub mod clipboard;

pub use persistence::*;
pub use simulated_location::*;
pub use config::*;
pub use logging::*;
pub use clipboard::*;
