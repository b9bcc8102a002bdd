//! CoffeeFinder - Terminal Coffee Shop Finder Library
//!
//! Finds nearby coffee shops from a fixed sample set, filtered by brand and
//! distance and sorted nearest first, behind a location permission flow.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
