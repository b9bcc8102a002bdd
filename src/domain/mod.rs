pub mod models;
pub mod geo;
pub mod directory;
pub mod location;
pub mod appearance;
pub mod errors;

pub use models::*;
pub use geo::*;
pub use directory::*;
pub use location::*;
pub use appearance::*;
pub use errors::*;
