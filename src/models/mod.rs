pub mod coordinates;
pub mod route;
pub mod trip;

pub use coordinates::Coordinates;
pub use route::{Route, RouteKind};
pub use trip::{FitnessLevel, TripParameters};
