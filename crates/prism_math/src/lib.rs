// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod ray;
pub mod random;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract};
