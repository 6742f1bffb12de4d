//! # phyllo
//!
//! Phyllotaxis pattern generation: place N objects on a golden-angle
//! spiral, color them by index, and schedule when each one appears.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod color;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod params;
pub mod schedule;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use color::{ColorScheme, Rgb};
pub use error::PhylloError;
pub use generator::{generate, generate_point, points, PointRecord, Points};
pub use geometry::Point;
pub use params::{Params, GOLDEN_ANGLE_DEGREES, MAX_COUNT};
pub use schedule::{Reveal, RevealSchedule};
pub use svg::render_svg;
