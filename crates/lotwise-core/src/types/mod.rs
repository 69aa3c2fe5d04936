//! Domain types for index tracking.
//!
//! - [`TickerId`]: Opaque ticker identifier
//! - [`Classification`]: Country, sector and industry attributes
//! - [`IndexRow`]: A weighted, priced constituent of an index
//! - [`Holding`]: An existing position in a portfolio

mod classification;
mod holding;
mod ids;
mod row;

pub use classification::Classification;
pub use holding::Holding;
pub use ids::TickerId;
pub use row::IndexRow;
