//! Configuration file for the `pedidos` binary.

mod schema;

pub use schema::{Config, UnitsConfig};
