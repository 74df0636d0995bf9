// Data layer: the load-once sighting store, derived-field extraction,
// the filter pipeline and the chart aggregations.

pub mod aggregate;
pub mod export;
pub mod extract;
pub mod filter;
pub mod loader;
pub mod models;
pub mod postcodes;
pub mod sun;

pub use loader::{DataError, SchemaInfo, SightingStore};
pub use models::{Parse, RawSighting, Sighting};
