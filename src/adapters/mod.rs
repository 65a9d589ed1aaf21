// Adapters layer: concrete reference-data sources behind `NeighborhoodProfileProvider`.

pub mod csv_store;
pub mod http;
pub mod memory;
#[cfg(feature = "lambda")]
pub mod s3;

pub use http::HttpProfileProvider;
pub use memory::InMemoryProfileProvider;
