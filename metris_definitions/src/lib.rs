#![allow(renamed_and_removed_lints)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_json;

extern crate base64;

#[macro_use]
extern crate log;

#[macro_use] extern crate failure;

pub use failure::Error; //Fail
pub type Result<T> = std::result::Result<T, Error>;

/// Typed configuration for the outbound endpoints
pub mod config;
pub use config::{BrokerConfig, IngestionConfig};

/// The consumption record shipped to the ingestion endpoint
pub mod metrics;
pub use metrics::ConsumptionMetrics;

/// Static provider/VM-type feature catalog
pub mod catalog;
pub use catalog::Catalog;

/// Broker roster DTOs
pub mod roster;
pub use roster::{RuntimeDTO, RuntimesPage};

/// Structs for the Kubernetes objects we read
pub mod structs;

/// Computational helpers
pub mod math;
