pub mod client;
pub mod types;

pub use client::UnityCatalogClient;
pub use types::{MetastoreList, MetastoreRecord};
