pub mod metastore;
pub mod metastore_controller;

pub use metastore::{Metastore, MetastoreProperties};
pub use metastore_controller::{
    cleanup, reconcile, Context, DeleteMetastoreResponse, MetastoreResponse, State,
};
