use serde::{Deserialize, Serialize};

use crate::util::errors::{Error, Result};

/// Desired state of a Unity Catalog metastore.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Metastore {
    pub name: String,
    pub storage_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Full reconciliation input: the workspace to talk to plus the desired
/// metastore. Immutable for the duration of one reconciliation call.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct MetastoreProperties {
    pub workspace_url: String,
    pub metastore: Metastore,
}

impl Metastore {
    /// Storage root as the service stores it: the configured root with the
    /// assigned metastore id suffixed at creation time.
    pub fn derived_storage_root(&self, metastore_id: &str) -> String {
        format!("{}/{}", self.storage_root, metastore_id)
    }
}

impl MetastoreProperties {
    /// Boundary validation, run before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.metastore.name.is_empty() {
            return Err(Error::InvalidArgument(
                "metastore name must not be empty".to_string(),
            ));
        }
        if self.metastore.storage_root.is_empty() {
            return Err(Error::InvalidArgument(
                "storage_root must not be empty".to_string(),
            ));
        }
        if !self.workspace_url.starts_with("https://") && !self.workspace_url.starts_with("http://")
        {
            return Err(Error::InvalidArgument(format!(
                "workspace_url must be an absolute http(s) URL, got \"{}\"",
                self.workspace_url
            )));
        }
        Ok(())
    }
}
