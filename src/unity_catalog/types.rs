use serde::{Deserialize, Serialize};

/// A metastore as the workspace API reports it. The record is owned by the
/// service; this module only reads it. Fields beyond the ones modelled here
/// are carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetastoreRecord {
    pub metastore_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_metastore_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Listing envelope; the key is absent on workspaces without metastores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetastoreList {
    #[serde(default)]
    pub metastores: Vec<MetastoreRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMetastoreRequest {
    pub name: String,
    pub storage_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Update payload. The storage root is deliberately not representable here:
/// the service rejects changes to it after creation.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateMetastoreRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMetastoreResponse {
    pub metastore_id: String,
    pub global_metastore_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMetastoreResponse {
    pub global_metastore_id: String,
}
