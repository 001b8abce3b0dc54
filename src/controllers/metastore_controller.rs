use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::*;

use super::metastore::MetastoreProperties;
use crate::config::ApiConfig;
use crate::unity_catalog::types::{CreateMetastoreRequest, UpdateMetastoreRequest};
use crate::unity_catalog::{MetastoreRecord, UnityCatalogClient};
use crate::util::errors::{Error, Result};
use crate::util::metrics;

/// Outputs the caller persists after a successful create or update. The
/// physical resource id re-identifies this logical resource on later calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetastoreResponse {
    pub metastore_id: String,
    pub global_metastore_id: String,
    pub physical_resource_id: String,
}

/// Delete acknowledgement; the physical id is passed back unchanged so the
/// caller can clear its reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteMetastoreResponse {
    pub physical_resource_id: String,
}

impl MetastoreProperties {
    /// Resolution policy: a remembered physical id wins over a name match.
    async fn resolve(
        &self,
        client: &UnityCatalogClient,
        physical_resource_id: Option<&str>,
    ) -> Result<Option<MetastoreRecord>> {
        if let Some(id) = physical_resource_id {
            if let Some(record) = client.get_metastore(id).await? {
                return Ok(Some(record));
            }
            info!("Metastore id {} no longer resolves, falling back to name lookup", id);
        }
        let metastores = client.list_metastores().await?;
        // first exact name match wins; duplicate names are ambiguous
        Ok(metastores.into_iter().find(|m| m.name == self.metastore.name))
    }

    async fn reconcile(
        &self,
        ctx: Arc<Context>,
        physical_resource_id: Option<&str>,
    ) -> Result<MetastoreResponse> {
        self.validate()?;
        let client = UnityCatalogClient::new(&self.workspace_url, &ctx.config)?;

        let Some(current) = self.resolve(&client, physical_resource_id).await? else {
            let created = client
                .create_metastore(&CreateMetastoreRequest {
                    name: self.metastore.name.clone(),
                    storage_root: self.metastore.storage_root.clone(),
                    owner: self.metastore.owner.clone(),
                })
                .await?;
            info!(
                "Created metastore \"{}\" ({})",
                self.metastore.name, created.metastore_id
            );
            return Ok(MetastoreResponse {
                physical_resource_id: created.metastore_id.clone(),
                metastore_id: created.metastore_id,
                global_metastore_id: created.global_metastore_id,
            });
        };

        let metastore_id = current.metastore_id;
        // The service suffixes the assigned id onto the storage root at
        // creation; any stored value other than that means the desired root
        // itself changed, which the service does not allow.
        let expected_root = self.metastore.derived_storage_root(&metastore_id);
        if current.storage_root.as_deref() != Some(expected_root.as_str()) {
            return Err(Error::StorageRootImmutable(format!(
                "storage_root can't be changed after first deployment (metastore {metastore_id})"
            )));
        }

        let updated = client
            .update_metastore(
                &metastore_id,
                &UpdateMetastoreRequest {
                    name: self.metastore.name.clone(),
                    owner: self.metastore.owner.clone(),
                },
            )
            .await?;
        info!("Updated metastore \"{}\" ({})", self.metastore.name, metastore_id);
        Ok(MetastoreResponse {
            metastore_id: metastore_id.clone(),
            global_metastore_id: updated.global_metastore_id,
            physical_resource_id: metastore_id,
        })
    }

    async fn cleanup(
        &self,
        ctx: Arc<Context>,
        physical_resource_id: &str,
    ) -> Result<DeleteMetastoreResponse> {
        self.validate()?;
        let client = UnityCatalogClient::new(&self.workspace_url, &ctx.config)?;

        match self.resolve(&client, Some(physical_resource_id)).await? {
            Some(current) => {
                client.delete_metastore(&current.metastore_id).await?;
                info!(
                    "Deleted metastore \"{}\" ({})",
                    self.metastore.name, current.metastore_id
                );
            }
            None => warn!("Metastore \"{}\" already removed", self.metastore.name),
        }
        Ok(DeleteMetastoreResponse {
            physical_resource_id: physical_resource_id.to_string(),
        })
    }
}

/// State shared between the reconciler and an embedding web server
#[derive(Clone, Default)]
pub struct State {
    /// Diagnostics populated by the reconciler
    diagnostics: Arc<RwLock<Diagnostics>>,
    /// Metrics registry
    registry: prometheus::Registry,
}

/// State wrapper around the controller outputs for the web server
impl State {
    /// Metrics getter
    pub fn metrics(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }

    /// State getter
    pub async fn diagnostics(&self) -> Diagnostics {
        self.diagnostics.read().await.clone()
    }

    // Create a Context that can update State
    pub fn to_context(&self, config: ApiConfig) -> Arc<Context> {
        Arc::new(Context {
            config,
            metrics: metrics::Metrics::default().register(&self.registry).unwrap(),
            diagnostics: self.diagnostics.clone(),
        })
    }
}

// Context for the reconciler
#[derive(Clone)]
pub struct Context {
    /// Workspace API auth and timeouts
    pub config: ApiConfig,
    /// Diagnostics read by the web server
    pub diagnostics: Arc<RwLock<Diagnostics>>,
    /// Prometheus metrics
    pub metrics: metrics::Metrics,
}

/// Diagnostics to be exposed by the web server
#[derive(Clone, Serialize)]
pub struct Diagnostics {
    pub last_event: DateTime<Utc>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self { last_event: Utc::now() }
    }
}

#[instrument(skip(properties, ctx), fields(metastore = %properties.metastore.name))]
pub async fn reconcile(
    properties: &MetastoreProperties,
    physical_resource_id: Option<&str>,
    ctx: Arc<Context>,
) -> Result<MetastoreResponse> {
    let _timer = ctx.metrics.count_and_measure("create_or_update");
    ctx.diagnostics.write().await.last_event = Utc::now();

    info!(
        "Reconciling metastore \"{}\" on {}",
        properties.metastore.name, properties.workspace_url
    );
    match properties.reconcile(ctx.clone(), physical_resource_id).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Failed to reconcile metastore: {}", e);
            ctx.metrics.reconcile_failure(&properties.metastore.name, &e);
            Err(e)
        }
    }
}

#[instrument(skip(properties, ctx), fields(metastore = %properties.metastore.name))]
pub async fn cleanup(
    properties: &MetastoreProperties,
    physical_resource_id: &str,
    ctx: Arc<Context>,
) -> Result<DeleteMetastoreResponse> {
    let _timer = ctx.metrics.count_and_measure("delete");
    ctx.diagnostics.write().await.last_event = Utc::now();

    info!(
        "Deleting metastore \"{}\" on {}",
        properties.metastore.name, properties.workspace_url
    );
    match properties.cleanup(ctx.clone(), physical_resource_id).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Failed to delete metastore: {}", e);
            ctx.metrics.reconcile_failure(&properties.metastore.name, &e);
            Err(e)
        }
    }
}
