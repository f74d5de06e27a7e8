//! Dataset description fan-out.
//!
//! One dataset listing, then one discovery call per dataset issued
//! concurrently. A failed listing fails the whole operation; a failed
//! discovery call only nulls that dataset's description. Output order is the
//! listing order.

use crate::metrics::DISCOVERY_FAILURES_TOTAL;
use crate::traits::Backend;
use futures::future::join_all;
use gaia_core::{DatasetDescription, DescriptionFallback, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Datasets with their discovery descriptions; empty discovery results give `null`.
pub async fn list_dataset_descriptions(
    backend: Arc<dyn Backend>,
) -> Result<Vec<DatasetDescription>> {
    describe_datasets(backend, DescriptionFallback::Null).await
}

/// Same fan-out, but empty discovery results give `""`.
pub async fn discover_tools(backend: Arc<dyn Backend>) -> Result<Vec<DatasetDescription>> {
    describe_datasets(backend, DescriptionFallback::Blank).await
}

pub async fn describe_datasets(
    backend: Arc<dyn Backend>,
    fallback: DescriptionFallback,
) -> Result<Vec<DatasetDescription>> {
    let datasets = backend.list_datasets().await?;
    debug!(count = datasets.len(), backend = backend.name(), "discovering datasets");

    let handles: Vec<_> = datasets
        .iter()
        .map(|d| {
            let backend = backend.clone();
            let id = d.id.clone();
            tokio::spawn(async move { backend.discover_dataset(&id).await })
        })
        .collect();
    let outcomes = join_all(handles).await;

    Ok(datasets
        .iter()
        .zip(outcomes)
        .map(|(dataset, outcome)| {
            let description = match outcome {
                Ok(Ok(reply)) => reply.description(fallback),
                Ok(Err(e)) => {
                    warn!(dataset_id = %dataset.id, error = %e, "discovery failed");
                    DISCOVERY_FAILURES_TOTAL.inc();
                    None
                }
                Err(e) => {
                    warn!(dataset_id = %dataset.id, error = %e, "discovery task aborted");
                    DISCOVERY_FAILURES_TOTAL.inc();
                    None
                }
            };
            DatasetDescription::new(dataset, description)
        })
        .collect())
}
