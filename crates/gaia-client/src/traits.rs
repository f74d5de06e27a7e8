use gaia_core::{AskRequest, AskResponse, Dataset, DiscoveryReply, DocumentResult, Result, SearchQuery};

/// The remote document-intelligence service, one method per backend endpoint.
#[async_trait::async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn list_datasets(&self) -> Result<Vec<Dataset>>;
    async fn discover_dataset(&self, dataset_id: &str) -> Result<DiscoveryReply>;
    async fn search_objects(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>>;
    async fn ask(&self, req: &AskRequest) -> Result<AskResponse>;

    /// Short name for logs ("http", "memory").
    fn name(&self) -> &'static str;
}
