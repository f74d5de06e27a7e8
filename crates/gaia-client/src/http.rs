use crate::config::BackendConfig;
use crate::metrics::{outcome_label, BACKEND_REQUESTS_TOTAL, BACKEND_REQUEST_SECONDS};
use crate::traits::Backend;
use gaia_core::util::endpoint;
use gaia_core::{
    AskReply, AskRequest, AskResponse, Dataset, DatasetList, DiscoveryReply, DocumentResult,
    GaiaError, ObjectList, Result, SearchQuery,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;

const DATASETS_PATH: &str = "v2/mcm/gaia/datasets";
const OBJECTS_PATH: &str = "v2/mcm/gaia/objects";
const ASK_PATH: &str = "v2/mcm/gaia/ask";
static API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");

fn discovery_path(dataset_id: &str) -> String {
    format!("v2/mcm/gaia/dataset/{dataset_id}/discovery")
}

/// reqwest-backed client for the backend's REST API.
pub struct HttpBackend {
    client: reqwest::Client,
    // carries only ask calls; model inference can be slow
    ask_client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| GaiaError::Invalid(format!("API key is not a valid header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER.clone(), key);

        let client = reqwest::Client::builder()
            .default_headers(headers.clone())
            .build()
            .map_err(|e| GaiaError::Internal(format!("failed to build HTTP client: {e}")))?;
        let ask_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.ask_client_timeout)
            .timeout(config.ask_client_timeout)
            .build()
            .map_err(|e| GaiaError::Internal(format!("failed to build HTTP client: {e}")))?;

        debug!(host = %config.host, "http backend configured");
        Ok(Self {
            client,
            ask_client,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.config.host, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        op: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let timer = BACKEND_REQUEST_SECONDS.with_label_values(&[op]).start_timer();
        let res = send(req).await;
        timer.observe_duration();
        BACKEND_REQUESTS_TOTAL
            .with_label_values(&[op, outcome_label(&res)])
            .inc();
        res
    }
}

async fn send<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T> {
    let resp = req.send().await.map_err(transport)?;
    let status = resp.status();
    debug!(url = %resp.url(), %status, "backend response");
    let body = resp.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(GaiaError::Rejected {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| GaiaError::Decode(e.to_string()))
}

fn transport(e: reqwest::Error) -> GaiaError {
    if e.is_timeout() {
        GaiaError::Transport(format!("timed out: {e}"))
    } else {
        GaiaError::Transport(e.to_string())
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        let req = self.client.get(self.url(DATASETS_PATH));
        let list: DatasetList = self.execute("list_datasets", req).await?;
        Ok(list.into_datasets())
    }

    async fn discover_dataset(&self, dataset_id: &str) -> Result<DiscoveryReply> {
        let req = self
            .client
            .get(self.url(&discovery_path(dataset_id)))
            .query(&[("level", "1"), ("numLevels", "2")]);
        self.execute("discover_dataset", req).await
    }

    async fn search_objects(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>> {
        if query.file_type.is_some()
            || query.file_greater_than_kb.is_some()
            || query.file_less_than_kb.is_some()
        {
            debug!(
                file_type = ?query.file_type,
                gt_kb = ?query.file_greater_than_kb,
                lt_kb = ?query.file_less_than_kb,
                "file filters are not forwarded to the backend"
            );
        }
        let req = self
            .client
            .get(self.url(OBJECTS_PATH))
            .query(&query.backend_params());
        let list: ObjectList = self.execute("search_objects", req).await?;
        Ok(list.into_documents())
    }

    async fn ask(&self, req: &AskRequest) -> Result<AskResponse> {
        debug!(
            datasets = ?req.dataset_names,
            llm_id = %req.llm_id,
            history = req.history.len(),
            "ask"
        );
        let builder = self
            .ask_client
            .post(self.url(ASK_PATH))
            .timeout(self.config.ask_timeout)
            .json(req);
        let reply: AskReply = self.execute("ask", builder).await?;
        Ok(reply.into())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
