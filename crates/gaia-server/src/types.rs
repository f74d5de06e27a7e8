use gaia_core::{AskRequest, Dataset, DatasetId, SearchQuery, DEFAULT_DATASET_NAMES, DEFAULT_LLM_ID, DEFAULT_LLM_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// `POST /gaia_qa` body.
#[derive(Debug, Clone, Deserialize)]
pub struct AskBody {
    pub question: String,
    #[serde(default = "default_dataset_names")]
    pub dataset_names: Vec<String>,
    #[serde(default = "default_llm_name")]
    pub llm_name: String,
    #[serde(default = "default_llm_id")]
    pub llm_id: String,
    #[serde(default)]
    pub history: Vec<JsonValue>,
}

fn default_dataset_names() -> Vec<String> {
    DEFAULT_DATASET_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_llm_name() -> String {
    DEFAULT_LLM_NAME.to_string()
}

fn default_llm_id() -> String {
    DEFAULT_LLM_ID.to_string()
}

impl From<AskBody> for AskRequest {
    fn from(b: AskBody) -> Self {
        AskRequest {
            llm_name: b.llm_name,
            dataset_names: b.dataset_names,
            llm_id: b.llm_id,
            query_string: b.question,
            history: b.history,
        }
    }
}

/// `POST /search_objects` body; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchObjectsBody {
    pub keyword: Option<String>,
    pub semantic_search_string: Option<String>,
    pub object_types: Option<Vec<String>>,
    pub file_type: Option<Vec<String>>,
    pub file_gt_kb: Option<u64>,
    pub file_lt_kb: Option<u64>,
}

impl From<SearchObjectsBody> for SearchQuery {
    fn from(b: SearchObjectsBody) -> Self {
        SearchQuery {
            keyword: b.keyword,
            semantic_search_string: b.semantic_search_string,
            object_types: b.object_types,
            file_type: b.file_type,
            file_greater_than_kb: b.file_gt_kb,
            file_less_than_kb: b.file_lt_kb,
        }
    }
}

/// One entry of the `POST /list_datasets` reply.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub name: String,
}

impl From<Dataset> for DatasetSummary {
    fn from(d: Dataset) -> Self {
        DatasetSummary {
            id: d.id,
            name: d.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
