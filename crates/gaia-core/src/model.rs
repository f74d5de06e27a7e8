use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

pub type DatasetId = String;
pub type JsonMap = serde_json::Map<String, JsonValue>;

pub const DEFAULT_LLM_NAME: &str = "Cohesity LLM Advanced";
pub const DEFAULT_LLM_ID: &str = "ADV";
pub const DEFAULT_DATASET_NAMES: [&str; 2] = ["ashok_test", "vpangha_qure6"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: DatasetId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Missing and `null` strings both read as `""`.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Body of `GET /datasets`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetList {
    #[serde(default)]
    pub datasets: Option<Vec<Dataset>>,
}

impl DatasetList {
    pub fn into_datasets(self) -> Vec<Dataset> {
        self.datasets.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescription {
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub description: Option<String>,
}

impl DatasetDescription {
    pub fn new(dataset: &Dataset, description: Option<String>) -> Self {
        Self {
            dataset_id: dataset.id.clone(),
            dataset_name: dataset.name.clone(),
            description,
        }
    }
}

/// What a successful discovery call with an empty `results` list resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFallback {
    /// `null` description (dataset descriptions listing).
    Null,
    /// `""` description (tool discovery).
    Blank,
}

/// Body of `GET /dataset/{id}/discovery`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryReply {
    #[serde(default)]
    pub results: Option<Vec<JsonValue>>,
}

impl DiscoveryReply {
    /// Description carried by the first result.
    ///
    /// A first result without a `description` key yields `""`, an explicit
    /// `null` stays null, and non-string values are rendered as JSON text.
    pub fn description(&self, fallback: DescriptionFallback) -> Option<String> {
        let first = match self.results.as_deref().and_then(|r| r.first()) {
            Some(first) => first,
            None => {
                return match fallback {
                    DescriptionFallback::Null => None,
                    DescriptionFallback::Blank => Some(String::new()),
                }
            }
        };
        match first.get("description") {
            None => Some(String::new()),
            Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub id: String,
    pub text: Option<String>,
    pub metadata: JsonMap,
}

impl DocumentResult {
    /// Wraps a raw backend object; the object itself becomes the metadata.
    pub fn from_object(object: JsonMap) -> Self {
        let id = match object.get("id") {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let text = object
            .get("text")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self {
            id,
            text,
            metadata: object,
        }
    }
}

/// Body of `GET /objects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub objects: Option<Vec<JsonMap>>,
}

impl ObjectList {
    pub fn into_documents(self) -> Vec<DocumentResult> {
        self.objects
            .unwrap_or_default()
            .into_iter()
            .map(DocumentResult::from_object)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub llm_name: String,
    pub dataset_names: Vec<String>,
    pub llm_id: String,
    pub query_string: String,
    #[serde(default)]
    pub history: Vec<JsonValue>,
}

impl AskRequest {
    /// A question against the default datasets and model, with no history.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            llm_name: DEFAULT_LLM_NAME.to_string(),
            dataset_names: DEFAULT_DATASET_NAMES.iter().map(|s| s.to_string()).collect(),
            llm_id: DEFAULT_LLM_ID.to_string(),
            query_string: question.into(),
            history: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(rename = "responseString")]
    pub response_string: String,
    pub citations: Vec<JsonMap>,
}

/// Body of `POST /ask`. Only the fields the adapter reads are modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskReply {
    #[serde(rename = "responseString", default)]
    pub response_string: Option<String>,
    #[serde(default)]
    pub documents: Option<Vec<AskDocument>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskDocument {
    #[serde(default)]
    pub citations: Option<Vec<JsonMap>>,
}

impl From<AskReply> for AskResponse {
    fn from(reply: AskReply) -> Self {
        let citations = reply
            .documents
            .unwrap_or_default()
            .into_iter()
            .flat_map(|doc| doc.citations.unwrap_or_default())
            .collect();
        Self {
            response_string: reply.response_string.unwrap_or_default(),
            citations,
        }
    }
}
