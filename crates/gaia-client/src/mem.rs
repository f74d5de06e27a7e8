use crate::traits::Backend;
use gaia_core::{
    AskReply, AskRequest, AskResponse, Dataset, DiscoveryReply, DocumentResult, GaiaError,
    JsonMap, Result, SearchQuery,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Canned backend contents, loadable from a JSON file.
///
/// A dataset whose `discovery` entry is absent or `null` fails discovery; an
/// absent `ask` reply makes ask calls fail with a 503 rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub discovery: HashMap<String, Option<DiscoveryReply>>,
    #[serde(default)]
    pub objects: Vec<JsonMap>,
    #[serde(default)]
    pub ask: Option<AskReply>,
}

/// Backend that answers from a [`Fixture`] and records what it was asked.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    fixture: Fixture,
    asked: Vec<AskRequest>,
    searches: Vec<Vec<(&'static str, String)>>,
}

impl InMemoryBackend {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                fixture,
                ..Default::default()
            })),
        }
    }

    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GaiaError::Internal(format!("read {}: {e}", path.display())))?;
        let fixture: Fixture = serde_json::from_str(&raw)
            .map_err(|e| GaiaError::Internal(format!("parse {}: {e}", path.display())))?;
        Ok(Self::new(fixture))
    }

    pub fn with_dataset(self, id: &str, name: &str, description: Option<&str>) -> Self {
        {
            let mut w = self.inner.write();
            w.fixture.datasets.push(Dataset {
                id: id.to_string(),
                name: name.to_string(),
                description: description.map(str::to_string),
            });
            // a dataset starts with an empty, successful discovery reply
            w.fixture
                .discovery
                .entry(id.to_string())
                .or_insert_with(|| Some(DiscoveryReply::default()));
        }
        self
    }

    pub fn with_discovery(self, id: &str, reply: DiscoveryReply) -> Self {
        self.inner
            .write()
            .fixture
            .discovery
            .insert(id.to_string(), Some(reply));
        self
    }

    pub fn fail_discovery(self, id: &str) -> Self {
        self.inner
            .write()
            .fixture
            .discovery
            .insert(id.to_string(), None);
        self
    }

    pub fn with_object(self, object: JsonMap) -> Self {
        self.inner.write().fixture.objects.push(object);
        self
    }

    pub fn with_ask_reply(self, reply: AskReply) -> Self {
        self.inner.write().fixture.ask = Some(reply);
        self
    }

    /// Ask requests received so far, oldest first.
    pub fn asked(&self) -> Vec<AskRequest> {
        self.inner.read().asked.clone()
    }

    /// Backend query parameters of each search received so far.
    pub fn searches(&self) -> Vec<Vec<(&'static str, String)>> {
        self.inner.read().searches.clone()
    }
}

#[async_trait::async_trait]
impl Backend for InMemoryBackend {
    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        Ok(self.inner.read().fixture.datasets.clone())
    }

    async fn discover_dataset(&self, dataset_id: &str) -> Result<DiscoveryReply> {
        match self.inner.read().fixture.discovery.get(dataset_id) {
            Some(Some(reply)) => Ok(reply.clone()),
            _ => Err(GaiaError::Transport(format!(
                "discovery unavailable for dataset {dataset_id}"
            ))),
        }
    }

    async fn search_objects(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>> {
        let mut w = self.inner.write();
        w.searches.push(query.backend_params());
        Ok(w
            .fixture
            .objects
            .iter()
            .cloned()
            .map(DocumentResult::from_object)
            .collect())
    }

    async fn ask(&self, req: &AskRequest) -> Result<AskResponse> {
        let mut w = self.inner.write();
        w.asked.push(req.clone());
        match &w.fixture.ask {
            Some(reply) => Ok(reply.clone().into()),
            None => Err(GaiaError::Rejected {
                status: 503,
                body: "ask service unavailable".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
