use crate::util::non_empty;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OBJECT_TYPE: &str = "file";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub semantic_search_string: Option<String>,
    #[serde(alias = "objectTypes")]
    pub object_types: Option<Vec<String>>,
    pub file_type: Option<Vec<String>>,
    pub file_greater_than_kb: Option<u64>,
    pub file_less_than_kb: Option<u64>,
}

impl SearchQuery {
    /// Object types to request; unset or empty means `["file"]`.
    pub fn effective_object_types(&self) -> Vec<String> {
        match &self.object_types {
            Some(types) if !types.is_empty() => types.clone(),
            _ => vec![DEFAULT_OBJECT_TYPE.to_string()],
        }
    }

    /// Query-string pairs for `GET /objects`. Object types repeat the key once per value;
    /// keyword and semantic string only appear when they carry text.
    pub fn backend_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = self
            .effective_object_types()
            .into_iter()
            .map(|t| ("objectTypes", t))
            .collect();
        if let Some(s) = non_empty(self.semantic_search_string.as_deref()) {
            params.push(("semanticSearchString", s.to_string()));
        }
        if let Some(k) = non_empty(self.keyword.as_deref()) {
            params.push(("keyword", k.to_string()));
        }
        params
    }
}
