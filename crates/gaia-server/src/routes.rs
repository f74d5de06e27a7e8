use crate::handlers::{
    discover_tools_endpoint, gaia_qa, health, list_datasets, list_datasets_descriptions, metrics,
    search_objects, AppState,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Active routes, plus the dataset/search/discovery routes when `latent_routes` is set.
pub fn create_router(state: AppState, latent_routes: bool) -> Router {
    let mut router = Router::new()
        .route("/gaia_qa", post(gaia_qa))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics));
    if latent_routes {
        router = router
            .route("/list_datasets", post(list_datasets))
            .route("/list_datasets_descriptions", post(list_datasets_descriptions))
            .route("/search_objects", post(search_objects))
            .route("/discover_tools", post(discover_tools_endpoint));
    }
    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use gaia_client::InMemoryBackend;
    use gaia_core::{AskReply, DiscoveryReply};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(backend: InMemoryBackend, latent: bool) -> Router {
        create_router(
            AppState {
                backend: Arc::new(backend),
            },
            latent,
        )
    }

    async fn call(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = router.oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn ask_reply(v: Value) -> AskReply {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_without_backend() {
        let (status, body) = call(app(InMemoryBackend::default(), false), "GET", "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn qa_with_defaults_flattens_citations() {
        let backend = InMemoryBackend::default().with_ask_reply(ask_reply(json!({
            "responseString": "X is ...",
            "documents": [
                {"citations": [{"source": "doc1"}]},
                {"citations": [{"source": "doc2"}]}
            ]
        })));
        let (status, body) = call(
            app(backend.clone(), false),
            "POST",
            "/gaia_qa",
            Some(json!({"question": "What is X?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "responseString": "X is ...",
                "citations": [{"source": "doc1"}, {"source": "doc2"}]
            })
        );

        let asked = backend.asked();
        assert_eq!(asked.len(), 1);
        assert_eq!(asked[0].query_string, "What is X?");
        assert_eq!(asked[0].dataset_names, vec!["ashok_test", "vpangha_qure6"]);
        assert_eq!(asked[0].llm_name, "Cohesity LLM Advanced");
        assert_eq!(asked[0].llm_id, "ADV");
        assert!(asked[0].history.is_empty());
    }

    #[tokio::test]
    async fn qa_forwards_overrides() {
        let backend = InMemoryBackend::default().with_ask_reply(ask_reply(json!({})));
        let (status, body) = call(
            app(backend.clone(), false),
            "POST",
            "/gaia_qa",
            Some(json!({
                "question": "and then?",
                "dataset_names": ["contracts"],
                "llm_name": "Fast",
                "llm_id": "FST",
                "history": [{"role": "user", "content": "hi"}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"responseString": "", "citations": []}));

        let asked = &backend.asked()[0];
        assert_eq!(asked.dataset_names, vec!["contracts"]);
        assert_eq!(asked.llm_name, "Fast");
        assert_eq!(asked.llm_id, "FST");
        assert_eq!(asked.history.len(), 1);
    }

    #[tokio::test]
    async fn qa_backend_503_becomes_500_with_detail() {
        let (status, body) = call(
            app(InMemoryBackend::default(), false),
            "POST",
            "/gaia_qa",
            Some(json!({"question": "anyone there?"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error in ask:"), "{detail}");
        assert!(detail.contains("503"), "{detail}");
    }

    #[tokio::test]
    async fn qa_missing_question_is_422_before_backend() {
        let backend = InMemoryBackend::default();
        let (status, body) = call(
            app(backend.clone(), false),
            "POST",
            "/gaia_qa",
            Some(json!({"dataset_names": ["x"]})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("question"));
        assert!(backend.asked().is_empty());
    }

    #[tokio::test]
    async fn latent_routes_are_off_by_default() {
        let router = app(InMemoryBackend::default(), false);
        for uri in [
            "/list_datasets",
            "/list_datasets_descriptions",
            "/search_objects",
            "/discover_tools",
        ] {
            let (status, _) = call(router.clone(), "POST", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    fn catalogue() -> InMemoryBackend {
        let described = |s: &str| -> DiscoveryReply {
            serde_json::from_value(json!({"results": [{"description": s}]})).unwrap()
        };
        InMemoryBackend::default()
            .with_dataset("d1", "finance", None)
            .with_dataset("d2", "legal", None)
            .with_dataset("d3", "archive", None)
            .with_discovery("d1", described("Ledgers and reports"))
            .fail_discovery("d2")
    }

    #[tokio::test]
    async fn list_datasets_route() {
        let (status, body) = call(app(catalogue(), true), "POST", "/list_datasets", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["finance", "legal", "archive"]);

        let backend = InMemoryBackend::default().with_dataset("d9", "hr", Some("Payroll"));
        let (status, body) = call(app(backend, true), "POST", "/list_datasets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": "d9", "name": "hr"}]));
    }

    #[tokio::test]
    async fn descriptions_and_tools_routes() {
        let (status, body) = call(
            app(catalogue(), true),
            "POST",
            "/list_datasets_descriptions",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"dataset_id": "d1", "dataset_name": "finance", "description": "Ledgers and reports"},
                {"dataset_id": "d2", "dataset_name": "legal", "description": null},
                {"dataset_id": "d3", "dataset_name": "archive", "description": null}
            ])
        );

        let (status, body) = call(app(catalogue(), true), "POST", "/discover_tools", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[1]["description"], Value::Null);
        assert_eq!(body[2]["description"], json!(""));
    }

    #[tokio::test]
    async fn search_route_builds_backend_query() {
        let backend = InMemoryBackend::default().with_object(
            json!({"id": "o1", "text": "net 30 terms", "fileType": "pdf"})
                .as_object()
                .unwrap()
                .clone(),
        );
        let (status, body) = call(app(backend.clone(), true), "POST", "/search_objects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": "o1",
                "text": "net 30 terms",
                "metadata": {"id": "o1", "text": "net 30 terms", "fileType": "pdf"}
            }])
        );

        let (status, _) = call(
            app(backend.clone(), true),
            "POST",
            "/search_objects",
            Some(json!({"keyword": "terms", "semantic_search_string": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let searches = backend.searches();
        assert_eq!(searches[0], vec![("objectTypes", "file".to_string())]);
        assert_eq!(
            searches[1],
            vec![
                ("objectTypes", "file".to_string()),
                ("keyword", "terms".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn search_ignores_inverted_size_range() {
        let backend = InMemoryBackend::default().with_object(
            json!({"id": "o1", "text": "q3 report"}).as_object().unwrap().clone(),
        );
        let (status, body) = call(
            app(backend.clone(), true),
            "POST",
            "/search_objects",
            Some(json!({"file_gt_kb": 100, "file_lt_kb": 1, "keyword": "report"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(
            backend.searches(),
            vec![vec![
                ("objectTypes", "file".to_string()),
                ("keyword", "report".to_string()),
            ]]
        );
    }

    #[tokio::test]
    async fn metrics_route_renders_text() {
        let router = app(InMemoryBackend::default(), false);
        let resp = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
