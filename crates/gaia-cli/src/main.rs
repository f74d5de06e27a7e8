use anyhow::Result;
use clap::{Parser, Subcommand};
use gaia_client::{
    discover_tools, list_dataset_descriptions, Backend, BackendConfig, HttpBackend,
};
use gaia_core::{AskRequest, SearchQuery};
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gaia")]
#[command(about = "Query the Gaia backend directly", long_about = None)]
struct Cli {
    /// Overrides GAIA_HOST.
    #[arg(long, global = true)]
    host: Option<String>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List accessible datasets.
    Datasets,
    /// Datasets with their discovery descriptions.
    Describe,
    /// Like `describe`, with blank descriptions for datasets discovery knows nothing about.
    Discover,
    Search {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        semantic: Option<String>,
        #[arg(long = "object-type")]
        object_types: Vec<String>,
        #[arg(long = "file-type")]
        file_types: Vec<String>,
        #[arg(long)]
        min_kb: Option<u64>,
        #[arg(long)]
        max_kb: Option<u64>,
    },
    Ask {
        question: String,
        #[arg(long = "dataset")]
        datasets: Vec<String>,
        #[arg(long)]
        llm_name: Option<String>,
        #[arg(long)]
        llm_id: Option<String>,
    },
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn non_empty(v: Vec<String>) -> Option<Vec<String>> {
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = BackendConfig::from_env();
    if let Some(host) = cli.host {
        cfg.host = host;
    }
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(cfg)?);

    match cli.cmd {
        Cmd::Datasets => print(&backend.list_datasets().await?)?,
        Cmd::Describe => print(&list_dataset_descriptions(backend).await?)?,
        Cmd::Discover => print(&discover_tools(backend).await?)?,
        Cmd::Search {
            keyword,
            semantic,
            object_types,
            file_types,
            min_kb,
            max_kb,
        } => {
            let query = SearchQuery {
                keyword,
                semantic_search_string: semantic,
                object_types: non_empty(object_types),
                file_type: non_empty(file_types),
                file_greater_than_kb: min_kb,
                file_less_than_kb: max_kb,
            };
            print(&backend.search_objects(&query).await?)?
        }
        Cmd::Ask {
            question,
            datasets,
            llm_name,
            llm_id,
        } => {
            let mut req = AskRequest::new(question);
            if !datasets.is_empty() {
                req.dataset_names = datasets;
            }
            if let Some(name) = llm_name {
                req.llm_name = name;
            }
            if let Some(id) = llm_id {
                req.llm_id = id;
            }
            print(&backend.ask(&req).await?)?
        }
    }
    Ok(())
}
