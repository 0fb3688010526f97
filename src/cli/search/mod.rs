//! `indexes` and `search` commands

use clap::{ArgGroup, Args};

use super::context::CliContext;
use crate::domain::{IndexDescription, QueryResponse, VectorStore, DEFAULT_TOP_K};
use crate::infrastructure::services::SearchService;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("probe").required(true).args(["text", "random"])))]
pub struct SearchArgs {
    /// Embed this text with Gemini and search for it
    #[arg(short, long)]
    pub text: Option<String>,

    /// Search with a random probe vector
    #[arg(long)]
    pub random: bool,

    /// Number of matches to return
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: u32,

    /// Namespace to query; defaults to the configured one
    #[arg(short, long)]
    pub namespace: Option<String>,
}

pub async fn list_indexes(ctx: &CliContext) -> anyhow::Result<()> {
    let store = ctx.pinecone_store()?;
    let indexes = store.list_indexes().await?;

    if indexes.is_empty() {
        println!("No indexes found in environment '{}'.", store.environment());
        return Ok(());
    }

    for index in &indexes {
        println!("{}", format_index(index));
    }
    Ok(())
}

pub async fn run(ctx: &CliContext, args: SearchArgs) -> anyhow::Result<()> {
    let namespace = args
        .namespace
        .clone()
        .or_else(|| ctx.config().pinecone.namespace.clone());

    let service = ctx.search_service(args.text.is_some()).await?;
    println!("Querying Pinecone index '{}'...", service.index().name);

    let response = match &args.text {
        Some(text) => {
            service
                .search_text(text, args.top_k, namespace.as_deref())
                .await?
        }
        None => {
            let vector = SearchService::random_vector(service.probe_dimension());
            service
                .search_vector(vector, args.top_k, namespace.as_deref())
                .await?
        }
    };

    print!("{}", format_matches(&response));
    Ok(())
}

fn format_index(index: &IndexDescription) -> String {
    format!(
        "{} (dimension {}, metric {}) {}",
        index.name, index.dimension, index.metric, index.host
    )
}

fn format_matches(response: &QueryResponse) -> String {
    if response.matches.is_empty() {
        return "No matches found.\n".to_string();
    }

    let mut out = String::new();
    for (rank, m) in response.matches.iter().enumerate() {
        out.push_str(&format!("{}. {} (score {:.4})\n", rank + 1, m.id, m.score));

        if !m.metadata.is_empty() {
            let mut keys: Vec<&String> = m.metadata.keys().collect();
            keys.sort();
            for key in keys {
                out.push_str(&format!("   {}: {}\n", key, m.metadata[key]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoredMatch;

    #[test]
    fn test_format_matches() {
        let response = QueryResponse {
            namespace: String::new(),
            matches: vec![
                ScoredMatch::new("doc-1", 0.92)
                    .with_metadata("title", serde_json::json!("App crashes"))
                    .with_metadata("category", serde_json::json!("support")),
                ScoredMatch::new("doc-2", 0.5),
            ],
        };

        assert_eq!(
            format_matches(&response),
            "1. doc-1 (score 0.9200)\n   category: \"support\"\n   title: \"App crashes\"\n2. doc-2 (score 0.5000)\n"
        );
    }

    #[test]
    fn test_format_no_matches() {
        let response = QueryResponse {
            namespace: "faq".to_string(),
            matches: Vec::new(),
        };
        assert_eq!(format_matches(&response), "No matches found.\n");
    }

    #[test]
    fn test_format_index() {
        let index = IndexDescription {
            name: "faq-index".to_string(),
            host: "faq-index-abc.svc.pinecone.io".to_string(),
            dimension: 768,
            metric: "cosine".to_string(),
        };
        assert_eq!(
            format_index(&index),
            "faq-index (dimension 768, metric cosine) faq-index-abc.svc.pinecone.io"
        );
    }
}
