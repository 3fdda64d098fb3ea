//! CLI module for Knowledge Retrieval
//!
//! Every subcommand loads the knowledge base and indexes it before acting:
//! - `index`: build the collections and print the indexing report
//! - `query`: run a per-category similarity query
//! - `service`, `services`, `company`: structured lookups
//! - `briefing`: print the static agent briefing

pub mod index;
pub mod lookup;
pub mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::KnowledgeService;

/// Knowledge Retrieval - Semantic lookups over a business knowledge base
#[derive(Parser)]
#[command(name = "knowledge-retrieval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Knowledge base JSON file, overrides `knowledge.source_path`
    #[arg(long, global = true, value_name = "PATH")]
    pub knowledge: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the semantic collections and print the report
    Index,

    /// Query every category for the given text
    Query(query::QueryArgs),

    /// Look up a service by name, ignoring case
    Service(lookup::ServiceArgs),

    /// List every service
    Services,

    /// Show the company profile
    Company,

    /// Print the static agent briefing
    Briefing,
}

/// Shared startup: environment, configuration, logging, indexing
pub(crate) async fn bootstrap(knowledge: Option<PathBuf>) -> anyhow::Result<KnowledgeService> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(path) = knowledge {
        config.knowledge.source_path = path;
    }

    logging::init_logging(&config.logging);

    crate::create_knowledge_service_with_config(&config).await
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_with_global_knowledge() {
        let cli = Cli::parse_from([
            "knowledge-retrieval",
            "query",
            "opening hours",
            "-n",
            "3",
            "--knowledge",
            "kb.json",
        ]);

        assert_eq!(cli.knowledge, Some(PathBuf::from("kb.json")));
        match cli.command {
            Command::Query(args) => {
                assert_eq!(args.text, "opening hours");
                assert_eq!(args.n_results, Some(3));
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_parse_service_lookup() {
        let cli = Cli::parse_from(["knowledge-retrieval", "service", "web dev"]);

        assert!(cli.knowledge.is_none());
        assert!(matches!(cli.command, Command::Service(ref args) if args.name == "web dev"));
    }

    #[test]
    fn test_query_defaults_to_configured_count() {
        let cli = Cli::parse_from(["knowledge-retrieval", "query", ""]);

        assert!(matches!(cli.command, Command::Query(ref args) if args.n_results.is_none()));
    }
}
