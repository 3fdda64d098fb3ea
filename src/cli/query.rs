//! Query command - per-category similarity query

use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Free-text query; may be empty
    pub text: String,

    /// Hits per category; the company profile is always capped at one
    #[arg(short = 'n', long = "n-results")]
    pub n_results: Option<usize>,
}

pub async fn run(knowledge: Option<PathBuf>, args: QueryArgs) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    let bundle = match args.n_results {
        Some(n) => service.query_knowledge(&args.text, n).await,
        None => service.query_knowledge_default(&args.text).await,
    };

    super::print_json(&bundle)
}
