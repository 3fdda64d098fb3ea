use clap::Parser;
use knowledge_retrieval::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Index => cli::index::run(cli.knowledge).await,
        Command::Query(args) => cli::query::run(cli.knowledge, args).await,
        Command::Service(args) => cli::lookup::service(cli.knowledge, args).await,
        Command::Services => cli::lookup::services(cli.knowledge).await,
        Command::Company => cli::lookup::company(cli.knowledge).await,
        Command::Briefing => cli::lookup::briefing(cli.knowledge).await,
    }
}
