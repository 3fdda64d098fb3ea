//! Index command - builds the collections and prints the report

use std::path::PathBuf;

pub async fn run(knowledge: Option<PathBuf>) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    super::print_json(service.last_report())
}
