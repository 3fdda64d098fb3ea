//! Structured lookups: services, company profile and briefing

use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service name, compared ignoring case
    pub name: String,
}

pub async fn service(knowledge: Option<PathBuf>, args: ServiceArgs) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    match service.get_service_by_name(&args.name) {
        Some(found) => super::print_json(found),
        None => anyhow::bail!("No service named '{}'", args.name),
    }
}

pub async fn services(knowledge: Option<PathBuf>) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    super::print_json(&service.get_all_services())
}

pub async fn company(knowledge: Option<PathBuf>) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    super::print_json(service.get_company_info())
}

pub async fn briefing(knowledge: Option<PathBuf>) -> anyhow::Result<()> {
    let service = super::bootstrap(knowledge).await?;

    println!("{}", service.build_static_briefing());
    Ok(())
}
