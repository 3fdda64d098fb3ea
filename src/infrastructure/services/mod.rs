//! Infrastructure services

mod indexer;
mod knowledge_service;
mod prompt_composer;
mod query_engine;

pub use indexer::{
    build_records, render_company, render_faq, render_service, CategoryReport, IndexReport,
    Indexer, COMPANY_RECORD_ID,
};
pub use knowledge_service::{KnowledgeService, KnowledgeServiceSettings};
pub use prompt_composer::PromptComposer;
pub use query_engine::{QueryEngine, QueryResultBundle, COMPANY_RESULT_CAP};
