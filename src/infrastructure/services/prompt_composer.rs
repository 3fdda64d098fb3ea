//! Prompt composer - Static agent briefing built from the whole knowledge base

use crate::domain::KnowledgeStore;

const CLOSING_GUIDANCE: &str = "Your goal is to engage with prospective clients, understand their needs, \
and recommend the services that fit them. Rely on the knowledge base for accurate details about our \
services and capabilities. Keep a professional yet friendly tone and stay clear and concise.";

/// Renders the briefing that seeds an agent's initial context
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Company profile, then every service in catalog order, then guidance
    pub fn build_static_briefing(&self, store: &KnowledgeStore) -> String {
        let company = store.get_company_info();

        let mut briefing = format!(
            "You are the AI Chat Agent for {}, {}\n\n",
            company.name(),
            company.description()
        );
        briefing.push_str(&format!(
            "Our core values are: {}\n\n",
            company.values().join(", ")
        ));
        briefing.push_str("We offer the following services:\n");

        for service in store.get_all_services() {
            briefing.push_str(&format!("- {}: {}\n", service.name(), service.description()));
            briefing.push_str(&format!("  Features: {}\n", service.features().join(", ")));
        }

        briefing.push('\n');
        briefing.push_str(CLOSING_GUIDANCE);

        briefing
    }
}
