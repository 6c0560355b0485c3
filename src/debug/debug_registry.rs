use super::debug_trace::{DebugSection, DebugTrace};
use std::sync::{Arc, RwLock};

/// Providers that contribute to the debug report, in registration order
#[derive(Default)]
pub struct DebugRegistry {
    providers: RwLock<Vec<Arc<dyn DebugTrace>>>,
}

impl DebugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any with the same name
    pub fn register(&self, provider: Arc<dyn DebugTrace>) {
        if let Ok(mut providers) = self.providers.write() {
            let name = provider.name();
            providers.retain(|p| p.name() != name);
            providers.push(provider);
        }
    }

    /// Sections from every provider grouped by kind. Within a kind,
    /// providers keep their registration order.
    pub fn collect_debug_sections(&self) -> Vec<DebugSection> {
        let mut sections: Vec<DebugSection> = match self.providers.read() {
            Ok(providers) => providers.iter().flat_map(|p| p.debug_sections()).collect(),
            Err(_) => Vec::new(),
        };
        sections.sort_by_key(|s| s.kind);
        sections
    }

    pub fn generate_debug_report(&self) -> String {
        self.collect_debug_sections()
            .iter()
            .map(DebugSection::to_string)
            .collect()
    }

    /// (name, summary) for every provider that has one
    pub fn collect_summaries(&self) -> Vec<(String, String)> {
        match self.providers.read() {
            Ok(providers) => providers
                .iter()
                .filter_map(|p| p.debug_summary().map(|s| (p.name().to_string(), s)))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
