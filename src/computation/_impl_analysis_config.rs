use crate::computation::{AnalysisConfig, UpdateSemantics};

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            semantics: UpdateSemantics::Synchronous,
            node_limit: None,
            reduce: true,
        }
    }
}

impl AnalysisConfig {
    pub fn with_semantics(mut self, semantics: UpdateSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_node_limit(mut self, node_limit: Option<usize>) -> Self {
        self.node_limit = node_limit;
        self
    }

    pub fn with_reduction(mut self, reduce: bool) -> Self {
        self.reduce = reduce;
        self
    }
}
