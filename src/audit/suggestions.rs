//! Improvement suggestion generator.

use std::sync::Arc;

use super::SuggestionSource;
use crate::models::{Grid, Suggestion, SuggestionType};

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Built-in source that proposes nothing.
#[derive(Debug, Clone, Copy)]
struct NoSuggestions(SuggestionType);

impl SuggestionSource for NoSuggestions {
    fn name(&self) -> &'static str {
        match self.0 {
            SuggestionType::TaskSwap => "task_swap",
            SuggestionType::BreakTime => "break_time",
            SuggestionType::Reassignment => "reassignment",
            SuggestionType::SkillTraining => "skill_training",
        }
    }

    fn suggest(&self, _grid: &Grid) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// Collects suggestions from one source per [`SuggestionType`] and ranks them.
#[derive(Clone)]
pub struct SuggestionGenerator {
    sources: Vec<(SuggestionType, Arc<dyn SuggestionSource>)>,
}

impl SuggestionGenerator {
    /// Creates a generator with the built-in (empty) source in every slot.
    pub fn new() -> Self {
        Self {
            sources: SuggestionType::ALL
                .iter()
                .map(|&t| (t, Arc::new(NoSuggestions(t)) as Arc<dyn SuggestionSource>))
                .collect(),
        }
    }

    /// Replaces the source for one suggestion type.
    pub fn with_source<S: SuggestionSource + 'static>(
        mut self,
        suggestion_type: SuggestionType,
        source: S,
    ) -> Self {
        let source: Arc<dyn SuggestionSource> = Arc::new(source);
        match self.sources.iter_mut().find(|(t, _)| *t == suggestion_type) {
            Some(slot) => slot.1 = source,
            None => self.sources.push((suggestion_type, source)),
        }
        self
    }

    /// Merges all sources, ranks by estimated improvement (highest first,
    /// stable) and keeps the top [`MAX_SUGGESTIONS`].
    pub fn generate(&self, grid: &Grid) -> Vec<Suggestion> {
        let mut all: Vec<Suggestion> = self
            .sources
            .iter()
            .flat_map(|(_, s)| s.suggest(grid))
            .collect();
        all.sort_by(|a, b| b.estimated_improvement.total_cmp(&a.estimated_improvement));
        all.truncate(MAX_SUGGESTIONS);
        all
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SuggestionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|(_, s)| s.name()).collect();
        f.debug_struct("SuggestionGenerator")
            .field("sources", &names)
            .finish()
    }
}
