//! Morphological analysis: every output a transducer pairs with a word.
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use self::worker::AnalyzerWorker;
use crate::transducer::{HfstTransducer, TransitionTable, TransitionTables};
use crate::types::SymbolNumber;

pub mod analysis;
pub mod error;
mod index_list;
mod worker;

pub use self::analysis::Analysis;
pub use self::error::AnalyzerError;
pub use self::index_list::IndexList;

/// Default bound on nested state visits along a single path.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Per-call analysis settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Deepest path, in states, before the traversal gives up
    pub max_depth: usize,
    /// Drop analyses with the same output and weight as an earlier one
    pub deduplicate: bool,
}

impl AnalyzerConfig {
    /// The default configuration, usable in `const` contexts.
    pub const fn default() -> AnalyzerConfig {
        AnalyzerConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            deduplicate: false,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig::default()
    }
}

/// Lists the analyses of a word.
pub trait Analyzer {
    /// Analyses of `word` with the default configuration.
    fn analyze(&self, word: &str) -> Result<Vec<Analysis>, AnalyzerError>;
    /// Analyses of `word` with `config`. Unknown words give an empty list.
    fn analyze_with_config(
        &self,
        word: &str,
        config: &AnalyzerConfig,
    ) -> Result<Vec<Analysis>, AnalyzerError>;
}

impl Analyzer for HfstTransducer {
    #[inline]
    fn analyze(&self, word: &str) -> Result<Vec<Analysis>, AnalyzerError> {
        self.analyze_with_config(word, &AnalyzerConfig::default())
    }

    fn analyze_with_config(
        &self,
        word: &str,
        config: &AnalyzerConfig,
    ) -> Result<Vec<Analysis>, AnalyzerError> {
        log::trace!("Beginning analysis of {:?}", word);

        let input = match self.tokenize(word) {
            Some(input) if !input.is_empty() => input,
            _ => return Ok(vec![]),
        };

        let analyses = match &self.transition_table {
            TransitionTables::Simple(t) => self.analyze_input(t, &input, config)?,
            TransitionTables::Weighted(t) => self.analyze_input(t, &input, config)?,
        };

        if config.deduplicate {
            Ok(analyses
                .into_iter()
                .unique_by(|a| (a.output.clone(), a.weight.to_bits()))
                .collect())
        } else {
            Ok(analyses)
        }
    }
}

impl HfstTransducer {
    #[inline(always)]
    fn analyze_input<T: TransitionTable>(
        &self,
        transition_table: &T,
        input: &[SymbolNumber],
        config: &AnalyzerConfig,
    ) -> Result<Vec<Analysis>, AnalyzerError> {
        AnalyzerWorker::new(self.alphabet(), &self.index_table, transition_table, config)
            .analyze(input)
    }
}
