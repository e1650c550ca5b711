//! Analysis of a word-form.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// One accepting path through the transducer.
///
/// Analyses come back in path order; sorting them is up to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// the output string of the path, e.g. `kissa+N+Sg+Nom`
    pub output: SmolStr,
    /// total weight of the path, `0.0` for unweighted transducers
    pub weight: f64,
}

impl Analysis {
    /// Creates an analysis from an output string and path weight
    pub fn new(output: SmolStr, weight: f64) -> Analysis {
        Analysis { output, weight }
    }

    /// gets the output string
    pub fn output(&self) -> &str {
        &self.output
    }

    /// gets the path weight
    pub fn weight(&self) -> f64 {
        self.weight
    }
}
