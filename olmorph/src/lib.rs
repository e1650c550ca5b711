/*! Morphological analysis with HFST optimized-lookup transducers.

Reads transducers compiled to the optimized lookup format by [`HFST`] and
lists every analysis a transducer gives for a word, following flag
diacritics and summing path weights.

[`HFST`]: (https://hfst.github.io)

# Usage examples

```no_run
use olmorph::analyzer::Analyzer;
use olmorph::transducer::HfstTransducer;

let file = std::fs::File::open("analyser.hfstol").unwrap();
let transducer = HfstTransducer::load(file).unwrap();

for analysis in transducer.analyze("кошкаьш").unwrap() {
    println!("{}\t{}", analysis.output(), analysis.weight());
}
```
*/
#![warn(missing_docs)]

pub mod analyzer;
/// Record sizes and sentinel values of the on-disk format.
pub mod constants;
pub mod tokenizer;
pub mod transducer;
/// Shared type aliases and flag diacritic types.
pub mod types;

pub use crate::analyzer::{Analysis, Analyzer, AnalyzerConfig, AnalyzerError};
pub use crate::transducer::{HfstTransducer, TransducerError};
