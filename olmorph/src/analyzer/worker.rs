use smol_str::SmolStr;

use super::index_list::IndexList;
use super::{Analysis, AnalyzerConfig, AnalyzerError};
use crate::constants::TARGET_TABLE;
use crate::transducer::{
    FlagDiacriticStateStack, IndexTable, TransducerAlphabet, TransitionTable,
};
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// Everything a single analysis mutates.
struct TraversalContext {
    input: IndexList,
    output: IndexList,
    flags: FlagDiacriticStateStack,
    weight: f64,
    depth: usize,
    analyses: Vec<Analysis>,
}

pub(crate) struct AnalyzerWorker<'t, T: TransitionTable> {
    alphabet: &'t TransducerAlphabet,
    index_table: &'t IndexTable,
    transition_table: &'t T,
    config: &'t AnalyzerConfig,
}

impl<'t, T: TransitionTable> AnalyzerWorker<'t, T> {
    #[inline(always)]
    pub(crate) fn new(
        alphabet: &'t TransducerAlphabet,
        index_table: &'t IndexTable,
        transition_table: &'t T,
        config: &'t AnalyzerConfig,
    ) -> AnalyzerWorker<'t, T> {
        AnalyzerWorker {
            alphabet,
            index_table,
            transition_table,
            config,
        }
    }

    /// Collects the output of every accepting path for `input`.
    pub(crate) fn analyze(&self, input: &[SymbolNumber]) -> Result<Vec<Analysis>, AnalyzerError> {
        let mut input_string = IndexList::with_capacity(input.len() + 1);
        for &sym in input {
            input_string.push(Some(sym));
        }
        input_string.push(None);
        input_string.reset();

        let mut output_string = IndexList::with_capacity(64);
        output_string.put(None, 0);

        let mut ctx = TraversalContext {
            input: input_string,
            output: output_string,
            flags: FlagDiacriticStateStack::new(self.alphabet.state_size() as usize),
            weight: 0.0,
            depth: 0,
            analyses: vec![],
        };

        self.get_analyses(&mut ctx, 0)?;
        Ok(ctx.analyses)
    }

    fn get_analyses(
        &self,
        ctx: &mut TraversalContext,
        idx: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        if ctx.depth >= self.config.max_depth {
            log::warn!("traversal depth limit {} reached", self.config.max_depth);
            return Err(AnalyzerError::TraversalLimitExceeded {
                depth: self.config.max_depth,
            });
        }
        ctx.depth += 1;

        if idx >= TARGET_TABLE {
            let index = idx - TARGET_TABLE;
            self.try_epsilon_transitions(ctx, index + 1)?;

            if ctx.input.get(0).is_none() {
                if self.transition_table.is_final(index) {
                    let final_weight = self.transition_table.weight(index).unwrap_or(0.0);
                    self.note_analysis(ctx, final_weight);
                }
                ctx.depth -= 1;
                return Ok(());
            }

            ctx.input.advance(1);
            self.find_transitions(ctx, index + 1)?;
        } else {
            self.try_epsilon_indices(ctx, idx + 1)?;

            if ctx.input.get(0).is_none() {
                if self.index_table.is_final(idx) {
                    let final_weight = self.index_table.final_weight(idx).unwrap_or(0.0);
                    self.note_analysis(ctx, final_weight);
                }
                ctx.depth -= 1;
                return Ok(());
            }

            ctx.input.advance(1);
            self.find_index(ctx, idx + 1)?;
        }

        ctx.input.retreat(1);
        ctx.output.put(None, 0);
        ctx.depth -= 1;
        Ok(())
    }

    #[inline(always)]
    fn try_epsilon_indices(
        &self,
        ctx: &mut TraversalContext,
        index: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        if self.index_table.input_symbol(index) != Some(0) {
            return Ok(());
        }

        match self.transition_start(self.index_table.target(index)) {
            Some(first) => self.try_epsilon_transitions(ctx, first),
            None => Ok(()),
        }
    }

    /// Follows epsilon and flag diacritic arcs starting at `index`, up to the
    /// first arc that needs input.
    fn try_epsilon_transitions(
        &self,
        ctx: &mut TraversalContext,
        mut index: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        let operations = self.alphabet.operations();

        while let Some(sym) = self.transition_table.input_symbol(index) {
            if sym == 0 {
                self.take_transition(ctx, index)?;
            } else if let Some(op) = operations.get(&sym) {
                if ctx.flags.push(op) {
                    let res = self.take_transition(ctx, index);
                    ctx.flags.pop();
                    res?;
                }
            } else {
                break;
            }

            index += 1;
        }

        Ok(())
    }

    #[inline(always)]
    fn find_index(
        &self,
        ctx: &mut TraversalContext,
        index: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        let sym = match ctx.input.get(-1) {
            Some(sym) => sym,
            None => return Ok(()),
        };

        let slot = index + u32::from(sym);
        if self.index_table.input_symbol(slot) != Some(sym) {
            return Ok(());
        }

        match self.transition_start(self.index_table.target(slot)) {
            Some(first) => self.find_transitions(ctx, first),
            None => Ok(()),
        }
    }

    /// Follows the run of arcs at `index` whose input is the symbol just
    /// consumed.
    fn find_transitions(
        &self,
        ctx: &mut TraversalContext,
        mut index: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        let sym = match ctx.input.get(-1) {
            Some(sym) => sym,
            None => return Ok(()),
        };

        while self.transition_table.input_symbol(index) == Some(sym) {
            self.take_transition(ctx, index)?;
            index += 1;
        }

        Ok(())
    }

    fn take_transition(
        &self,
        ctx: &mut TraversalContext,
        index: TransitionTableIndex,
    ) -> Result<(), AnalyzerError> {
        let table = self.transition_table;
        let target = match table.target(index) {
            Some(target) => target,
            None => return Ok(()),
        };

        let weight = ctx.weight;
        ctx.weight += f64::from(table.weight(index).unwrap_or(0.0));
        ctx.output.put(table.output_symbol(index), 0);
        ctx.output.advance(1);

        let res = self.get_analyses(ctx, target);

        ctx.output.retreat(1);
        ctx.weight = weight;
        res
    }

    /// Index table slots address the transition table by an offset of
    /// `TARGET_TABLE`.
    #[inline(always)]
    fn transition_start(
        &self,
        target: Option<TransitionTableIndex>,
    ) -> Option<TransitionTableIndex> {
        target.and_then(|t| t.checked_sub(TARGET_TABLE))
    }

    fn note_analysis(&self, ctx: &mut TraversalContext, final_weight: Weight) {
        ctx.output.put(None, 0);

        let symbols = ctx.output.symbols().collect::<Vec<_>>();
        let output: SmolStr = self.alphabet.string_from_symbols(&symbols);
        let weight = ctx.weight + f64::from(final_weight);

        log::trace!("analysis: {} ({})", output, weight);
        ctx.analyses.push(Analysis::new(output, weight));
    }
}
