#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

use olmorph::constants::{HFST_MAGIC, NO_SYMBOL_NUMBER, NO_TABLE_INDEX, TARGET_TABLE};
use olmorph::HfstTransducer;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes optimized-lookup binaries by hand.
///
/// Transition targets given to [`arc`](TransducerBuilder::arc) are positions
/// in the transition table; the builder adds the `TARGET_TABLE` offset.
#[derive(Debug, Clone, Default)]
pub struct TransducerBuilder {
    symbols: Vec<String>,
    weighted: bool,
    preamble: Option<Vec<u8>>,
    index: Vec<(u16, u32)>,
    transitions: Vec<(u16, u16, u32, f32)>,
}

impl TransducerBuilder {
    pub fn new(symbols: &[&str]) -> TransducerBuilder {
        TransducerBuilder {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn weighted(mut self) -> Self {
        self.weighted = true;
        self
    }

    pub fn preamble(mut self, meta: &[u8]) -> Self {
        self.preamble = Some(meta.to_vec());
        self
    }

    /// Index slot with nothing in it.
    pub fn index_empty(mut self) -> Self {
        self.index.push((NO_SYMBOL_NUMBER, NO_TABLE_INDEX));
        self
    }

    /// Index slot pointing at the arcs for `input` starting at `transition`.
    pub fn index_arcs(mut self, input: u16, transition: u32) -> Self {
        self.index.push((input, TARGET_TABLE + transition));
        self
    }

    /// Finality slot of an index table state.
    pub fn index_final(mut self, weight: f32) -> Self {
        let target = if self.weighted { weight.to_bits() } else { 1 };
        self.index.push((NO_SYMBOL_NUMBER, target));
        self
    }

    pub fn arc(self, input: u16, output: u16, transition: u32, weight: f32) -> Self {
        self.arc_raw(input, output, TARGET_TABLE + transition, weight)
    }

    /// Arc with an unadjusted target, e.g. into the index table.
    pub fn arc_raw(mut self, input: u16, output: u16, target: u32, weight: f32) -> Self {
        self.transitions.push((input, output, target, weight));
        self
    }

    /// Header record of a non-final transition table state.
    pub fn state(mut self) -> Self {
        self.transitions
            .push((NO_SYMBOL_NUMBER, NO_SYMBOL_NUMBER, NO_TABLE_INDEX, 0.0));
        self
    }

    pub fn final_state(mut self, weight: f32) -> Self {
        self.transitions
            .push((NO_SYMBOL_NUMBER, NO_SYMBOL_NUMBER, 1, weight));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![];

        if let Some(meta) = &self.preamble {
            buf.extend_from_slice(HFST_MAGIC);
            buf.write_u16::<LittleEndian>(meta.len() as u16).unwrap();
            buf.push(0);
            buf.extend_from_slice(meta);
        }

        let symbols = self.symbols.len() as u16;
        buf.write_u16::<LittleEndian>(symbols).unwrap();
        buf.write_u16::<LittleEndian>(symbols).unwrap();
        buf.write_u32::<LittleEndian>(self.index.len() as u32).unwrap();
        buf.write_u32::<LittleEndian>(self.transitions.len() as u32)
            .unwrap();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_u32::<LittleEndian>(self.weighted as u32).unwrap();
        for _ in 0..8 {
            buf.write_u32::<LittleEndian>(0).unwrap();
        }

        for s in &self.symbols {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }

        for (input, target) in &self.index {
            buf.write_u16::<LittleEndian>(*input).unwrap();
            buf.write_u32::<LittleEndian>(*target).unwrap();
        }

        for (input, output, target, weight) in &self.transitions {
            buf.write_u16::<LittleEndian>(*input).unwrap();
            buf.write_u16::<LittleEndian>(*output).unwrap();
            buf.write_u32::<LittleEndian>(*target).unwrap();
            if self.weighted {
                buf.write_f32::<LittleEndian>(*weight).unwrap();
            }
        }

        buf
    }

    pub fn load(&self) -> HfstTransducer {
        HfstTransducer::from_bytes(&self.build()).unwrap()
    }
}

/// `ab` to `AB`, with the given arc weights.
pub fn ab_to_upper(weighted: bool, first: f32, second: f32) -> TransducerBuilder {
    let builder = TransducerBuilder::new(&["", "a", "b", "A", "B"]);
    let builder = if weighted { builder.weighted() } else { builder };

    builder
        .index_empty()
        .index_empty()
        .index_arcs(1, 0)
        .arc(1, 3, 1, first)
        .state()
        .arc(2, 4, 3, second)
        .final_state(0.0)
}

/// `a` to `a`, behind two flag diacritics on a leading epsilon path.
pub fn flag_gated(first: &str, second: &str) -> TransducerBuilder {
    TransducerBuilder::new(&["", "a", first, second])
        .index_empty()
        .index_arcs(0, 0)
        .arc(2, 2, 1, 0.0)
        .state()
        .arc(3, 3, 3, 0.0)
        .state()
        .arc(1, 1, 5, 0.0)
        .final_state(0.0)
}

pub fn outputs(analyses: &[olmorph::Analysis]) -> Vec<&str> {
    analyses.iter().map(|a| a.output()).collect()
}
