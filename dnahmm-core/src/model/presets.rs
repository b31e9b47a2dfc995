//! Ready-made models.

use crate::constants::{
    DNA_SYMBOLS, GC_PRESET_EMISSION, GC_PRESET_INITIAL, GC_PRESET_STATES, GC_PRESET_TRANSITION,
};
use crate::model::HmmModel;
use crate::types::Result;

/// Two-state GC-content model.
///
/// State `H` favors C and G (high GC, treated as coding) and state `L` favors
/// A and T (low GC, non-coding). Both states are equally likely at the first
/// position; `L` is slightly stickier than `H`.
///
/// | from \ to | H   | L   |
/// |-----------|-----|-----|
/// | H         | 0.5 | 0.5 |
/// | L         | 0.4 | 0.6 |
///
/// | state | A   | C   | G   | T   |
/// |-------|-----|-----|-----|-----|
/// | H     | 0.2 | 0.3 | 0.3 | 0.2 |
/// | L     | 0.3 | 0.2 | 0.2 | 0.3 |
///
/// # Errors
///
/// Never fails in practice; the tables are constants that satisfy every
/// model check. The `Result` keeps the preset on the same validated path as
/// user-supplied models.
pub fn gc_content() -> Result<HmmModel> {
    HmmModel::new(
        GC_PRESET_STATES.iter().map(|s| s.to_string()).collect(),
        DNA_SYMBOLS.to_vec(),
        GC_PRESET_INITIAL.to_vec(),
        GC_PRESET_TRANSITION.to_vec(),
        GC_PRESET_EMISSION.to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gc_content_preset_tables() {
        let model = gc_content().unwrap();
        assert_eq!(model.states(), &["H", "L"]);
        assert_eq!(model.symbols(), &['A', 'C', 'G', 'T']);
        assert_eq!(model.initial_by_name("H"), Some(0.5));
        assert_eq!(model.transition_by_name("H", "L"), Some(0.5));
        assert_eq!(model.transition_by_name("L", "L"), Some(0.6));
        assert_eq!(model.emission_by_name("H", 'C'), Some(0.3));
        assert_eq!(model.emission_by_name("L", 'T'), Some(0.3));
    }
}
