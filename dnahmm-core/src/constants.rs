// =============================================================================
// General
// =============================================================================

/// Version string for dnahmm
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Model validation
// =============================================================================

/// Maximum allowed deviation of a probability row sum from 1.0
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Number of distinct byte values, size of the symbol lookup table
pub const SYMBOL_TABLE_SIZE: usize = 256;

// =============================================================================
// Decoding
// =============================================================================

/// Relative tolerance under which two log-space scores are treated as equal,
/// and the lower-indexed state wins the tie. Scaled by the score magnitude
/// (at least 1.0).
pub const LOG_TIE_TOLERANCE: f64 = 1e-12;

// =============================================================================
// GC-content preset model
// =============================================================================

/// State names of the GC-content preset: high-GC and low-GC
pub const GC_PRESET_STATES: [&str; 2] = ["H", "L"];

/// Coding states of the GC-content preset
pub const GC_PRESET_CODING_STATES: [&str; 1] = ["H"];

/// DNA alphabet shared by the presets
pub const DNA_SYMBOLS: [char; 4] = ['A', 'C', 'G', 'T'];

/// Initial probabilities \[H, L\]
pub const GC_PRESET_INITIAL: [f64; 2] = [0.5, 0.5];

/// Transition probabilities, row-major \[from\]\[to\] over \[H, L\]
pub const GC_PRESET_TRANSITION: [f64; 4] = [
    0.5, 0.5, // H -> H, L
    0.4, 0.6, // L -> H, L
];

/// Emission probabilities, row-major \[state\]\[A, C, G, T\]
pub const GC_PRESET_EMISSION: [f64; 8] = [
    0.2, 0.3, 0.3, 0.2, // H
    0.3, 0.2, 0.2, 0.3, // L
];
