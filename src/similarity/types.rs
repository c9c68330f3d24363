use serde::{Deserialize, Serialize};

/// Comparison mode. Selects the weighting formula and whether structural
/// similarity is computed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Code,
    Text,
}

impl Mode {
    /// Maps the wire-level `is_code` flag.
    pub fn from_is_code(is_code: bool) -> Self {
        if is_code { Mode::Code } else { Mode::Text }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Mode::Code)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Code => write!(f, "code"),
            Mode::Text => write!(f, "text"),
        }
    }
}

/// The three similarity signals for one pair of texts (unrounded percentages).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityTriple {
    pub semantic: f64,
    pub lexical: f64,
    /// Always `0.0` for [`Mode::Text`].
    pub structural: f64,
}

impl SimilarityTriple {
    pub fn new(semantic: f64, lexical: f64, structural: f64) -> Self {
        Self {
            semantic,
            lexical,
            structural,
        }
    }
}
