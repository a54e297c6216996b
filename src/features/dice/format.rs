//! Roll message formatting
//!
//! Renders a roll into three segments that are only joined at emission time:
//!
//! ```text
//! `[6d6 + 2]` Rolagem: `[1, 2, 3, 4, 5, 6]` Resultado: 23
//! ```
//!
//! The connective words `Rolagem:` and `Resultado:` are part of the output
//! format and must not change.

use super::parser::RollExpression;
use super::sampler::RollResult;

/// Label between the spec and rolls segments
pub const ROLLS_LABEL: &str = "Rolagem:";
/// Label between the rolls and result segments
pub const RESULT_LABEL: &str = "Resultado:";

/// A formatted roll, kept as separate segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRoll {
    /// e.g. `` `[6d6 + 2]` ``
    pub spec: String,
    /// e.g. `` `[1, 2, 3, 4, 5, 6]` ``
    pub rolls: String,
    pub total: i64,
}

impl FormattedRoll {
    pub fn new(expr: &RollExpression, result: &RollResult) -> Self {
        let list = result
            .rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            spec: format!("`[{expr}]`"),
            rolls: format!("`[{list}]`"),
            total: result.total,
        }
    }

    /// The result segment as sent on its own, e.g. `Resultado: 23`
    pub fn result_line(&self) -> String {
        format!("{RESULT_LABEL} {}", self.total)
    }

    /// The full single-line message
    pub fn message(&self) -> String {
        format!(
            "{} {ROLLS_LABEL} {} {}",
            self.spec,
            self.rolls,
            self.result_line()
        )
    }
}
