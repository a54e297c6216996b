//! # Feature: Dice Rolling
//!
//! Parses dice expressions, rolls them with a caller-supplied random source and
//! renders the result into one or more Discord-sized messages.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Format into separate segments instead of re-splitting the rendered message
//! - 1.1.0: Inject the random source
//! - 1.0.0: Initial release with /roll and !roll

pub mod format;
pub mod parser;
pub mod sampler;
pub mod splitter;

pub use format::FormattedRoll;
pub use parser::{parse_expression, Operator, RollError, RollExpression, MAX_DICE, MAX_SIDES};
pub use sampler::{roll, RollResult};
pub use splitter::split;

use rand::Rng;

/// Parse, roll and format an expression in one call
pub fn roll_expression<R: Rng + ?Sized>(input: &str, rng: &mut R) -> Result<FormattedRoll, RollError> {
    let expr = parse_expression(input)?;
    let result = roll(&expr, rng);
    Ok(FormattedRoll::new(&expr, &result))
}
