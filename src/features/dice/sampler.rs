//! Dice sampling and aggregation
//!
//! The random source is passed in by the caller, so tests can seed it and
//! concurrent requests never share one.

use rand::Rng;

use super::parser::RollExpression;

/// Outcome of rolling a [`RollExpression`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    /// Individual dice in the order they were rolled
    pub rolls: Vec<u32>,
    /// Sum of `rolls`
    pub subtotal: i64,
    /// `subtotal` adjusted by the operator and modifier
    pub total: i64,
}

impl RollResult {
    /// Aggregate an already-sampled sequence of dice
    pub fn from_rolls(expr: &RollExpression, rolls: Vec<u32>) -> Self {
        let subtotal: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        let total = expr.apply(subtotal);
        Self {
            rolls,
            subtotal,
            total,
        }
    }
}

/// Draw `count` uniform values in `1..=sides`
pub fn sample<R: Rng + ?Sized>(expr: &RollExpression, rng: &mut R) -> Vec<u32> {
    (0..expr.count)
        .map(|_| rng.random_range(1..=expr.sides))
        .collect()
}

/// Sample and aggregate in one step
pub fn roll<R: Rng + ?Sized>(expr: &RollExpression, rng: &mut R) -> RollResult {
    RollResult::from_rolls(expr, sample(expr, rng))
}
