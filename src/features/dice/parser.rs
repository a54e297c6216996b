//! Dice expression parser
//!
//! Parses notation like `3d20`, `6d6 + 2` or `4D8-1` into a validated
//! [`RollExpression`].
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Accept any Unicode decimal digits, not only ASCII
//! - 1.1.0: Split bound checks into distinct error kinds
//! - 1.0.0: Initial implementation

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Maximum number of dice in one expression
pub const MAX_DICE: u32 = 500;
/// Maximum number of sides per die
pub const MAX_SIDES: u32 = 1000;
/// Minimum number of sides per die
pub const MIN_SIDES: u32 = 2;

static ROLL_RE: OnceLock<Regex> = OnceLock::new();

fn roll_regex() -> &'static Regex {
    ROLL_RE.get_or_init(|| {
        Regex::new(r"^\s*(\d{1,4})[dD](\d{1,5})(?:\s*([+-])\s*(\d{1,6}))?\s*$")
            .expect("dice expression pattern is valid")
    })
}

static DIGIT_RE: OnceLock<Regex> = OnceLock::new();

fn is_decimal_digit(c: char) -> bool {
    let digit = DIGIT_RE.get_or_init(|| Regex::new(r"^\d$").expect("digit pattern is valid"));
    let mut buf = [0u8; 4];
    digit.is_match(c.encode_utf8(&mut buf))
}

/// Value of a single decimal digit from any script
///
/// Unicode encodes decimal digits in contiguous runs of ten, zero first, so the
/// distance back to the start of the run gives the value.
fn digit_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }
    let mut offset = 0;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        cp -= 1;
    }
    offset % 10
}

/// Digit counts are capped by the pattern, so this never overflows
fn parse_digits(digits: &str) -> u32 {
    digits.chars().fold(0, |acc, c| acc * 10 + digit_value(c))
}

/// Validation errors for a dice expression
///
/// The `Display` text is shown to the requester verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("Formato inválido. Usa algo como `6d6 + 2` ou `3d20`.")]
    MalformedExpression,
    #[error("Quantidade de dados inválida (1–{max}).", max = MAX_DICE)]
    CountOutOfRange(u32),
    #[error("Lados inválidos ({min}–{max}).", min = MIN_SIDES, max = MAX_SIDES)]
    SidesOutOfRange(u32),
}

/// Sign applied to the modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    None,
    Add,
    Subtract,
}

impl Operator {
    /// Symbol used in the display form, if any
    pub fn symbol(&self) -> Option<char> {
        match self {
            Operator::None => None,
            Operator::Add => Some('+'),
            Operator::Subtract => Some('-'),
        }
    }
}

/// A parsed and bounds-checked dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollExpression {
    /// Number of dice, 1..=500
    pub count: u32,
    /// Sides per die, 2..=1000
    pub sides: u32,
    pub operator: Operator,
    /// 0..=999999, always 0 when `operator` is `None`
    pub modifier: u32,
}

impl RollExpression {
    /// Build an expression, enforcing the count and sides bounds
    pub fn new(count: u32, sides: u32, operator: Operator, modifier: u32) -> Result<Self, RollError> {
        if !(1..=MAX_DICE).contains(&count) {
            return Err(RollError::CountOutOfRange(count));
        }
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(RollError::SidesOutOfRange(sides));
        }
        let modifier = if operator == Operator::None { 0 } else { modifier };
        Ok(Self {
            count,
            sides,
            operator,
            modifier,
        })
    }

    /// Apply the operator and modifier to a dice subtotal
    pub fn apply(&self, subtotal: i64) -> i64 {
        match self.operator {
            Operator::None => subtotal,
            Operator::Add => subtotal + i64::from(self.modifier),
            Operator::Subtract => subtotal - i64::from(self.modifier),
        }
    }
}

impl FromStr for RollExpression {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

/// Display form used inside the spec segment, e.g. `6d6 + 2`
///
/// The modifier only shows when an operator was given and the modifier is nonzero.
impl fmt::Display for RollExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.operator.symbol() {
            Some(sign) if self.modifier != 0 => write!(f, " {} {}", sign, self.modifier),
            _ => Ok(()),
        }
    }
}

/// Parse a raw dice expression
///
/// Whitespace is allowed at either end and around the sign only; `3 d 6` is rejected.
pub fn parse_expression(input: &str) -> Result<RollExpression, RollError> {
    let caps = roll_regex()
        .captures(input)
        .ok_or(RollError::MalformedExpression)?;

    let count = parse_digits(&caps[1]);
    let sides = parse_digits(&caps[2]);

    let operator = match caps.get(3).map(|m| m.as_str()) {
        Some("+") => Operator::Add,
        Some("-") => Operator::Subtract,
        _ => Operator::None,
    };
    let modifier = caps.get(4).map_or(0, |m| parse_digits(m.as_str()));

    RollExpression::new(count, sides, operator, modifier)
}
