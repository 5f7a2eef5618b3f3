//! Expression evaluation service.
//!
//! [`evaluate`] is the single entry point used by both the live preview and
//! the submit path. It validates the raw text, tolerates an expression that
//! is still being typed (dangling operators, unclosed groups), computes the
//! value with the closed grammar in [`super::parser`], and normalizes it for
//! display.

use super::builder::paren_counts;
use super::errors::{EvaluationError, EvaluationResult, NON_FINITE_PREFIX};
use super::parser::Parser;
use super::token::is_operator;
use std::fmt;

/// Decimal places kept in a result.
pub const PRECISION: usize = 10;

/// A finite value rounded to [`PRECISION`] places, never negative zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(f64);

impl Number {
    /// Rounds `raw` and collapses `-0` to `0`. `raw` must be finite.
    fn normalize(raw: f64) -> Self {
        let rounded = format!("{:.*}", PRECISION, raw)
            .parse::<f64>()
            .unwrap_or(raw);
        if rounded == 0.0 { Self(0.0) } else { Self(rounded) }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Magnitudes at or above this print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
/// Non-zero magnitudes below this print in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude >= EXPONENT_ABOVE || (magnitude != 0.0 && magnitude < EXPONENT_BELOW) {
            let formatted = format!("{:e}", self.0);
            // `1e21` reads as `1e+21`.
            match formatted.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => f.write_str(&formatted),
            }
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Nothing to compute yet. Callers keep whatever they were showing.
    Empty,
    Value(Number),
}

impl Evaluation {
    pub fn number(self) -> Option<Number> {
        match self {
            Evaluation::Empty => None,
            Evaluation::Value(number) => Some(number),
        }
    }
}

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_digit() || is_operator(ch) || matches!(ch, '.' | '(' | ')') || ch.is_whitespace()
}

/// Evaluates an expression, complete or still being typed.
///
/// # Examples
///
/// ```
/// use tcalc::domain::{evaluate, Evaluation, EvaluationError};
///
/// let value = evaluate("2*(3+4").unwrap().number().unwrap();
/// assert_eq!(value.to_string(), "21");
///
/// assert_eq!(evaluate("12+").unwrap().number().unwrap().to_string(), "12");
/// assert_eq!(evaluate("").unwrap(), Evaluation::Empty);
/// assert_eq!(evaluate("2^3"), Err(EvaluationError::InvalidCharacters));
/// assert_eq!(evaluate("1)"), Err(EvaluationError::UnbalancedParentheses));
/// ```
pub fn evaluate(text: &str) -> EvaluationResult<Evaluation> {
    if text.is_empty() {
        return Ok(Evaluation::Empty);
    }

    if !text.chars().all(is_allowed) {
        return Err(EvaluationError::InvalidCharacters);
    }

    // An unfinished group is as incomplete as a dangling operator.
    let cleaned = text.trim().trim_end_matches(|c: char| {
        is_operator(c) || matches!(c, '.' | '(') || c.is_whitespace()
    });
    if cleaned.is_empty() {
        return Ok(Evaluation::Empty);
    }

    let (open, close) = paren_counts(cleaned);
    if close > open {
        return Err(EvaluationError::UnbalancedParentheses);
    }

    let mut balanced = String::with_capacity(cleaned.len() + open - close);
    balanced.push_str(cleaned);
    balanced.extend(std::iter::repeat_n(')', open - close));

    let raw = Parser::new(&balanced)
        .and_then(|mut parser| parser.parse())
        .map_err(EvaluationError::ComputationError)?;

    if !raw.is_finite() {
        return Err(EvaluationError::ComputationError(format!(
            "{}: {}",
            NON_FINITE_PREFIX, raw
        )));
    }

    Ok(Evaluation::Value(Number::normalize(raw)))
}
