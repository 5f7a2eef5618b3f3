//! Incremental expression builder.
//!
//! An [`Expression`] is an immutable value; [`Expression::apply`] returns the
//! next state for a token. Transitions never fail. A token that would break
//! the shape of the expression leaves the state unchanged.
//!
//! Every state produced here satisfies:
//! - only digits, operators, dots and parentheses appear
//! - a numeric segment holds at most one dot, and a dot always follows a digit
//! - no two binary operators are adjacent
//! - close-parens never outnumber open-parens

use super::token::{is_operator, Command, Operator, Token};

/// The live, in-progress expression text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    text: String,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh buffer from previously stored text, e.g. a history entry.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the state that follows `token`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tcalc::domain::{classify, Expression};
    ///
    /// let expr = ["2", "(", "3", "+", "4", ")"]
    ///     .iter()
    ///     .filter_map(|raw| classify(raw).ok())
    ///     .fold(Expression::new(), |expr, token| expr.apply(token));
    /// assert_eq!(expr.as_str(), "2*(3+4)");
    /// ```
    pub fn apply(&self, token: Token) -> Expression {
        match token {
            Token::Command(Command::Clear) => Expression::new(),
            Token::Command(Command::DeleteLast) => {
                let mut text = self.text.clone();
                text.pop();
                Expression { text }
            }
            Token::Command(Command::Submit) => self.clone(),
            Token::Dot => {
                if self.trailing_segment().contains('.') {
                    return self.clone();
                }
                match self.text.chars().last() {
                    Some(c) if c.is_ascii_digit() => self.appended("."),
                    Some(')') => self.appended("*0."),
                    _ => self.appended("0."),
                }
            }
            Token::Operator(op) => self.after_number(|expr| expr.with_operator(op)),
            Token::OpenParen => self.after_number(|expr| {
                if expr.ends_with_operand() {
                    expr.appended("*(")
                } else {
                    expr.appended("(")
                }
            }),
            Token::CloseParen => self.after_number(|expr| {
                let (open, close) = paren_counts(&expr.text);
                if open > close && expr.ends_with_operand() {
                    expr.appended(")")
                } else {
                    expr.clone()
                }
            }),
            Token::Digit(d) if d.is_ascii_digit() => {
                if self.text.ends_with(')') {
                    self.appended(&format!("*{}", d))
                } else {
                    self.appended(&d.to_string())
                }
            }
            Token::Digit(_) => self.clone(),
        }
    }

    fn with_operator(&self, op: Operator) -> Expression {
        match self.text.chars().last() {
            // Only a unary minus may open a group.
            None | Some('(') if op != Operator::Subtract => self.clone(),
            Some(prev) if is_operator(prev) => {
                let mut text = self.text.clone();
                text.pop();
                let at_group_start = text.is_empty() || text.ends_with('(');
                if at_group_start && op != Operator::Subtract {
                    return self.clone();
                }
                text.push(op.symbol());
                Expression { text }
            }
            _ => self.appended(&op.symbol().to_string()),
        }
    }

    /// Applies a token that ends the current number. A dangling dot is
    /// dropped first, but only if the token is accepted.
    fn after_number(&self, step: impl FnOnce(&Expression) -> Expression) -> Expression {
        let Some(trimmed) = self.text.strip_suffix('.') else {
            return step(self);
        };
        let base = Expression::from_text(trimmed);
        let next = step(&base);
        if next == base { self.clone() } else { next }
    }

    fn appended(&self, suffix: &str) -> Expression {
        let mut text = String::with_capacity(self.text.len() + suffix.len());
        text.push_str(&self.text);
        text.push_str(suffix);
        Expression { text }
    }

    /// The digits and dots after the last non-numeric character.
    fn trailing_segment(&self) -> &str {
        self.text
            .rsplit(|c: char| !(c.is_ascii_digit() || c == '.'))
            .next()
            .unwrap_or("")
    }

    fn ends_with_operand(&self) -> bool {
        matches!(self.text.chars().last(), Some(c) if c.is_ascii_digit() || c == ')')
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Counts `(` and `)` in `text`.
pub(crate) fn paren_counts(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(open, close), c| match c {
        '(' => (open + 1, close),
        ')' => (open, close + 1),
        _ => (open, close),
    })
}
