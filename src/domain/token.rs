//! Input tokens and the classifier that produces them.
//!
//! Keypad labels and keyboard key names share one vocabulary, so everything
//! downstream of [`classify`] is indifferent to where an input came from.

use super::errors::Rejected;

/// The five binary operators accepted by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Remainder,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Remainder => '%',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Remainder),
            _ => None,
        }
    }
}

/// Returns true for any of the five binary operator characters.
pub fn is_operator(ch: char) -> bool {
    Operator::from_symbol(ch).is_some()
}

/// Editing commands that do not extend the expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Clear,
    DeleteLast,
    Submit,
}

/// One atomic unit of input to the expression builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Digit(char),
    Operator(Operator),
    Dot,
    OpenParen,
    CloseParen,
    Command(Command),
}

impl Token {
    /// The character this token appends, if it appends one.
    pub fn as_char(self) -> Option<char> {
        match self {
            Token::Digit(d) => Some(d),
            Token::Operator(op) => Some(op.symbol()),
            Token::Dot => Some('.'),
            Token::OpenParen => Some('('),
            Token::CloseParen => Some(')'),
            Token::Command(_) => None,
        }
    }

    pub fn is_command(self) -> bool {
        matches!(self, Token::Command(_))
    }
}

/// Maps a keypad label or keyboard key name onto a [`Token`].
///
/// # Examples
///
/// ```
/// use tcalc::domain::{classify, Command, Operator, Token};
///
/// assert_eq!(classify("7"), Ok(Token::Digit('7')));
/// assert_eq!(classify("%"), Ok(Token::Operator(Operator::Remainder)));
/// assert_eq!(classify("Enter"), Ok(Token::Command(Command::Submit)));
/// assert_eq!(classify("⌫"), Ok(Token::Command(Command::DeleteLast)));
/// assert!(classify("x").is_err());
/// ```
pub fn classify(raw: &str) -> Result<Token, Rejected> {
    match raw {
        "C" | "Esc" | "Escape" => return Ok(Token::Command(Command::Clear)),
        "⌫" | "Backspace" => return Ok(Token::Command(Command::DeleteLast)),
        "=" | "Enter" | "Return" => return Ok(Token::Command(Command::Submit)),
        _ => {}
    }

    let mut chars = raw.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(Rejected(raw.to_string()));
    };

    match ch {
        '0'..='9' => Ok(Token::Digit(ch)),
        '.' => Ok(Token::Dot),
        '(' => Ok(Token::OpenParen),
        ')' => Ok(Token::CloseParen),
        _ => Operator::from_symbol(ch)
            .map(Token::Operator)
            .ok_or_else(|| Rejected(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_digits() {
        for d in '0'..='9' {
            assert_eq!(classify(&d.to_string()), Ok(Token::Digit(d)));
        }
    }

    #[test]
    fn test_classify_operators_and_punctuation() {
        assert_eq!(classify("+"), Ok(Token::Operator(Operator::Add)));
        assert_eq!(classify("-"), Ok(Token::Operator(Operator::Subtract)));
        assert_eq!(classify("*"), Ok(Token::Operator(Operator::Multiply)));
        assert_eq!(classify("/"), Ok(Token::Operator(Operator::Divide)));
        assert_eq!(classify("%"), Ok(Token::Operator(Operator::Remainder)));
        assert_eq!(classify("."), Ok(Token::Dot));
        assert_eq!(classify("("), Ok(Token::OpenParen));
        assert_eq!(classify(")"), Ok(Token::CloseParen));
    }

    #[test]
    fn test_keypad_labels_and_key_names_agree() {
        assert_eq!(classify("C"), classify("Escape"));
        assert_eq!(classify("⌫"), classify("Backspace"));
        assert_eq!(classify("="), classify("Enter"));
        assert_eq!(classify("Esc"), Ok(Token::Command(Command::Clear)));
        assert_eq!(classify("Return"), Ok(Token::Command(Command::Submit)));
    }

    #[test]
    fn test_rejects_outside_alphabet() {
        assert_eq!(classify("a"), Err(Rejected("a".to_string())));
        assert!(classify("^").is_err());
        assert!(classify(" ").is_err());
        assert!(classify("").is_err());
        assert!(classify("12").is_err());
        assert!(classify("Tab").is_err());
    }

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert!(is_operator(op.symbol()));
        }
        assert!(!is_operator('.'));
        assert!(!is_operator('('));
    }

    #[test]
    fn test_token_chars() {
        assert_eq!(Token::Digit('4').as_char(), Some('4'));
        assert_eq!(Token::Dot.as_char(), Some('.'));
        assert_eq!(Token::Command(Command::Submit).as_char(), None);
        assert!(Token::Command(Command::Clear).is_command());
        assert!(!Token::CloseParen.is_command());
    }
}
