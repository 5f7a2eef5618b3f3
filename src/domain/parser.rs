//! Arithmetic parser for calculator expressions.
//!
//! This module implements a closed recursive descent parser. It understands
//! numbers, the five binary operators, unary minus and parentheses, and
//! nothing else, so no input can reach anything but arithmetic.
//!
//! # BNF Grammar
//!
//! ```bnf
//! Expression ::= Term ( ( "+" | "-" ) Term )*
//! Term       ::= Factor ( ( "*" | "/" | "%" ) Factor )*
//! Factor     ::= "-"? Atom
//! Atom       ::= Number | "(" Expression ")"
//! Number     ::= [0-9]+ ( "." [0-9]+ )?
//! ```
//!
//! Operators of equal precedence associate to the left. Whitespace between
//! lexemes is ignored.

use super::token::Operator;

/// Nesting limit for parenthesised groups.
const MAX_DEPTH: usize = 256;

/// A lexical unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    Eof,
}

fn apply(operator: Operator, left: f64, right: f64) -> f64 {
    match operator {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => left / right,
        Operator::Remainder => left % right,
    }
}

/// Lexical analyzer for arithmetic expressions.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                out.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a number; a dot must be followed by at least one digit.
    fn read_number(&mut self) -> Result<f64, String> {
        let mut number_str = String::new();
        self.read_digits(&mut number_str);

        if self.current_char == Some('.') {
            number_str.push('.');
            self.advance();

            let before = number_str.len();
            self.read_digits(&mut number_str);
            if number_str.len() == before {
                return Err(format!("Invalid number: {}", number_str));
            }
        }

        number_str
            .parse::<f64>()
            .map_err(|_| format!("Invalid number: {}", number_str))
    }

    pub fn next_lexeme(&mut self) -> Result<Lexeme, String> {
        self.skip_whitespace();

        match self.current_char {
            None => Ok(Lexeme::Eof),
            Some(ch) => match ch {
                '0'..='9' => Ok(Lexeme::Number(self.read_number()?)),
                '(' => {
                    self.advance();
                    Ok(Lexeme::LeftParen)
                }
                ')' => {
                    self.advance();
                    Ok(Lexeme::RightParen)
                }
                _ => match Operator::from_symbol(ch) {
                    Some(op) => {
                        self.advance();
                        Ok(Lexeme::Operator(op))
                    }
                    None => Err(format!("Unexpected character: '{}'", ch)),
                },
            },
        }
    }
}

/// Recursive descent parser that computes the value as it parses.
///
/// Division and remainder by zero follow IEEE 754 and yield infinities or
/// NaN; callers decide what a non-finite value means.
pub struct Parser {
    lexer: Lexer,
    current: Lexeme,
    depth: usize,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, String> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_lexeme()?;

        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), String> {
        self.current = self.lexer.next_lexeme()?;
        Ok(())
    }

    fn expect(&mut self, expected: Lexeme) -> Result<(), String> {
        if self.current == expected {
            self.advance()
        } else {
            Err(format!("Expected {:?}, found {:?}", expected, self.current))
        }
    }

    /// Parses and computes the whole input; trailing lexemes are an error.
    pub fn parse(&mut self) -> Result<f64, String> {
        let value = self.parse_expression()?;

        if self.current != Lexeme::Eof {
            return Err(format!("Unexpected token at end: {:?}", self.current));
        }

        Ok(value)
    }

    fn parse_expression(&mut self) -> Result<f64, String> {
        let mut left = self.parse_term()?;

        while let Lexeme::Operator(op @ (Operator::Add | Operator::Subtract)) = self.current {
            self.advance()?;
            let right = self.parse_term()?;
            left = apply(op, left, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<f64, String> {
        let mut left = self.parse_factor()?;

        while let Lexeme::Operator(op @ (Operator::Multiply | Operator::Divide | Operator::Remainder)) =
            self.current
        {
            self.advance()?;
            let right = self.parse_factor()?;
            left = apply(op, left, right);
        }

        Ok(left)
    }

    /// A single optional minus; `--1` is rejected.
    fn parse_factor(&mut self) -> Result<f64, String> {
        if self.current == Lexeme::Operator(Operator::Subtract) {
            self.advance()?;
            return Ok(-self.parse_atom()?);
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<f64, String> {
        match self.current {
            Lexeme::Number(value) => {
                self.advance()?;
                Ok(value)
            }
            Lexeme::LeftParen => {
                if self.depth >= MAX_DEPTH {
                    return Err("Parentheses nested too deeply".to_string());
                }
                self.depth += 1;
                self.advance()?;
                let value = self.parse_expression()?;
                self.expect(Lexeme::RightParen)?;
                self.depth -= 1;
                Ok(value)
            }
            _ => Err(format!("Unexpected token: {:?}", self.current)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64, String> {
        let mut parser = Parser::new(input)?;
        parser.parse()
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lexer = Lexer::new("42 3.14 0.5");

        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Number(42.0));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Number(3.14));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Number(0.5));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Eof);
    }

    #[test]
    fn test_lexer_operators_and_parens() {
        let mut lexer = Lexer::new("+ - * / % ( )");

        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Operator(Operator::Add));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Operator(Operator::Subtract));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Operator(Operator::Multiply));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Operator(Operator::Divide));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Operator(Operator::Remainder));
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::LeftParen);
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::RightParen);
        assert_eq!(lexer.next_lexeme().unwrap(), Lexeme::Eof);
    }

    #[test]
    fn test_lexer_rejects_malformed_numbers() {
        assert!(Lexer::new("5.").next_lexeme().is_err());
        assert!(Lexer::new(".5").next_lexeme().is_err());
        assert!(Lexer::new("a").next_lexeme().is_err());
    }

    #[test]
    fn test_parser_binary_operations() {
        let mut parser = Parser::new("2 + 3").unwrap();
        assert_eq!(parser.parse().unwrap(), 5.0);

        assert_eq!(eval("10-3").unwrap(), 7.0);
        assert_eq!(eval("4*5").unwrap(), 20.0);
        assert_eq!(eval("15/3").unwrap(), 5.0);
        assert_eq!(eval("10%3").unwrap(), 1.0);
    }

    #[test]
    fn test_long_flat_chain() {
        let chain = vec!["1"; 10_000].join("+");
        assert_eq!(eval(&chain).unwrap(), 10_000.0);
    }

    #[test]
    fn test_parser_operator_precedence() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(eval("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(eval("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(eval("64 / 4 / 2").unwrap(), 8.0);
        assert_eq!(eval("7 % 4 * 2").unwrap(), 6.0);
    }

    #[test]
    fn test_parser_unary_minus() {
        assert_eq!(eval("-3").unwrap(), -3.0);
        assert_eq!(eval("-(2+3)").unwrap(), -5.0);
        assert_eq!(eval("-2*-3").unwrap(), 6.0);
        assert!(eval("--3").is_err());
        assert!(eval("+3").is_err());
    }

    #[test]
    fn test_remainder_follows_dividend_sign() {
        assert_eq!(eval("-7 % 3").unwrap(), -1.0);
        assert_eq!(eval("7 % -3").unwrap(), 1.0);
        assert_eq!(eval("5.5 % 2").unwrap(), 1.5);
    }

    #[test]
    fn test_division_by_zero_is_not_finite() {
        assert!(eval("7/0").unwrap().is_infinite());
        assert!(eval("0/0").unwrap().is_nan());
        assert!(eval("7%0").unwrap().is_nan());
    }

    #[test]
    fn test_parser_error_handling() {
        assert!(eval("2 +").is_err());
        assert!(eval("(2 + 3").is_err());
        assert!(eval("()").is_err());
        assert!(eval("1.5.5").is_err());
        assert!(eval("2 3").is_err());
        assert!(eval("").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(eval(&deep).is_err());

        let shallow = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(eval(&shallow).unwrap(), 1.0);
    }
}
