//! Arithmetic evaluator for `${...}` recipe templates.
//!
//! The grammar is tiny on purpose: numbers, recipe input names as variables,
//! the four basic operators, unary minus, and parentheses. That covers every
//! template the recipe tables use (`diameter/2`, `-width/2`, ...) without
//! pulling in an expression-language dependency.
//!
//! Recursive descent with usual precedence: `*` and `/` bind tighter than
//! `+` and `-`, unary minus tighter still.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from evaluating a template expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A character outside the grammar.
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),

    /// The expression ended where a value was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Input remained after a complete expression was parsed.
    #[error("trailing input after expression")]
    TrailingInput,

    /// A closing parenthesis was expected.
    #[error("missing closing parenthesis")]
    UnbalancedParens,

    /// A malformed numeric literal.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A variable name with no matching recipe input.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
}

/// Evaluates an expression over the given numeric inputs.
///
/// # Errors
///
/// Returns an [`ExprError`] if the expression is malformed or references a
/// name that is not in `inputs`.
pub fn evaluate(expr: &str, inputs: &HashMap<String, f64>) -> Result<f64, ExprError> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        inputs,
    };
    let value = parser.expression()?;
    if parser.pos < tokens.len() {
        return Err(ExprError::TrailingInput);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExprError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    inputs: &'a HashMap<String, f64>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// unary := '-' unary | primary
    fn unary(&mut self) -> Result<f64, ExprError> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.advance();
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    /// primary := number | ident | '(' expression ')'
    fn primary(&mut self) -> Result<f64, ExprError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::Ident(name)) => self
                .inputs
                .get(name)
                .copied()
                .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(ExprError::UnbalancedParens),
                }
            }
            Some(Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::RParen) => {
                Err(ExprError::TrailingInput)
            }
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn plain_number() {
        assert_eq!(evaluate("42", &HashMap::new()).unwrap(), 42.0);
        assert_eq!(evaluate("0.05", &HashMap::new()).unwrap(), 0.05);
    }

    #[test]
    fn variable_lookup() {
        let env = inputs(&[("diameter", 0.1)]);
        assert_eq!(evaluate("diameter", &env).unwrap(), 0.1);
    }

    #[test]
    fn division_halves_a_diameter() {
        let env = inputs(&[("diameter", 0.1)]);
        assert_eq!(evaluate("diameter/2", &env).unwrap(), 0.05);
    }

    #[test]
    fn unary_minus() {
        let env = inputs(&[("width", 0.2)]);
        assert_eq!(evaluate("-width/2", &env).unwrap(), -0.1);
        assert_eq!(evaluate("--width", &env).unwrap(), 0.2);
    }

    #[test]
    fn precedence_and_parentheses() {
        let env = inputs(&[("a", 2.0), ("b", 3.0), ("c", 4.0)]);
        assert_eq!(evaluate("a + b * c", &env).unwrap(), 14.0);
        assert_eq!(evaluate("(a + b) * c", &env).unwrap(), 20.0);
        assert_eq!(evaluate("a - b - c", &env).unwrap(), -5.0);
    }

    #[test]
    fn whitespace_is_ignored() {
        let env = inputs(&[("width", 0.2)]);
        assert_eq!(evaluate("  - width / 2 ", &env).unwrap(), -0.1);
    }

    #[test]
    fn unknown_variable_is_reported() {
        let err = evaluate("height", &HashMap::new()).unwrap_err();
        assert_eq!(err, ExprError::UnknownVariable("height".to_string()));
    }

    #[test]
    fn malformed_expressions_fail() {
        let env = inputs(&[("a", 1.0)]);
        assert!(evaluate("a +", &env).is_err());
        assert!(evaluate("a b", &env).is_err());
        assert!(evaluate("(a", &env).is_err());
        assert!(evaluate("a ^ 2", &env).is_err());
        assert!(evaluate("1.2.3", &env).is_err());
        assert!(evaluate("", &env).is_err());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let env = inputs(&[("diameter", 0.1)]);
        let a = evaluate("diameter/2", &env).unwrap();
        let b = evaluate("diameter/2", &env).unwrap();
        assert_eq!(a, b);
    }
}
