//! Formula lexer.
//!
//! Converts formula text into a flat stream of [`Token`]s for the parser.
//! Every character outside the arithmetic alphabet is rejected here, so
//! string literals, brackets, assignment and attribute access never reach
//! the parser.

use crate::error::{EvalError, Result};

// ---------------------------------------------------------------------------
// Token types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, e.g. `2`, `0.5`, `.5`, `1e-3`
    Number(f64),
    /// Identifier, e.g. `u`, `sin`, `pi`
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**`
    StarStar,
    OpenParen,
    CloseParen,
    Comma,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Ident(name) => format!("identifier '{name}'"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::StarStar => "'**'".into(),
            Token::OpenParen => "'('".into(),
            Token::CloseParen => "')'".into(),
            Token::Comma => "','".into(),
        }
    }
}

/// A token with its 1-based starting column.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub column: usize,
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// Tokenize a formula string.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut pos: usize = 0;
    let mut tokens = Vec::new();

    while pos < len {
        let c = chars[pos];
        let column = pos + 1;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            '*' => {
                if chars.get(pos + 1) == Some(&'*') {
                    pos += 1;
                    Token::StarStar
                } else {
                    Token::Star
                }
            }
            '/' => {
                if chars.get(pos + 1) == Some(&'/') {
                    return Err(EvalError::syntax("floor division '//' is not supported", column));
                }
                Token::Slash
            }

            '0'..='9' => {
                let (value, end) = lex_number(&chars, pos)?;
                pos = end;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    column,
                });
                continue;
            }
            '.' => {
                if chars.get(pos + 1).is_some_and(|d| d.is_ascii_digit()) {
                    let (value, end) = lex_number(&chars, pos)?;
                    pos = end;
                    tokens.push(Spanned {
                        token: Token::Number(value),
                        column,
                    });
                    continue;
                }
                return Err(EvalError::syntax("attribute access with '.' is not allowed", column));
            }

            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = pos;
                while pos < len && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                    pos += 1;
                }
                let name: String = chars[start..pos].iter().collect();
                tokens.push(Spanned {
                    token: Token::Ident(name),
                    column,
                });
                continue;
            }

            other => return Err(EvalError::syntax(rejection(other), column)),
        };

        tokens.push(Spanned { token, column });
        pos += 1;
    }

    Ok(tokens)
}

/// Skip a run of digits starting at `pos`. A single `_` may separate two
/// digits, as in `1_000`.
fn skip_digits(chars: &[char], mut pos: usize) -> usize {
    let is_digit = |i: usize| chars.get(i).is_some_and(char::is_ascii_digit);
    while pos < chars.len() {
        if is_digit(pos) {
            pos += 1;
        } else if chars[pos] == '_' && pos > 0 && is_digit(pos - 1) && is_digit(pos + 1) {
            pos += 2;
        } else {
            break;
        }
    }
    pos
}

/// Lex `digits [. digits] [(e|E) [+|-] digits]` starting at `start`.
/// Returns the value and the position just past the literal.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let len = chars.len();
    let mut pos = skip_digits(chars, start);

    if pos < len && chars[pos] == '.' {
        pos = skip_digits(chars, pos + 1);
    }
    if pos < len && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut exp = pos + 1;
        if exp < len && (chars[exp] == '+' || chars[exp] == '-') {
            exp += 1;
        }
        let digits_start = exp;
        exp = skip_digits(chars, exp);
        if exp == digits_start {
            return Err(EvalError::syntax("exponent has no digits", start + 1));
        }
        pos = exp;
    }

    // `2u`, `0x1f`, `1.5.2`: a literal must not run straight into a name or another dot.
    if pos < len && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_' || chars[pos] == '.') {
        let text: String = chars[start..=pos].iter().collect();
        let hint = if text.contains('_') {
            "; '_' may only separate two digits"
        } else {
            ""
        };
        return Err(EvalError::syntax(
            format!("invalid numeric literal '{text}'{hint}"),
            start + 1,
        ));
    }

    let text: String = chars[start..pos].iter().filter(|&&c| c != '_').collect();
    let value = text
        .parse::<f64>()
        .map_err(|e| EvalError::syntax(format!("invalid numeric literal '{text}': {e}"), start + 1))?;
    Ok((value, pos))
}

fn rejection(c: char) -> String {
    match c {
        '\'' | '"' => "string literals are not allowed".into(),
        '[' | ']' => "list literals and indexing are not allowed".into(),
        '{' | '}' => "dict and set literals are not allowed".into(),
        '=' => "assignment and comparison are not allowed".into(),
        '^' => "'^' is not an operator here; use '**' for powers".into(),
        '%' => "modulo '%' is not supported".into(),
        ':' | ';' => format!("statements are not allowed ('{c}')"),
        _ => format!("unsupported character {c:?}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            kinds("2*u**2 - sin(v)/3"),
            vec![
                Token::Number(2.0),
                Token::Star,
                Token::Ident("u".into()),
                Token::StarStar,
                Token::Number(2.0),
                Token::Minus,
                Token::Ident("sin".into()),
                Token::OpenParen,
                Token::Ident("v".into()),
                Token::CloseParen,
                Token::Slash,
                Token::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("1"), vec![Token::Number(1.0)]);
        assert_eq!(kinds("1.5"), vec![Token::Number(1.5)]);
        assert_eq!(kinds(".25"), vec![Token::Number(0.25)]);
        assert_eq!(kinds("2."), vec![Token::Number(2.0)]);
        assert_eq!(kinds("1e-3"), vec![Token::Number(1e-3)]);
        assert_eq!(kinds("6.02E+23"), vec![Token::Number(6.02e23)]);
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(kinds("1_000"), vec![Token::Number(1000.0)]);
        assert_eq!(kinds("1_0.2_5e1_0"), vec![Token::Number(10.25e10)]);

        for input in ["1_", "1__0", "1_.5", "1._5"] {
            match tokenize(input).unwrap_err() {
                EvalError::Syntax { message, column } => {
                    assert!(message.contains("'_' may only separate two digits"), "{input}: {message}");
                    assert_eq!(column, 1);
                }
                other => panic!("expected syntax error for {input:?}, got {other:?}"),
            }
        }
        assert!(tokenize("1e_5").is_err());
    }

    #[test]
    fn test_columns() {
        let tokens = tokenize("  u +  v").unwrap();
        let columns: Vec<usize> = tokens.iter().map(|s| s.column).collect();
        assert_eq!(columns, vec![3, 5, 8]);
    }

    #[test]
    fn test_rejects_string_literal() {
        let err = tokenize("__import__('os')").unwrap_err();
        assert_eq!(
            err,
            EvalError::Syntax {
                message: "string literals are not allowed".into(),
                column: 12,
            }
        );
    }

    #[test]
    fn test_rejects_attribute_access() {
        let err = tokenize("u.real").unwrap_err();
        assert!(err.to_string().contains("attribute access"), "{err}");
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        assert!(tokenize("2u").unwrap_err().is_syntax());
        assert!(tokenize("0x1f").unwrap_err().is_syntax());
        assert!(tokenize("1e").unwrap_err().is_syntax());
        assert!(tokenize("1.2.3").unwrap_err().is_syntax());
    }

    #[test]
    fn test_rejects_other_operators() {
        for input in ["u // 2", "u % 2", "u ^ 2", "a = 1", "u; v", "u @ v", "u < v", "θ"] {
            assert!(tokenize(input).unwrap_err().is_syntax(), "{input} should be rejected");
        }
    }
}
