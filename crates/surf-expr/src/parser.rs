//! Recursive-descent parser for the formula grammar.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | IDENT | IDENT '(' args? ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! `**` is right-associative and binds tighter than a unary sign on its left,
//! so `-2**2` is `-(2**2)` while `2**-1` is `2**(-1)`.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvalError, Result};
use crate::lexer::{Spanned, Token};

/// Maximum nesting of parentheses, calls and unary signs.
const MAX_DEPTH: usize = 64;

/// Maximum height of the finished tree. Long `+`/`*` chains are
/// left-associative, so each operator adds a level even without nesting.
const MAX_HEIGHT: usize = 128;

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// A subtree together with its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Column just past the input, used for end-of-input errors.
    end_column: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, end_column: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end_column,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn column(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.end_column, |s| s.column)
    }

    fn advance(&mut self) -> Result<Token> {
        match self.tokens.get(self.pos) {
            Some(spanned) => {
                self.pos += 1;
                Ok(spanned.token.clone())
            }
            None => Err(EvalError::syntax("unexpected end of expression", self.end_column)),
        }
    }

    fn expect_close_paren(&mut self, opened_at: usize) -> Result<()> {
        match self.peek() {
            Some(Token::CloseParen) => {
                self.pos += 1;
                Ok(())
            }
            Some(other) => Err(EvalError::syntax(
                format!("expected ')', found {}", other.describe()),
                self.column(),
            )),
            None => Err(EvalError::syntax(
                format!("unclosed '(' opened at column {opened_at}"),
                self.end_column,
            )),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::syntax(
                format!("expression nested deeper than {MAX_DEPTH} levels"),
                self.column(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Wrap `expr` one level above its tallest child.
    fn branch(&self, expr: Expr, child_height: usize, column: usize) -> Result<Node> {
        let height = child_height + 1;
        if height > MAX_HEIGHT {
            return Err(EvalError::syntax(
                format!("expression has more than {MAX_HEIGHT} levels of operations"),
                column,
            ));
        }
        Ok(Node { expr, height })
    }

    fn binary(&self, op: BinaryOp, lhs: Node, rhs: Node, column: usize) -> Result<Node> {
        let child_height = lhs.height.max(rhs.height);
        self.branch(
            Expr::Binary {
                op,
                lhs: Box::new(lhs.expr),
                rhs: Box::new(rhs.expr),
            },
            child_height,
            column,
        )
    }

    /// Parse the whole token stream as a single expression.
    fn parse_complete(&mut self) -> Result<Expr> {
        if self.tokens.is_empty() {
            return Err(EvalError::syntax("empty expression", 1));
        }
        let node = self.parse_expr()?;
        if let Some(tok) = self.peek() {
            return Err(EvalError::syntax(
                format!("unexpected {} after complete expression", tok.describe()),
                self.column(),
            ));
        }
        Ok(node.expr)
    }

    fn parse_expr(&mut self) -> Result<Node> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            let column = self.column();
            self.pos += 1;
            let rhs = self.parse_term()?;
            lhs = self.binary(op, lhs, rhs, column)?;
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Node> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            let column = self.column();
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs, column)?;
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        let column = self.column();
        self.pos += 1;
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        self.branch(
            Expr::Unary {
                op,
                operand: Box::new(operand.expr),
            },
            operand.height,
            column,
        )
    }

    fn parse_power(&mut self) -> Result<Node> {
        let base = self.parse_primary()?;
        if let Some(Token::StarStar) = self.peek() {
            let column = self.column();
            self.pos += 1;
            self.enter()?;
            let exponent = self.parse_unary()?;
            self.leave();
            return self.binary(BinaryOp::Pow, base, exponent, column);
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let column = self.column();
        match self.advance()? {
            Token::Number(value) => Ok(Node::leaf(Expr::Literal(value))),
            Token::Ident(name) => {
                if let Some(Token::OpenParen) = self.peek() {
                    self.pos += 1;
                    self.enter()?;
                    let args = self.parse_args(column)?;
                    self.leave();
                    let child_height = args.iter().map(|arg| arg.height).max().unwrap_or(0);
                    let args = args.into_iter().map(|arg| arg.expr).collect();
                    self.branch(Expr::Call { name, args }, child_height, column)
                } else {
                    Ok(Node::leaf(Expr::Identifier(name)))
                }
            }
            Token::OpenParen => {
                self.enter()?;
                let inner = self.parse_expr()?;
                self.expect_close_paren(column)?;
                self.leave();
                Ok(inner)
            }
            other => Err(EvalError::syntax(
                format!("expected a number, name or '(', found {}", other.describe()),
                column,
            )),
        }
    }

    /// Parse call arguments after the opening parenthesis, through the closing one.
    fn parse_args(&mut self, opened_at: usize) -> Result<Vec<Node>> {
        let mut args = Vec::new();

        if let Some(Token::CloseParen) = self.peek() {
            self.pos += 1;
            return Ok(args);
        }

        args.push(self.parse_expr()?);
        while let Some(Token::Comma) = self.peek() {
            self.pos += 1;
            args.push(self.parse_expr()?);
        }

        self.expect_close_paren(opened_at)?;
        Ok(args)
    }
}

/// Parse a formula string into an expression tree.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = crate::lexer::tokenize(input)?;
    let end_column = input.chars().count() + 1;
    let mut parser = Parser::new(tokens, end_column);
    parser.parse_complete()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
