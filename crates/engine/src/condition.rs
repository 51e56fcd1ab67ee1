//! Boolean condition evaluator for `FLOW.IF`/`FLOW.SWITCH` expressions.
//!
//! `floe-expression` is the crate's general templating language, but its
//! parser/AST core is absent from this workspace, and the grammar `IF`/
//! `SWITCH` actually need is much smaller than a templating language:
//! comparisons, boolean connectives, parenthesization, literals, and field
//! paths into the node's input data. No function calls. This module is a
//! small hand-rolled recursive-descent parser and evaluator scoped to
//! exactly that grammar, grounded on the restricted namespace described for
//! connection conversion functions but written for boolean results instead
//! of data transforms.

use std::fmt;

use serde_json::Value;

/// Failure evaluating a condition expression.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConditionError {
    #[error("condition parse error at position {position}: {message}")]
    Parse { position: usize, message: String },
    #[error("condition field path `{path}` did not resolve to a value")]
    UnresolvedPath { path: String },
    #[error("condition expression did not evaluate to a boolean")]
    NotBoolean,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    String(String),
    Number(f64),
    True,
    False,
    Null,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Dot,
    LBracket,
    RBracket,
}

struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<(usize, Token)>, ConditionError> {
        let mut tokens = Vec::new();
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }
            match ch {
                '(' => {
                    self.chars.next();
                    tokens.push((pos, Token::LParen));
                }
                ')' => {
                    self.chars.next();
                    tokens.push((pos, Token::RParen));
                }
                '.' => {
                    self.chars.next();
                    tokens.push((pos, Token::Dot));
                }
                '[' => {
                    self.chars.next();
                    tokens.push((pos, Token::LBracket));
                }
                ']' => {
                    self.chars.next();
                    tokens.push((pos, Token::RBracket));
                }
                '!' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('=') {
                        self.chars.next();
                        tokens.push((pos, Token::Ne));
                    } else {
                        tokens.push((pos, Token::Not));
                    }
                }
                '=' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('=') {
                        self.chars.next();
                        tokens.push((pos, Token::Eq));
                    } else {
                        return Err(ConditionError::Parse {
                            position: pos,
                            message: "expected `==`".into(),
                        });
                    }
                }
                '<' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('=') {
                        self.chars.next();
                        tokens.push((pos, Token::Le));
                    } else {
                        tokens.push((pos, Token::Lt));
                    }
                }
                '>' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('=') {
                        self.chars.next();
                        tokens.push((pos, Token::Ge));
                    } else {
                        tokens.push((pos, Token::Gt));
                    }
                }
                '&' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('&') {
                        self.chars.next();
                        tokens.push((pos, Token::And));
                    } else {
                        return Err(ConditionError::Parse {
                            position: pos,
                            message: "expected `&&`".into(),
                        });
                    }
                }
                '|' => {
                    self.chars.next();
                    if self.chars.peek().map(|&(_, c)| c) == Some('|') {
                        self.chars.next();
                        tokens.push((pos, Token::Or));
                    } else {
                        return Err(ConditionError::Parse {
                            position: pos,
                            message: "expected `||`".into(),
                        });
                    }
                }
                '"' | '\'' => {
                    tokens.push((pos, self.lex_string(ch)?));
                }
                c if c.is_ascii_digit() => {
                    tokens.push((pos, self.lex_number()));
                }
                c if c.is_alphabetic() || c == '_' => {
                    tokens.push((pos, self.lex_ident()));
                }
                _ => {
                    return Err(ConditionError::Parse {
                        position: pos,
                        message: format!("unexpected character `{ch}`"),
                    });
                }
            }
        }
        Ok(tokens)
    }

    fn lex_string(&mut self, quote: char) -> Result<Token, ConditionError> {
        let (start, _) = self.chars.next().expect("quote already peeked");
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(Token::String(s)),
                Some((_, c)) => s.push(c),
                None => {
                    return Err(ConditionError::Parse {
                        position: start,
                        message: "unterminated string literal".into(),
                    })
                }
            }
        }
    }

    fn lex_number(&mut self) -> Token {
        let mut s = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() || c == '.' {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Number(s.parse().unwrap_or(0.0))
    }

    fn lex_ident(&mut self) -> Token {
        let mut s = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        match s.as_str() {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            _ => Token::Ident(s),
        }
    }
}

#[derive(Debug, Clone)]
enum Expr {
    Literal(Value),
    Path(Vec<String>),
    Not(Box<Expr>),
    Cmp(Box<Expr>, CmpOp, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<(usize, Token)>) -> Self {
        Self {
            tokens: tokens.into_iter().map(|(_, t)| t).collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, tok: &Token, what: &str) -> Result<(), ConditionError> {
        if self.peek() == Some(tok) {
            self.pos += 1;
            Ok(())
        } else {
            Err(ConditionError::Parse {
                position: self.pos,
                message: format!("expected {what}"),
            })
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ConditionError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ConditionError> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ConditionError> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ConditionError> {
        if self.peek() == Some(&Token::Not) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ConditionError> {
        let left = self.parse_primary()?;
        let op = match self.peek() {
            Some(Token::Eq) => CmpOp::Eq,
            Some(Token::Ne) => CmpOp::Ne,
            Some(Token::Lt) => CmpOp::Lt,
            Some(Token::Le) => CmpOp::Le,
            Some(Token::Gt) => CmpOp::Gt,
            Some(Token::Ge) => CmpOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_primary()?;
        Ok(Expr::Cmp(Box::new(left), op, Box::new(right)))
    }

    fn parse_primary(&mut self) -> Result<Expr, ConditionError> {
        match self.advance() {
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(Token::True) => Ok(Expr::Literal(Value::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(Value::Bool(false))),
            Some(Token::Null) => Ok(Expr::Literal(Value::Null)),
            Some(Token::Number(n)) => Ok(Expr::Literal(
                serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            )),
            Some(Token::String(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::Ident(name)) => {
                let mut path = vec![name];
                loop {
                    match self.peek() {
                        Some(Token::Dot) => {
                            self.advance();
                            match self.advance() {
                                Some(Token::Ident(seg)) => path.push(seg),
                                _ => {
                                    return Err(ConditionError::Parse {
                                        position: self.pos,
                                        message: "expected field name after `.`".into(),
                                    })
                                }
                            }
                        }
                        Some(Token::LBracket) => {
                            self.advance();
                            match self.advance() {
                                Some(Token::String(seg)) => path.push(seg),
                                Some(Token::Number(n)) => path.push(format!("{n}")),
                                _ => {
                                    return Err(ConditionError::Parse {
                                        position: self.pos,
                                        message: "expected string or index inside `[...]`".into(),
                                    })
                                }
                            }
                            self.expect(&Token::RBracket, "`]`")?;
                        }
                        _ => break,
                    }
                }
                Ok(Expr::Path(path))
            }
            other => Err(ConditionError::Parse {
                position: self.pos,
                message: format!("unexpected token {other:?}"),
            }),
        }
    }
}

fn resolve_path<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn eval_value(expr: &Expr, data: &Value) -> Result<Value, ConditionError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Path(path) => resolve_path(data, path).cloned().ok_or_else(|| {
            ConditionError::UnresolvedPath {
                path: path.join("."),
            }
        }),
        Expr::Not(inner) => Ok(Value::Bool(!truthy(&eval_value(inner, data)?))),
        Expr::And(l, r) => {
            Ok(Value::Bool(truthy(&eval_value(l, data)?) && truthy(&eval_value(r, data)?)))
        }
        Expr::Or(l, r) => {
            Ok(Value::Bool(truthy(&eval_value(l, data)?) || truthy(&eval_value(r, data)?)))
        }
        Expr::Cmp(l, op, r) => {
            let lv = eval_value(l, data)?;
            let rv = eval_value(r, data)?;
            Ok(Value::Bool(compare(&lv, *op, &rv)))
        }
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn compare(lhs: &Value, op: CmpOp, rhs: &Value) -> bool {
    if matches!(op, CmpOp::Eq) {
        return lhs == rhs;
    }
    if matches!(op, CmpOp::Ne) {
        return lhs != rhs;
    }
    let ordering = match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (lhs.as_str(), rhs.as_str()) {
            (Some(a), Some(b)) => Some(a.cmp(b)),
            _ => None,
        },
    };
    let Some(ordering) = ordering else { return false };
    match op {
        CmpOp::Lt => ordering.is_lt(),
        CmpOp::Le => ordering.is_le(),
        CmpOp::Gt => ordering.is_gt(),
        CmpOp::Ge => ordering.is_ge(),
        CmpOp::Eq | CmpOp::Ne => unreachable!(),
    }
}

/// Parse and evaluate a restricted boolean expression against `data`
/// (typically the node's merged input). Field paths resolve as
/// `data.a.b` or `data["a"]["b"]`; bare identifiers resolve against the
/// top-level keys of `data`.
pub fn evaluate(expression: &str, data: &Value) -> Result<bool, ConditionError> {
    let tokens = Lexer::new(expression).tokenize()?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ConditionError::Parse {
            position: parser.pos,
            message: "trailing input after expression".into(),
        });
    }
    match eval_value(&expr, data)? {
        Value::Bool(b) => Ok(b),
        _ => Err(ConditionError::NotBoolean),
    }
}

impl fmt::Debug for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simple_equality() {
        let data = json!({"status": "ok"});
        assert!(evaluate(r#"status == "ok""#, &data).unwrap());
        assert!(!evaluate(r#"status == "bad""#, &data).unwrap());
    }

    #[test]
    fn numeric_comparison() {
        let data = json!({"count": 5});
        assert!(evaluate("count > 3", &data).unwrap());
        assert!(!evaluate("count > 10", &data).unwrap());
        assert!(evaluate("count >= 5 && count <= 5", &data).unwrap());
    }

    #[test]
    fn nested_field_path() {
        let data = json!({"user": {"roles": {"admin": true}}});
        assert!(evaluate("user.roles.admin == true", &data).unwrap());
    }

    #[test]
    fn bracket_path_into_array() {
        let data = json!({"items": ["a", "b"]});
        assert!(evaluate(r#"items[0] == "a""#, &data).unwrap());
    }

    #[test]
    fn boolean_connectives_and_parens() {
        let data = json!({"a": true, "b": false});
        assert!(evaluate("a && !b", &data).unwrap());
        assert!(evaluate("(a || b) && !b", &data).unwrap());
    }

    #[test]
    fn unresolved_path_is_error() {
        let data = json!({});
        assert!(matches!(
            evaluate("missing == 1", &data),
            Err(ConditionError::UnresolvedPath { .. })
        ));
    }

    #[test]
    fn non_boolean_result_is_error() {
        let data = json!({"x": 1});
        assert!(matches!(evaluate("x", &data), Err(ConditionError::NotBoolean)));
    }

    #[test]
    fn function_call_syntax_is_rejected() {
        let data = json!({"x": 1});
        // No call-expression production exists in the grammar; `x(1)` parses
        // `x` as a complete primary and then fails on trailing input.
        assert!(evaluate("x(1)", &data).is_err());
    }
}
