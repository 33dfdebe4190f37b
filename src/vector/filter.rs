//! Attribute and spatial filters applied while reading layers.
//!
//! Attribute filters accept a small subset of OGR SQL: comparisons between a
//! field and a literal (`=`, `<>`, `!=`, `<`, `<=`, `>`, `>=`) and
//! `IS [NOT] NULL` tests, joined with `AND`.

use std::cmp::Ordering;

use crate::errors::*;
use crate::vector::{Defn, Envelope, Feature, FieldValue};

#[derive(Clone, Copy, Debug, PartialEq)]
enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Literal {
    Number(f64),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
enum Predicate {
    Compare(CompareOp, Literal),
    IsNull,
    IsNotNull,
}

#[derive(Clone, Debug, PartialEq)]
struct Clause {
    field: usize,
    predicate: Predicate,
}

/// A parsed attribute query, bound to the field indices of one [`Defn`].
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeFilter {
    query: String,
    clauses: Vec<Clause>,
}

impl AttributeFilter {
    pub fn parse(query: &str, defn: &Defn) -> Result<AttributeFilter> {
        let tokens = tokenize(query)?;
        let mut tokens = tokens.into_iter().peekable();
        let mut clauses = Vec::new();
        loop {
            let field = match tokens.next() {
                Some(Token::Ident(name)) => defn.field_index(&name).map_err(|_| {
                    GdalError::InvalidFieldName {
                        field_name: name,
                        method_name: "set_attribute_filter",
                    }
                })?,
                other => return Err(unexpected(other, "a field name")),
            };
            let predicate = match tokens.next() {
                Some(Token::Op(op)) => match tokens.next() {
                    Some(Token::Number(n)) => Predicate::Compare(op, Literal::Number(n)),
                    Some(Token::Text(s)) => Predicate::Compare(op, Literal::Text(s)),
                    other => return Err(unexpected(other, "a literal")),
                },
                Some(Token::Ident(word)) if word.eq_ignore_ascii_case("IS") => {
                    let negated = matches!(
                        tokens.peek(),
                        Some(Token::Ident(w)) if w.eq_ignore_ascii_case("NOT")
                    );
                    if negated {
                        tokens.next();
                    }
                    match tokens.next() {
                        Some(Token::Ident(w)) if w.eq_ignore_ascii_case("NULL") => {}
                        other => return Err(unexpected(other, "NULL")),
                    }
                    if negated {
                        Predicate::IsNotNull
                    } else {
                        Predicate::IsNull
                    }
                }
                other => return Err(unexpected(other, "an operator")),
            };
            clauses.push(Clause { field, predicate });
            match tokens.next() {
                None => break,
                Some(Token::Ident(word)) if word.eq_ignore_ascii_case("AND") => {}
                other => return Err(unexpected(other, "AND")),
            }
        }
        Ok(AttributeFilter {
            query: query.to_string(),
            clauses,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        self.clauses.iter().all(|clause| {
            let value = feature.field_by_index(clause.field).ok().flatten();
            match (&clause.predicate, value) {
                (Predicate::IsNull, value) => value.is_none(),
                (Predicate::IsNotNull, value) => value.is_some(),
                (Predicate::Compare(..), None) => false,
                (Predicate::Compare(op, literal), Some(value)) => compare(&value, literal)
                    .map(|ordering| op.accepts(ordering))
                    .unwrap_or(false),
            }
        })
    }
}

fn compare(value: &FieldValue, literal: &Literal) -> Option<Ordering> {
    match (value, literal) {
        (FieldValue::StringValue(s), Literal::Text(t)) => Some(s.as_str().cmp(t.as_str())),
        (FieldValue::StringValue(s), Literal::Number(n)) => s.trim().parse::<f64>().ok()?.partial_cmp(n),
        (FieldValue::DateValue(d), Literal::Text(t)) => Some(d.to_string().as_str().cmp(t.as_str())),
        (FieldValue::DateTimeValue(d), Literal::Text(t)) => {
            Some(d.to_string().as_str().cmp(t.as_str()))
        }
        (value, Literal::Number(n)) => value.clone().into_real()?.partial_cmp(n),
        (value, Literal::Text(t)) => {
            let n = t.trim().parse::<f64>().ok()?;
            value.clone().into_real()?.partial_cmp(&n)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Text(String),
    Op(CompareOp),
}

fn unexpected(token: Option<Token>, expected: &str) -> GdalError {
    match token {
        Some(token) => GdalError::AttributeFilter(format!("expected {expected}, found {token:?}")),
        None => GdalError::AttributeFilter(format!("expected {expected}, found end of query")),
    }
}

fn tokenize(query: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = query.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '\'' {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        text.push('\'');
                    }
                    Some('\'') => break,
                    Some(c) => text.push(c),
                    None => {
                        return Err(GdalError::AttributeFilter(
                            "unterminated string literal".to_string(),
                        ))
                    }
                }
            }
            tokens.push(Token::Text(text));
        } else if c == '"' {
            chars.next();
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(c) => name.push(c),
                    None => {
                        return Err(GdalError::AttributeFilter(
                            "unterminated quoted identifier".to_string(),
                        ))
                    }
                }
            }
            tokens.push(Token::Ident(name));
        } else if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let mut number = String::new();
            while let Some(&c) = chars.peek() {
                let exponent_sign = (c == '-' || c == '+')
                    && matches!(number.chars().last(), Some('e') | Some('E'));
                if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign || number.is_empty() {
                    number.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = number.parse::<f64>().map_err(|_| {
                GdalError::AttributeFilter(format!("invalid number '{number}'"))
            })?;
            tokens.push(Token::Number(value));
        } else if c.is_alphanumeric() || c == '_' {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else {
            chars.next();
            let op = match (c, chars.peek()) {
                ('=', _) => CompareOp::Eq,
                ('<', Some('>')) => CompareOp::Ne,
                ('!', Some('=')) => CompareOp::Ne,
                ('<', Some('=')) => CompareOp::Le,
                ('>', Some('=')) => CompareOp::Ge,
                ('<', _) => CompareOp::Lt,
                ('>', _) => CompareOp::Gt,
                _ => {
                    return Err(GdalError::AttributeFilter(format!(
                        "unexpected character '{c}'"
                    )))
                }
            };
            if matches!(op, CompareOp::Ne | CompareOp::Le | CompareOp::Ge) {
                chars.next();
            }
            tokens.push(Token::Op(op));
        }
    }
    Ok(tokens)
}

/// Filters installed on a layer. A feature passes when it satisfies every
/// installed filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureFilters {
    pub attribute: Option<AttributeFilter>,
    /// Rectangle tested against the envelope of the first geometry field.
    pub spatial: Option<Envelope>,
}

impl FeatureFilters {
    pub fn is_active(&self) -> bool {
        self.attribute.is_some() || self.spatial.is_some()
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        if let Some(attribute) = &self.attribute {
            if !attribute.matches(feature) {
                return false;
            }
        }
        match &self.spatial {
            Some(rect) => feature
                .geometry()
                .and_then(|geom| geom.envelope())
                .is_some_and(|env| env.intersects(rect)),
            None => true,
        }
    }
}
