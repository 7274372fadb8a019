use crate::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// LiteralKind
///
/// Syntactic kind of an inline literal, as classified by the engine's lexer.
/// Numeric flavors gate pipeline entry on this before any coercion runs.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum LiteralKind {
    #[display("bool")]
    Bool,
    #[display("enum")]
    Enum,
    #[display("float")]
    Float,
    #[display("int")]
    Int,
    #[display("list")]
    List,
    #[display("null")]
    Null,
    #[display("object")]
    Object,
    #[display("text")]
    Text,
}

///
/// Position
///
/// 1-based source coordinates of a literal.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[display("{line}:{column}")]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

///
/// LiteralNode
///
/// The engine-facing literal syntax node: kind, raw source text, and an
/// optional source position. Numeric literals keep their source text; the
/// pipeline's textual coercion is what turns them into numbers.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    pub kind: LiteralKind,
    pub value: String,
    pub position: Option<Position>,
}

impl LiteralNode {
    #[must_use]
    pub fn new(kind: LiteralKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn int(value: impl Into<String>) -> Self {
        Self::new(LiteralKind::Int, value)
    }

    #[must_use]
    pub fn float(value: impl Into<String>) -> Self {
        Self::new(LiteralKind::Float, value)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(LiteralKind::Text, value)
    }

    #[must_use]
    pub fn bool_lit(value: bool) -> Self {
        Self::new(LiteralKind::Bool, value.to_string())
    }

    #[must_use]
    pub fn null() -> Self {
        Self::new(LiteralKind::Null, "null")
    }

    /// Attach the source position.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position::new(line, column));
        self
    }

    /// The raw wire value this node contributes to the pipeline.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.kind {
            LiteralKind::Null => Value::Null,
            LiteralKind::Bool => Value::Bool(self.value == "true"),
            _ => Value::Text(self.value.clone()),
        }
    }
}

///
/// TESTS
///
