//! Binding Expression AST
//!
//! Already-parsed binding expressions as handed over by the render layer. The view
//! compiler never evaluates them; it only forwards them into binding records and
//! host listeners.

use serde::{Deserialize, Serialize};

/// Span of a node relative to the start of its expression source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    PropertyRead(PropertyRead),
    SafePropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    LiteralPrimitive(LiteralPrimitive),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Conditional(Conditional),
    Call(Call),
    BindingPipe(BindingPipe),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
}

/// The component instance or, inside embedded views, the view's locals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
}

/// `receiver.name`, also used for `receiver?.name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// `receiver[key]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "literalType", content = "value")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub value: LiteralValue,
}

/// `text {{ expr }} text`: `strings` always has one more entry than `expressions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub expression: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// `receiver(args)`; method calls are a `Call` on a `PropertyRead`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
}

/// `exp | name:arg1:arg2`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
}

/// A parsed expression together with the text it was parsed from and the location
/// of that text in the template, for error messages at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTWithSource {
    pub ast: Box<AST>,
    pub source: Option<String>,
    pub location: String,
    #[serde(default)]
    pub absolute_offset: usize,
}

impl ASTWithSource {
    pub fn new(ast: AST, source: Option<String>, location: String, absolute_offset: usize) -> Self {
        ASTWithSource {
            ast: Box::new(ast),
            source,
            location,
            absolute_offset,
        }
    }

    /// The expression text, falling back to a re-serialization of the AST when the
    /// render layer dropped the original source.
    pub fn source_text(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => super::serializer::serialize(&self.ast),
        }
    }
}
