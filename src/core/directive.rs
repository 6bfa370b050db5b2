//! Build directives forwarded to the code generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A C++ expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Inserted verbatim
    Raw { code: String },
    /// A string literal, escaped when rendered
    Str { value: String },
    /// A call to a free function
    Call { function: String, args: Vec<Expression> },
}

impl Expression {
    pub fn raw(code: impl Into<String>) -> Self {
        Expression::Raw { code: code.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Str {
            value: value.into(),
        }
    }

    pub fn call(function: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            function: function.into(),
            args,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Raw { code } => write!(f, "{}", code),
            Expression::Str { value } => write!(f, "{}", cpp_string_escape(value)),
            Expression::Call { function, args } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
        }
    }
}

/// Quote `s` as a C++ string literal. Non-printable bytes are written as
/// octal escapes.
pub fn cpp_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for byte in s.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\{:03o}", byte)),
        }
    }
    out.push('"');
    out
}

/// An option value in the package manager's project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Single(String),
    List(Vec<String>),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Single(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Single(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Single(v) => write!(f, "{}", v),
            OptionValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// A single instruction for the build backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    /// A statement added to the generated setup code
    Statement { expression: Expression },

    /// A compiler flag applied to every translation unit
    BuildFlag { flag: String },

    /// A preprocessor define written to the generated defines header
    Define {
        name: String,
        value: Option<Expression>,
    },

    /// A package-manager project option
    PlatformioOption { key: String, value: OptionValue },
}

impl Directive {
    pub fn statement(expression: Expression) -> Self {
        Directive::Statement { expression }
    }

    pub fn build_flag(flag: impl Into<String>) -> Self {
        Directive::BuildFlag { flag: flag.into() }
    }

    /// A define with a string literal value.
    pub fn define_str(name: impl Into<String>, value: impl Into<String>) -> Self {
        Directive::Define {
            name: name.into(),
            value: Some(Expression::string(value)),
        }
    }

    /// A define with an arbitrary expression value.
    pub fn define_expr(name: impl Into<String>, value: Expression) -> Self {
        Directive::Define {
            name: name.into(),
            value: Some(value),
        }
    }

    pub fn platformio_option(key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Directive::PlatformioOption {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Short label for the directive kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Statement { .. } => "statement",
            Directive::BuildFlag { .. } => "build_flag",
            Directive::Define { .. } => "define",
            Directive::PlatformioOption { .. } => "option",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Statement { expression } => write!(f, "{};", expression),
            Directive::BuildFlag { flag } => write!(f, "{}", flag),
            Directive::Define { name, value: None } => write!(f, "#define {}", name),
            Directive::Define {
                name,
                value: Some(value),
            } => write!(f, "#define {} {}", name, value),
            Directive::PlatformioOption { key, value } => write!(f, "{} = {}", key, value),
        }
    }
}

/// Receiver of emitted directives.
pub trait DirectiveSink {
    fn add(&mut self, directive: Directive);

    fn extend(&mut self, directives: impl IntoIterator<Item = Directive>)
    where
        Self: Sized,
    {
        for d in directives {
            self.add(d);
        }
    }
}

impl DirectiveSink for Vec<Directive> {
    fn add(&mut self, directive: Directive) {
        self.push(directive);
    }
}
