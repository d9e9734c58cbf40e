//! Module-format negotiation for the single emitted artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// How the artifact registers itself with whatever loader is present at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExposureStrategy {
    /// AMD, then CommonJS, then the global binding
    #[default]
    #[serde(rename = "umd")]
    Universal,
}

impl FromStr for ExposureStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "umd" => Ok(Self::Universal),
            _ => Err(format!("unsupported library target \"{s}\"")),
        }
    }
}

impl fmt::Display for ExposureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal => write!(f, "umd"),
        }
    }
}

/// Loaders visible to the artifact when it is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderEnvironment {
    /// `define` is a function with `define.amd` set
    pub amd: bool,
    /// `module.exports` is an object
    pub commonjs: bool,
}

/// Where the public interface ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Amd { module_id: String },
    CommonJs,
    Global { object: String, property: String },
}

impl ExposureStrategy {
    /// Decide how the artifact registers itself.
    ///
    /// Precedence is fixed: AMD, then CommonJS, then the global binding.
    pub fn negotiate(
        self,
        env: LoaderEnvironment,
        exposed_name: &str,
        binding: &GlobalBinding,
    ) -> Registration {
        match self {
            Self::Universal => {
                if env.amd {
                    Registration::Amd {
                        module_id: exposed_name.to_string(),
                    }
                } else if env.commonjs {
                    Registration::CommonJs
                } else {
                    Registration::Global {
                        object: binding.as_str().to_string(),
                        property: exposed_name.to_string(),
                    }
                }
            }
        }
    }

    /// Wrap a compiled factory body so it registers itself at load time.
    ///
    /// `body` is the body of the factory function and must `return` the
    /// bundle's public interface.
    pub fn render_wrapper(self, exposed_name: &str, binding: &GlobalBinding, body: &str) -> String {
        let name = Value::String(exposed_name.to_string());
        match self {
            Self::Universal => format!(
                "(function (root, factory) {{\n\
                 \x20 if (typeof define === 'function' && define.amd)\n\
                 \x20   define({name}, [], factory);\n\
                 \x20 else if (typeof module === 'object' && typeof module.exports === 'object')\n\
                 \x20   module.exports = factory();\n\
                 \x20 else\n\
                 \x20   root[{name}] = factory();\n\
                 }})({root}, function () {{\n\
                 {body}\n\
                 }});\n",
                root = binding.as_str(),
            ),
        }
    }
}

/// Host object expression, e.g. `this`, `self` or `globalThis`.
///
/// Anything other than a dotted identifier chain is kept as a parenthesised
/// expression: `typeof self !== 'undefined' ? self : this` becomes
/// `(typeof self !== 'undefined' ? self : this)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalBinding(String);

impl GlobalBinding {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GlobalBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("global object cannot be empty".to_string());
        }

        if s.contains(|c: char| c.is_whitespace() || "()[]?:!=&|'\"".contains(c)) {
            validate_expression(s)?;
            return Ok(Self(format!("({s})")));
        }

        for segment in s.split('.') {
            validate_identifier(segment)?;
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for GlobalBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for GlobalBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A single expression: no statements, no blocks, balanced brackets.
fn validate_expression(expr: &str) -> Result<(), String> {
    if let Some(c) = expr.chars().find(|c| matches!(*c, ';' | '{' | '}' | '\n' | '\r')) {
        return Err(format!("invalid character {c:?} in global object expression"));
    }

    let mut open = Vec::new();
    for c in expr.chars() {
        match c {
            '(' | '[' => open.push(c),
            ')' | ']' => {
                let expected = if c == ')' { '(' } else { '[' };
                if open.pop() != Some(expected) {
                    return Err(format!("unbalanced '{c}' in global object expression"));
                }
            }
            _ => {}
        }
    }

    if let Some(c) = open.pop() {
        return Err(format!("unclosed '{c}' in global object expression"));
    }

    Ok(())
}

fn validate_identifier(segment: &str) -> Result<(), String> {
    let Some(first) = segment.chars().next() else {
        return Err("empty segment in global object".to_string());
    };

    if !first.is_alphabetic() && first != '_' && first != '$' {
        return Err(format!(
            "must start with letter, underscore, or dollar sign (got '{first}')"
        ));
    }

    if let Some(c) = segment
        .chars()
        .find(|c| !c.is_alphanumeric() && *c != '_' && *c != '$')
    {
        return Err(format!("invalid character '{c}' in identifier"));
    }

    Ok(())
}
