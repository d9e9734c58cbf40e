//! Static bundle declarations, exactly as written in a config file.
//!
//! A declaration holds unresolved strings: relative paths, regex sources and
//! transform step names. [`crate::ConfigResolver`] turns it into an immutable
//! [`crate::BundleConfiguration`].

mod helpers;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use helpers::{
    default_global_object, default_library_target, default_output_path, lenient_string,
    lenient_string_opt,
};

/// Top-level bundle declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleDeclaration {
    /// Compilation root, relative to the declaration's own location
    #[serde(default, deserialize_with = "lenient_string")]
    pub entry: String,

    /// Output target
    #[serde(default)]
    pub output: OutputDeclaration,

    /// Ordered file-matching rules
    #[serde(default)]
    pub rules: Vec<RuleDeclaration>,

    /// Extension hooks by name, applied in order after resolution
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Absolute path of the file this declaration was loaded from
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

/// Output target declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDeclaration {
    /// Emitted artifact name
    #[serde(default, deserialize_with = "lenient_string")]
    pub filename: String,

    /// Output directory, relative to the declaration's own location
    #[serde(default = "default_output_path", deserialize_with = "lenient_string")]
    pub path: String,

    /// Name the bundle registers under in script-tag and AMD contexts
    #[serde(default, deserialize_with = "lenient_string")]
    pub library: String,

    /// Module exposure strategy (`umd`)
    #[serde(default = "default_library_target", deserialize_with = "lenient_string")]
    pub library_target: String,

    /// Host object bound to when no module loader is present.
    ///
    /// A dotted identifier chain (`globalThis`, `window.app`) or a JavaScript
    /// expression such as `typeof self !== 'undefined' ? self : this`, which
    /// is emitted parenthesised.
    #[serde(default = "default_global_object", deserialize_with = "lenient_string")]
    pub global_object: String,
}

impl Default for OutputDeclaration {
    fn default() -> Self {
        Self {
            filename: String::new(),
            path: default_output_path(),
            library: String::new(),
            library_target: default_library_target(),
            global_object: default_global_object(),
        }
    }
}

/// Role a rule plays during selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleRole {
    /// Contributes its chain to every file it applies to
    #[default]
    Transform,
    /// Marks the build root; a file it applies to gets no transform chain
    Entry,
}

/// A single `test`/`exclude` predicate.
///
/// Exactly one of `path` or `pattern` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDeclaration {
    /// File or directory path, relative to the declaration's own location
    #[serde(
        default,
        deserialize_with = "lenient_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,

    /// Regular expression searched in the candidate path
    #[serde(
        default,
        deserialize_with = "lenient_string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<String>,
}

impl ConditionDeclaration {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            pattern: None,
        }
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            path: None,
            pattern: Some(pattern.into()),
        }
    }
}

/// Transform step, either a bare name or a name with options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepDeclaration {
    Name(String),
    Detailed {
        loader: String,
        #[serde(default)]
        options: Value,
    },
}

/// File-matching rule declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDeclaration {
    pub test: ConditionDeclaration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<ConditionDeclaration>,

    #[serde(default, rename = "use")]
    pub chain: Vec<StepDeclaration>,

    #[serde(default)]
    pub role: RuleRole,
}

impl BundleDeclaration {
    /// The declaration that builds the Quetzal hooks library.
    ///
    /// ```
    /// use quetzal_config::BundleDeclaration;
    ///
    /// let declaration = BundleDeclaration::hooks();
    /// assert_eq!(declaration.entry, "./js/quetzal_hooks.js");
    /// assert_eq!(declaration.output.library, "quetzal");
    /// ```
    pub fn hooks() -> Self {
        Self {
            entry: "./js/quetzal_hooks.js".to_string(),
            output: OutputDeclaration {
                filename: "quetzal_hooks.js".to_string(),
                path: "../priv/static".to_string(),
                library: "quetzal".to_string(),
                library_target: "umd".to_string(),
                global_object: "this".to_string(),
            },
            rules: vec![
                RuleDeclaration {
                    test: ConditionDeclaration::path("./js/quetzal_hooks.js"),
                    exclude: None,
                    chain: Vec::new(),
                    role: RuleRole::Entry,
                },
                RuleDeclaration {
                    test: ConditionDeclaration::pattern(r"\.js$"),
                    exclude: Some(ConditionDeclaration::pattern("node_modules")),
                    chain: vec![StepDeclaration::Name("babel-loader".to_string())],
                    role: RuleRole::Transform,
                },
            ],
            extensions: Vec::new(),
            origin: None,
        }
    }

    /// Create from serde_json::Value (for programmatic declarations)
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| crate::ConfigError::invalid("declaration", e.to_string()))
    }

    /// Record the file this declaration was loaded from
    pub fn with_origin(mut self, origin: impl AsRef<Path>) -> Self {
        self.origin = Some(origin.as_ref().to_path_buf());
        self
    }
}
