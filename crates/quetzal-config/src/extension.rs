//! Extension hooks applied to a resolved configuration before the engine sees it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::bundle::BundleConfiguration;
use crate::error::Result;

/// A named hook that rewrites a resolved configuration.
///
/// Hooks run in declaration order; each receives the previous hook's output.
///
/// ```
/// use quetzal_config::{BundleConfiguration, BundleExtension, Result};
///
/// struct Minified;
///
/// impl BundleExtension for Minified {
///     fn name(&self) -> &str {
///         "minified-filename"
///     }
///
///     fn apply(&self, mut config: BundleConfiguration) -> Result<BundleConfiguration> {
///         config.output.filename = config.output.filename.replace(".js", ".min.js");
///         Ok(config)
///     }
/// }
/// ```
pub trait BundleExtension: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, config: BundleConfiguration) -> Result<BundleConfiguration>;
}

/// Extensions available to declarations, keyed by name
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Arc<dyn BundleExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension under its own name, replacing any previous one
    pub fn register(&mut self, extension: impl BundleExtension + 'static) -> &mut Self {
        self.extensions
            .insert(extension.name().to_string(), Arc::new(extension));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn BundleExtension>> {
        self.extensions.get(name)
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.extensions.keys().collect();
        names.sort();
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &names)
            .finish()
    }
}
