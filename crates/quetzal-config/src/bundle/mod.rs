//! Resolved bundle configuration handed to the bundling engine.

mod exposure;
mod rules;

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;

pub use exposure::{ExposureStrategy, GlobalBinding, LoaderEnvironment, Registration};
pub use rules::{select_rules, Condition, RuleMatch, TransformRule, TransformStep};

/// Fully resolved, immutable bundle configuration.
///
/// Every path is absolute and normalized against [`BundleConfiguration::context`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleConfiguration {
    /// Directory the declaration was resolved against
    pub context: PathBuf,

    /// Sole compilation root
    pub entry_path: PathBuf,

    /// Output target
    pub output: OutputSpec,

    /// Ordered file-matching rules
    pub rules: Vec<TransformRule>,

    /// Extension hooks applied during resolution, in application order
    pub extensions: Vec<String>,
}

/// Where and how the artifact is emitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpec {
    pub filename: String,
    pub directory: PathBuf,
    pub exposed_name: String,
    pub strategy: ExposureStrategy,
    pub global_binding: GlobalBinding,
}

impl OutputSpec {
    /// Absolute path of the emitted artifact
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn register(&self, env: LoaderEnvironment) -> Registration {
        self.strategy
            .negotiate(env, &self.exposed_name, &self.global_binding)
    }

    pub fn render_wrapper(&self, body: &str) -> String {
        self.strategy
            .render_wrapper(&self.exposed_name, &self.global_binding, body)
    }
}

impl BundleConfiguration {
    /// Pick the transform chain for a source file.
    ///
    /// Relative paths are taken relative to [`Self::context`].
    ///
    /// ```
    /// use std::path::Path;
    /// use quetzal_config::{BundleDeclaration, ConfigResolver};
    ///
    /// let config = ConfigResolver::new()
    ///     .with_base_dir("/srv/app/assets")
    ///     .resolve(&BundleDeclaration::hooks())
    ///     .unwrap();
    ///
    /// let selection = config.select(Path::new("js/socket.js"));
    /// assert_eq!(selection.chain()[0].name, "babel-loader");
    /// ```
    pub fn select(&self, path: &Path) -> RuleMatch<'_> {
        let candidate = self.absolute_path(path);
        select_rules(&self.rules, &candidate)
    }

    /// Whether `path` is the compilation root
    pub fn is_entry(&self, path: &Path) -> bool {
        self.absolute_path(path) == self.entry_path
    }

    /// `path` joined onto [`Self::context`] and normalized; absolute paths are kept
    pub fn absolute_path(&self, path: &Path) -> PathBuf {
        self.context.join(path).clean()
    }
}
