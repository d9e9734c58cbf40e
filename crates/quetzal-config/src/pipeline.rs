//! Applies the selected transform chain to a source file.
//!
//! Step implementations belong to the transform engine; this module only
//! looks them up by name and runs them in chain order.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::bundle::{BundleConfiguration, RuleMatch};
use crate::error::{ConfigError, Result};

/// What a step sees besides the source text
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Absolute path of the file being transformed
    pub path: &'a Path,
    /// Options declared alongside the step name
    pub options: &'a Value,
}

pub trait Transformer: Send + Sync {
    fn transform(&self, source: String, context: &TransformContext<'_>) -> anyhow::Result<String>;
}

impl<F> Transformer for F
where
    F: Fn(String, &TransformContext<'_>) -> anyhow::Result<String> + Send + Sync,
{
    fn transform(&self, source: String, context: &TransformContext<'_>) -> anyhow::Result<String> {
        self(source, context)
    }
}

/// Transform steps by name
#[derive(Clone, Default)]
pub struct TransformRegistry {
    steps: HashMap<String, Arc<dyn Transformer>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        transformer: impl Transformer + 'static,
    ) -> &mut Self {
        self.steps.insert(name.into(), Arc::new(transformer));
        self
    }

    /// Run the chain `config` selects for `path` over `source`.
    ///
    /// Files matching no rule, and the entry root, come back unchanged. Any
    /// unknown or failing step fails the whole file.
    pub fn run(&self, config: &BundleConfiguration, path: &Path, source: String) -> Result<String> {
        let file = config.absolute_path(path);
        let selection = config.select(&file);
        if let RuleMatch::EntryRoot { rule } = selection {
            trace!(file = %file.display(), rule, "entry root, no transform chain");
        }

        let mut source = source;
        for step in selection.chain() {
            let transformer = self.steps.get(&step.name).ok_or_else(|| ConfigError::TransformChain {
                file: file.clone(),
                step: step.name.clone(),
                message: "unknown transform step".to_string(),
            })?;

            trace!(file = %file.display(), step = %step.name, "applying transform step");
            let context = TransformContext {
                path: &file,
                options: &step.options,
            };
            source = transformer
                .transform(source, &context)
                .map_err(|err| ConfigError::TransformChain {
                    file: file.clone(),
                    step: step.name.clone(),
                    message: format!("{err:#}"),
                })?;
        }

        Ok(source)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.steps.keys().collect();
        names.sort();
        f.debug_struct("TransformRegistry")
            .field("steps", &names)
            .finish()
    }
}
