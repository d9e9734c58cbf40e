//! Turns a [`BundleDeclaration`] into a [`BundleConfiguration`].
//!
//! Relative paths are resolved against the declaration's own location, never
//! the process working directory, so a build behaves the same wherever it is
//! started from. The resolver performs no filesystem I/O.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use regex::Regex;
use tracing::{debug, warn};

use crate::bundle::{
    BundleConfiguration, Condition, ExposureStrategy, GlobalBinding, OutputSpec, TransformRule,
    TransformStep,
};
use crate::declaration::{
    BundleDeclaration, ConditionDeclaration, OutputDeclaration, RuleDeclaration, RuleRole,
    StepDeclaration,
};
use crate::error::{ConfigError, Result};
use crate::extension::ExtensionRegistry;

#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    base_dir: Option<PathBuf>,
    extensions: ExtensionRegistry,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve against `dir` instead of the declaration's origin
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Extensions that declared names are looked up in
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn resolve(&self, declaration: &BundleDeclaration) -> Result<BundleConfiguration> {
        let context = self.context(declaration)?;
        debug!(context = %context.display(), "resolving bundle declaration");

        if declaration.entry.trim().is_empty() {
            return Err(ConfigError::invalid("entry", "entry path must not be empty"));
        }
        let entry_path = context.join(&declaration.entry).clean();

        let output = resolve_output(&context, &declaration.output)?;

        let rules = declaration
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| resolve_rule(&context, index, rule))
            .collect::<Result<Vec<_>>>()?;

        let mut config = BundleConfiguration {
            context,
            entry_path,
            output,
            rules,
            extensions: Vec::new(),
        };

        for name in &declaration.extensions {
            let Some(extension) = self.extensions.get(name) else {
                warn!(extension = %name, "unknown extension, skipping");
                continue;
            };
            debug!(extension = %name, "applying extension");
            config = extension.apply(config)?;
            config.extensions.push(name.clone());
        }

        Ok(config)
    }

    fn context(&self, declaration: &BundleDeclaration) -> Result<PathBuf> {
        let base = match (&self.base_dir, &declaration.origin) {
            (Some(dir), _) => dir.clone(),
            (None, Some(origin)) => origin
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    ConfigError::invalid(
                        "context",
                        format!("config origin {} has no parent directory", origin.display()),
                    )
                })?,
            (None, None) => {
                return Err(ConfigError::invalid(
                    "context",
                    "base directory is undeterminable: declaration has no origin and no base directory was given",
                ));
            }
        };

        if !base.is_absolute() {
            return Err(ConfigError::invalid(
                "context",
                format!("base directory {} must be absolute", base.display()),
            ));
        }

        Ok(base.clean())
    }
}

fn resolve_output(context: &Path, output: &OutputDeclaration) -> Result<OutputSpec> {
    if output.filename.trim().is_empty() {
        return Err(ConfigError::invalid(
            "output.filename",
            "filename must not be empty",
        ));
    }
    if Path::new(&output.filename).is_absolute() {
        return Err(ConfigError::invalid(
            "output.filename",
            format!("filename {} must be relative to output.path", output.filename),
        ));
    }
    if output.library.trim().is_empty() {
        return Err(ConfigError::invalid(
            "output.library",
            "exposed library name must not be empty",
        ));
    }

    let strategy: ExposureStrategy = output
        .library_target
        .parse()
        .map_err(|message| ConfigError::invalid("output.library_target", message))?;
    let global_binding: GlobalBinding = output
        .global_object
        .parse()
        .map_err(|message| ConfigError::invalid("output.global_object", message))?;

    Ok(OutputSpec {
        filename: output.filename.clone(),
        directory: context.join(&output.path).clean(),
        exposed_name: output.library.clone(),
        strategy,
        global_binding,
    })
}

fn resolve_rule(context: &Path, index: usize, rule: &RuleDeclaration) -> Result<TransformRule> {
    let condition = resolve_condition(context, &format!("rules[{index}].test"), &rule.test)?;
    let exclude = rule
        .exclude
        .as_ref()
        .map(|exclude| resolve_condition(context, &format!("rules[{index}].exclude"), exclude))
        .transpose()?;

    if rule.role == RuleRole::Entry && !rule.chain.is_empty() {
        return Err(ConfigError::invalid(
            format!("rules[{index}].use"),
            "entry marker rules cannot carry a transform chain",
        ));
    }

    let chain = rule
        .chain
        .iter()
        .map(|step| {
            let step = match step {
                StepDeclaration::Name(name) => TransformStep::new(name.clone()),
                StepDeclaration::Detailed { loader, options } => TransformStep {
                    name: loader.clone(),
                    options: options.clone(),
                },
            };
            if step.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("rules[{index}].use"),
                    "transform step name must not be empty",
                ));
            }
            Ok(step)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TransformRule {
        condition,
        exclude,
        chain,
        role: rule.role,
    })
}

fn resolve_condition(
    context: &Path,
    field: &str,
    condition: &ConditionDeclaration,
) -> Result<Condition> {
    match (&condition.path, &condition.pattern) {
        (Some(path), None) => Ok(Condition::Path(context.join(path).clean())),
        (None, Some(pattern)) => Regex::new(pattern)
            .map(Condition::Pattern)
            .map_err(|e| ConfigError::invalid(field, e.to_string())),
        _ => Err(ConfigError::invalid(
            field,
            "exactly one of `path` or `pattern` must be set",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\srv\app\assets")
        } else {
            PathBuf::from("/srv/app/assets")
        }
    }

    #[test]
    fn resolves_output_directory_above_context() {
        let config = ConfigResolver::new()
            .with_base_dir(base())
            .resolve(&BundleDeclaration::hooks())
            .unwrap();

        assert_eq!(config.output.directory, base().join("../priv/static").clean());
        assert_eq!(
            config.output.output_path(),
            base().join("../priv/static/quetzal_hooks.js").clean()
        );
        assert_eq!(config.entry_path, base().join("js/quetzal_hooks.js"));
    }

    #[test]
    fn origin_directory_is_the_default_base() {
        let declaration = BundleDeclaration::hooks().with_origin(base().join("quetzal.toml"));
        let config = ConfigResolver::new().resolve(&declaration).unwrap();
        assert_eq!(config.context, base());
    }

    #[test]
    fn base_dir_override_wins_over_origin() {
        let declaration = BundleDeclaration::hooks().with_origin(base().join("quetzal.toml"));
        let other = base().join("other");
        let config = ConfigResolver::new()
            .with_base_dir(&other)
            .resolve(&declaration)
            .unwrap();
        assert_eq!(config.context, other);
    }

    #[test]
    fn missing_base_is_invalid() {
        let err = ConfigResolver::new()
            .resolve(&BundleDeclaration::hooks())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration { ref field, .. } if field == "context"
        ));
    }

    #[test]
    fn relative_base_is_invalid() {
        let err = ConfigResolver::new()
            .with_base_dir("assets")
            .resolve(&BundleDeclaration::hooks())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn condition_needs_exactly_one_predicate() {
        let mut declaration = BundleDeclaration::hooks();
        declaration.rules[1].test = ConditionDeclaration::default();
        let err = ConfigResolver::new()
            .with_base_dir(base())
            .resolve(&declaration)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration { ref field, .. } if field == "rules[1].test"
        ));
    }

    #[test]
    fn invalid_pattern_is_reported_with_its_rule() {
        let mut declaration = BundleDeclaration::hooks();
        declaration.rules[1].exclude = Some(ConditionDeclaration::pattern("node_modules("));
        let err = ConfigResolver::new()
            .with_base_dir(base())
            .resolve(&declaration)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration { ref field, .. } if field == "rules[1].exclude"
        ));
    }

    #[test]
    fn entry_marker_with_chain_is_invalid() {
        let mut declaration = BundleDeclaration::hooks();
        declaration.rules[0]
            .chain
            .push(StepDeclaration::Name("babel-loader".to_string()));
        assert!(ConfigResolver::new()
            .with_base_dir(base())
            .resolve(&declaration)
            .is_err());
    }
}
