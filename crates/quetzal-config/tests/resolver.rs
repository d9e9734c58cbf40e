//! Tests for declaration resolution and extension hooks.

use quetzal_config::{
    BundleConfiguration, BundleDeclaration, BundleExtension, ConfigError, ConfigResolver,
    ExtensionRegistry, Result,
};
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

fn assets_dir() -> PathBuf {
    std::env::temp_dir().join("quetzal").join("assets")
}

struct RenameOutput(&'static str);

impl BundleExtension for RenameOutput {
    fn name(&self) -> &str {
        "rename-output"
    }

    fn apply(&self, mut config: BundleConfiguration) -> Result<BundleConfiguration> {
        config.output.filename = self.0.to_string();
        Ok(config)
    }
}

struct SuffixOutput;

impl BundleExtension for SuffixOutput {
    fn name(&self) -> &str {
        "suffix-output"
    }

    fn apply(&self, mut config: BundleConfiguration) -> Result<BundleConfiguration> {
        config.output.filename = config.output.filename.replace(".js", ".min.js");
        Ok(config)
    }
}

struct Reject;

impl BundleExtension for Reject {
    fn name(&self) -> &str {
        "reject"
    }

    fn apply(&self, _config: BundleConfiguration) -> Result<BundleConfiguration> {
        Err(ConfigError::InvalidConfiguration {
            field: "extensions".to_string(),
            message: "rejected".to_string(),
        })
    }
}

#[test]
fn resolving_twice_is_deterministic() {
    let resolver = ConfigResolver::new().with_base_dir(assets_dir());
    let declaration = BundleDeclaration::hooks();

    let first = resolver.resolve(&declaration).unwrap();
    let second = resolver.resolve(&declaration).unwrap();
    assert_eq!(first, second);
}

#[test]
#[serial]
fn output_directory_ignores_working_directory() {
    let original = std::env::current_dir().unwrap();
    let declaration = BundleDeclaration::hooks().with_origin(assets_dir().join("quetzal.toml"));

    let one = TempDir::new().unwrap();
    std::env::set_current_dir(one.path()).unwrap();
    let from_one = ConfigResolver::new().resolve(&declaration);

    let two = TempDir::new().unwrap();
    std::env::set_current_dir(two.path()).unwrap();
    let from_two = ConfigResolver::new().resolve(&declaration);

    std::env::set_current_dir(original).unwrap();

    let from_one = from_one.unwrap();
    let from_two = from_two.unwrap();
    assert_eq!(from_one.output.directory, from_two.output.directory);
    assert_eq!(
        from_one.output.directory,
        std::env::temp_dir().join("quetzal").join("priv").join("static")
    );
}

#[test]
fn empty_entry_is_invalid() {
    let mut declaration = BundleDeclaration::hooks();
    declaration.entry = "  ".to_string();

    let err = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .resolve(&declaration)
        .unwrap_err();
    match err {
        ConfigError::InvalidConfiguration { field, .. } => assert_eq!(field, "entry"),
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn unsupported_library_target_is_invalid() {
    let mut declaration = BundleDeclaration::hooks();
    declaration.output.library_target = "system".to_string();

    let err = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .resolve(&declaration)
        .unwrap_err();
    assert!(err.to_string().contains("output.library_target"));
}

#[test]
fn extensions_apply_in_declaration_order() {
    let mut registry = ExtensionRegistry::new();
    registry
        .register(RenameOutput("hooks.js"))
        .register(SuffixOutput);

    let mut declaration = BundleDeclaration::hooks();
    declaration.extensions = vec!["rename-output".to_string(), "suffix-output".to_string()];
    let config = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .with_extensions(registry.clone())
        .resolve(&declaration)
        .unwrap();
    assert_eq!(config.output.filename, "hooks.min.js");
    assert_eq!(config.extensions, vec!["rename-output", "suffix-output"]);

    declaration.extensions.reverse();
    let config = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .with_extensions(registry)
        .resolve(&declaration)
        .unwrap();
    assert_eq!(config.output.filename, "hooks.js");
}

#[test]
fn unknown_extension_is_a_no_op() {
    let mut declaration = BundleDeclaration::hooks();
    declaration.extensions = vec!["does-not-exist".to_string()];

    let with_unknown = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .resolve(&declaration)
        .unwrap();
    let without = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .resolve(&BundleDeclaration::hooks())
        .unwrap();

    assert_eq!(with_unknown, without);
    assert!(with_unknown.extensions.is_empty());
}

#[test]
fn failing_extension_aborts_resolution() {
    let mut registry = ExtensionRegistry::new();
    registry.register(Reject);

    let mut declaration = BundleDeclaration::hooks();
    declaration.extensions = vec!["reject".to_string()];
    let result = ConfigResolver::new()
        .with_base_dir(assets_dir())
        .with_extensions(registry)
        .resolve(&declaration);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidConfiguration { .. })
    ));
}
