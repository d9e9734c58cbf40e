pub mod bundle;
pub mod declaration;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod pipeline;
pub mod resolver;
pub mod validation;

// Re-export main types
pub use bundle::*;
pub use declaration::*;
pub use error::*;
pub use extension::{BundleExtension, ExtensionRegistry};
pub use pipeline::{TransformContext, TransformRegistry, Transformer};
pub use resolver::ConfigResolver;

// Re-export discovery and validation
pub use discovery::ConfigDiscovery;
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
