//! Match command implementation.
//!
//! Prints one line per path: the composed transform chain, `entry` for the
//! build root, or `pass-through`.

use std::path::Path;

use quetzal_config::{BundleConfiguration, RuleMatch};

use crate::cli::MatchArgs;
use crate::commands::utils;
use crate::error::Result;

pub fn execute(args: MatchArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let config = utils::load_configuration(&args.config, &cwd)?;

    for path in &args.paths {
        println!("{}", describe(&config, path));
    }
    Ok(())
}

/// One-line summary of the rule selection for `path`
pub fn describe(config: &BundleConfiguration, path: &Path) -> String {
    let selection = match config.select(path) {
        RuleMatch::PassThrough => "pass-through".to_string(),
        RuleMatch::EntryRoot { rule } => format!("entry (rule {rule})"),
        RuleMatch::Transform { rules, chain } => {
            let steps: Vec<&str> = chain.iter().map(|step| step.name.as_str()).collect();
            let rules: Vec<String> = rules.iter().map(ToString::to_string).collect();
            format!("{} (rules {})", steps.join(" -> "), rules.join(", "))
        }
    };
    format!("{}: {}", path.display(), selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quetzal_config::{BundleDeclaration, ConfigResolver};

    fn hooks() -> BundleConfiguration {
        ConfigResolver::new()
            .with_base_dir("/srv/app/assets")
            .resolve(&BundleDeclaration::hooks())
            .unwrap()
    }

    #[test]
    fn test_describe_selections() {
        let config = hooks();
        assert_eq!(
            describe(&config, Path::new("js/socket.js")),
            "js/socket.js: babel-loader (rules 1)"
        );
        assert_eq!(
            describe(&config, Path::new("js/quetzal_hooks.js")),
            "js/quetzal_hooks.js: entry (rule 0)"
        );
        assert_eq!(
            describe(&config, Path::new("node_modules/phoenix/phoenix.js")),
            "node_modules/phoenix/phoenix.js: pass-through"
        );
    }
}
