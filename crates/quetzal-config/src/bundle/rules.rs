use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::declaration::{ConditionDeclaration, RuleRole};

/// Resolved `test`/`exclude` predicate
#[derive(Debug, Clone)]
pub enum Condition {
    /// Matches the path itself and everything below it
    Path(PathBuf),
    /// Matches when the regex is found anywhere in the candidate path
    Pattern(Regex),
}

impl Condition {
    pub fn matches(&self, candidate: &Path) -> bool {
        match self {
            Self::Path(path) => candidate.starts_with(path),
            Self::Pattern(regex) => regex.is_match(&candidate.to_string_lossy()),
        }
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Path(a), Self::Path(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let declaration = match self {
            Self::Path(path) => ConditionDeclaration::path(path.to_string_lossy()),
            Self::Pattern(regex) => ConditionDeclaration::pattern(regex.as_str()),
        };
        declaration.serialize(serializer)
    }
}

/// Named transformation step, passed through opaquely to the transform engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStep {
    pub name: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl TransformStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
        }
    }
}

/// Resolved file-matching rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformRule {
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Condition>,
    pub chain: Vec<TransformStep>,
    pub role: RuleRole,
}

impl TransformRule {
    /// Exclusion is a hard veto over a successful match.
    pub fn applies_to(&self, candidate: &Path) -> bool {
        self.condition.matches(candidate)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.matches(candidate))
    }
}

/// Outcome of rule selection for one file
#[derive(Debug, Clone, PartialEq)]
pub enum RuleMatch<'a> {
    /// No rule applies; the file passes through unmodified
    PassThrough,
    /// An entry marker claimed the file as the build root
    EntryRoot { rule: usize },
    /// Chains of every applicable transform rule, composed in declaration order
    Transform {
        rules: Vec<usize>,
        chain: Vec<&'a TransformStep>,
    },
}

impl RuleMatch<'_> {
    pub fn chain(&self) -> &[&TransformStep] {
        match self {
            Self::Transform { chain, .. } => chain,
            _ => &[],
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// Evaluate `rules` in order against an absolute candidate path.
pub fn select_rules<'a>(rules: &'a [TransformRule], candidate: &Path) -> RuleMatch<'a> {
    let mut applied = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        if !rule.applies_to(candidate) {
            continue;
        }
        match rule.role {
            RuleRole::Entry => return RuleMatch::EntryRoot { rule: index },
            RuleRole::Transform => applied.push(index),
        }
    }

    if applied.is_empty() {
        return RuleMatch::PassThrough;
    }

    let chain = applied
        .iter()
        .flat_map(|&index| rules[index].chain.iter())
        .collect();

    RuleMatch::Transform {
        rules: applied,
        chain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> Condition {
        Condition::Pattern(Regex::new(source).unwrap())
    }

    fn transform(condition: Condition, steps: &[&str]) -> TransformRule {
        TransformRule {
            condition,
            exclude: None,
            chain: steps.iter().map(|name| TransformStep::new(*name)).collect(),
            role: RuleRole::Transform,
        }
    }

    #[test]
    fn path_condition_matches_components_not_prefix_strings() {
        let condition = Condition::Path(PathBuf::from("/app/js"));
        assert!(condition.matches(Path::new("/app/js/hooks.js")));
        assert!(!condition.matches(Path::new("/app/json/data.js")));
    }

    #[test]
    fn exclusion_vetoes_match() {
        let mut rule = transform(pattern(r"\.js$"), &["babel-loader"]);
        rule.exclude = Some(pattern("node_modules"));

        assert!(rule.applies_to(Path::new("/app/js/util.js")));
        assert!(!rule.applies_to(Path::new("/app/node_modules/lib/index.js")));
    }

    #[test]
    fn chains_compose_in_declaration_order() {
        let rules = vec![
            transform(pattern(r"\.js$"), &["strip-debug", "babel-loader"]),
            transform(pattern("/app/js/"), &["banner"]),
        ];

        let selection = select_rules(&rules, Path::new("/app/js/util.js"));
        let names: Vec<_> = selection.chain().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["strip-debug", "babel-loader", "banner"]);
        assert!(matches!(selection, RuleMatch::Transform { rules, .. } if rules == vec![0, 1]));
    }

    #[test]
    fn entry_marker_claims_file_even_when_declared_last() {
        let mut marker = transform(Condition::Path(PathBuf::from("/app/js/hooks.js")), &[]);
        marker.role = RuleRole::Entry;
        let rules = vec![transform(pattern(r"\.js$"), &["babel-loader"]), marker];

        let selection = select_rules(&rules, Path::new("/app/js/hooks.js"));
        assert_eq!(selection, RuleMatch::EntryRoot { rule: 1 });
        assert!(selection.chain().is_empty());
    }

    #[test]
    fn unmatched_file_passes_through() {
        let rules = vec![transform(pattern(r"\.js$"), &["babel-loader"])];
        assert!(select_rules(&rules, Path::new("/app/css/site.css")).is_pass_through());
    }

    #[test]
    fn conditions_compare_by_source() {
        assert_eq!(pattern(r"\.js$"), pattern(r"\.js$"));
        assert_ne!(pattern(r"\.js$"), Condition::Path(PathBuf::from(r"\.js$")));
    }
}
