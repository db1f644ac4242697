//! Exclusion rules for archive entries.
//!
//! An entry is dropped when any rule occurs anywhere in its name. Matching is
//! a plain substring test, so `.md` also rejects `notes.md.txt` and
//! `docs.mdx`.

/// Substrings excluded from every import, in evaluation order.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "META-INF",
    ".md",
    "BRANCH",
    "COMMITHASH",
    "LASTCOMMITDATETIME",
    "VERSION",
    ".map",
    ".yaml",
];

/// Ordered set of substrings that disqualify an archive entry.
///
/// # Examples
///
/// ```
/// use xpi_import::exclusion::ExclusionRules;
///
/// let rules = ExclusionRules::default();
/// assert!(rules.is_valid("background.js"));
/// assert!(!rules.is_valid("META-INF/mozilla.rsa"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    patterns: Vec<String>,
}

impl ExclusionRules {
    /// Create rules from the given substrings, keeping their order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Return the first rule that matches `name`, if any.
    #[must_use]
    pub fn matching_rule(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| name.contains(pattern))
    }

    /// Returns `true` when no rule occurs in `name`.
    #[must_use]
    pub fn is_valid(&self, name: &str) -> bool {
        self.matching_rule(name).is_none()
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rules() -> ExclusionRules {
        ExclusionRules::default()
    }

    #[rstest]
    #[case::signature("META-INF/mozilla.rsa")]
    #[case::manifest_in_meta("META-INF/manifest.mf")]
    #[case::readme("README.md")]
    #[case::md_in_middle("docs/notes.md.bak")]
    #[case::branch("BRANCH")]
    #[case::commit_hash("COMMITHASH")]
    #[case::commit_date("LASTCOMMITDATETIME")]
    #[case::version("VERSION")]
    #[case::source_map("main.js.map")]
    #[case::yaml("config/settings.yaml")]
    fn rejects_excluded_names(rules: ExclusionRules, #[case] name: &str) {
        assert!(!rules.is_valid(name), "expected {name} to be excluded");
    }

    #[rstest]
    #[case::script("a.js")]
    #[case::nested_script("controller/translation/worker.js")]
    #[case::wasm("bergamot-translator-worker.wasm")]
    #[case::html("popup.html")]
    #[case::manifest("manifest.json")]
    #[case::yml_is_not_yaml("config.yml")]
    #[case::lowercase_version("version.txt")]
    fn accepts_other_names(rules: ExclusionRules, #[case] name: &str) {
        assert!(rules.is_valid(name), "expected {name} to be kept");
    }

    #[rstest]
    fn reports_first_matching_rule(rules: ExclusionRules) {
        assert_eq!(rules.matching_rule("META-INF/README.md"), Some("META-INF"));
        assert_eq!(rules.matching_rule("a.js"), None);
    }

    #[test]
    fn empty_rules_accept_everything() {
        let rules = ExclusionRules::new(Vec::<String>::new());
        assert!(rules.is_valid("META-INF/mozilla.rsa"));
        assert_eq!(rules.matching_rule("notes.md"), None);
    }
}
