/*!
 * Inline markup normalization for dictionary prose.
 *
 * Dictionary text carries formatting tokens such as `{bc}`, `{it}...{/it}` or
 * `{d_link|run|run:1}`. The normalizer turns such text into plain prose by
 * applying an ordered list of (pattern, substitution) rules and trimming the
 * result. Tokens that no rule matches are left untouched.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Built-in rules as (name, pattern, substitution), in application order
const STANDARD_RULES: &[(&str, &str, &str)] = &[
    // Bold colon / break control token
    ("bc", r"\{bc\}", ""),
    // Cross-reference link, keep the display text
    ("d_link", r"\{d_link\|([^|{}]*)\|[^{}]*\}", "$1"),
    // Italic span
    ("it", r"(?s)\{it\}(.*?)\{/it\}", "$1"),
    // Auto link
    ("a_link", r"\{a_link\|([^|{}]*)\}", "$1"),
    // Synonymous cross-reference
    ("sx", r"\{sx\|([^|{}]*)\|[^{}]*\}", "$1"),
    // Etymology, "more at" and directional cross-references
    ("xref", r"\{(?:et_link|i_link|mat|dxt)\|([^|{}]*)\|[^{}]*\}", "$1"),
    // Formatting and grouping tags around text that is kept
    (
        "format",
        r"\{/?(?:b|inf|sup|sc|wi|gloss|parahw|phrase|qword|ma|dx|dx_def|dx_ety)\}",
        "",
    ),
    ("ldquo", r"\{ldquo\}", "\u{201C}"),
    ("rdquo", r"\{rdquo\}", "\u{201D}"),
];

/// Passes that do not shorten the text before the fixpoint search gives up.
/// Only configured rules can trip it; every built-in rewrite shortens the text.
const MAX_NON_SHRINKING_PASSES: usize = 16;

static STANDARD_NORMALIZER: Lazy<MarkupNormalizer> = Lazy::new(MarkupNormalizer::standard);

/// Serializable description of a rewrite rule, used by the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkupRuleSpec {
    /// Short identifier used in diagnostics
    pub name: String,
    /// Regular expression matching the token
    pub pattern: String,
    /// Substitution, may reference capture groups as `$1`
    #[serde(default)]
    pub replacement: String,
}

/// A compiled rewrite rule
#[derive(Debug, Clone)]
pub struct MarkupRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl MarkupRule {
    /// Compile a new rule
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the rule to every match in `text`
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

impl TryFrom<&MarkupRuleSpec> for MarkupRule {
    type Error = regex::Error;

    fn try_from(spec: &MarkupRuleSpec) -> Result<Self, Self::Error> {
        Self::new(spec.name.clone(), &spec.pattern, spec.replacement.clone())
    }
}

/// Ordered rule set turning markup-laden text into plain text
#[derive(Debug, Clone)]
pub struct MarkupNormalizer {
    rules: Vec<MarkupRule>,
}

impl MarkupNormalizer {
    /// Normalizer with the built-in rule set
    pub fn standard() -> Self {
        let rules = STANDARD_RULES
            .iter()
            .map(|(name, pattern, replacement)| {
                // Built-in patterns are constants
                MarkupRule::new(*name, pattern, *replacement).unwrap()
            })
            .collect();

        Self { rules }
    }

    /// Normalizer with no rules at all; only trims
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Built-in rules followed by `extra` rules, in the given order
    pub fn with_extra_rules(extra: &[MarkupRuleSpec]) -> Result<Self, regex::Error> {
        let mut normalizer = Self::standard();
        for spec in extra {
            normalizer.rules.push(MarkupRule::try_from(spec)?);
        }
        Ok(normalizer)
    }

    /// Append a rule at the end of the list
    pub fn push_rule(&mut self, rule: MarkupRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[MarkupRule] {
        &self.rules
    }

    /// Strip markup from `text`.
    ///
    /// Passes are repeated until the text stops changing so that removing one
    /// token cannot leave another one behind, which keeps the operation
    /// idempotent.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.single_pass(text);
        let mut non_shrinking = 0;
        loop {
            let next = self.single_pass(&current);
            if next == current {
                return current;
            }
            if next.len() >= current.len() {
                non_shrinking += 1;
                if non_shrinking >= MAX_NON_SHRINKING_PASSES {
                    warn!("Markup rules did not settle, stopping after {} growing passes", non_shrinking);
                    return next;
                }
            }
            current = next;
        }
    }

    fn single_pass(&self, text: &str) -> String {
        let mut result = text.to_string();
        for rule in &self.rules {
            result = rule.apply(&result);
        }
        result.trim().to_string()
    }
}

impl Default for MarkupNormalizer {
    fn default() -> Self {
        Self::standard()
    }
}

/// Normalize `text` with the built-in rule set
pub fn normalize(text: &str) -> String {
    STANDARD_NORMALIZER.normalize(text)
}
