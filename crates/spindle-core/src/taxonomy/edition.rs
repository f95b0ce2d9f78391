use crate::taxonomy::category::EditionType;
use crate::taxonomy::rules::{ClassificationRules, EditionRule};

/// Assigns an edition type by walking a priority chain of rules.
///
/// The first rule with a token present anywhere in the descriptor list
/// wins, so rarer designations dominate commoner ones regardless of the
/// order descriptors are listed in. No match is [`EditionType::Standard`].
#[derive(Debug, Clone)]
pub struct EditionClassifier {
    rules: Vec<EditionRule>,
}

impl EditionClassifier {
    #[must_use]
    pub fn new(rules: Vec<EditionRule>) -> Self {
        Self { rules }
    }

    /// The rule that decides the edition type, if any.
    pub fn matching_rule<S: AsRef<str>>(&self, descriptors: &[S]) -> Option<&EditionRule> {
        self.rules.iter().find(|rule| {
            rule.match_any
                .iter()
                .any(|token| descriptors.iter().any(|d| token == d.as_ref()))
        })
    }

    pub fn classify<S: AsRef<str>>(&self, descriptors: &[S]) -> EditionType {
        self.matching_rule(descriptors)
            .map_or(EditionType::Standard, |rule| rule.output)
    }
}

impl Default for EditionClassifier {
    fn default() -> Self {
        Self::new(ClassificationRules::default().edition_rules)
    }
}
