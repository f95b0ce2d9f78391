use std::collections::BTreeSet;

use crate::taxonomy::category::SizeCategory;
use crate::taxonomy::rules::{ClassificationRules, SizeRules};

/// Assigns a physical size from a descriptor list.
///
/// A 12" token wins over a 7" token when both are present; a list with
/// neither is [`SizeCategory::Other`].
#[derive(Debug, Clone)]
pub struct SizeClassifier {
    twelve_inch: BTreeSet<String>,
    seven_inch: BTreeSet<String>,
}

impl SizeClassifier {
    #[must_use]
    pub fn new(rules: SizeRules) -> Self {
        Self {
            twelve_inch: rules.twelve_inch.into_iter().collect(),
            seven_inch: rules.seven_inch.into_iter().collect(),
        }
    }

    pub fn classify<S: AsRef<str>>(&self, descriptors: &[S]) -> SizeCategory {
        let has = |tokens: &BTreeSet<String>| {
            descriptors
                .iter()
                .any(|descriptor| tokens.contains(descriptor.as_ref()))
        };

        if has(&self.twelve_inch) {
            SizeCategory::TwelveInch
        } else if has(&self.seven_inch) {
            SizeCategory::SevenInch
        } else {
            SizeCategory::Other
        }
    }
}

impl Default for SizeClassifier {
    fn default() -> Self {
        Self::new(ClassificationRules::default().size_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lp_is_twelve_inch() {
        let classifier = SizeClassifier::default();
        assert_eq!(classifier.classify(&["LP", "Album"]), SizeCategory::TwelveInch);
        assert_eq!(classifier.classify(&["12\"", "45 RPM"]), SizeCategory::TwelveInch);
    }

    #[test]
    fn test_seven_inch() {
        let classifier = SizeClassifier::default();
        assert_eq!(classifier.classify(&["7\"", "Single"]), SizeCategory::SevenInch);
    }

    #[test]
    fn test_twelve_inch_wins_over_seven_inch() {
        let classifier = SizeClassifier::default();
        assert_eq!(classifier.classify(&["7\"", "LP"]), SizeCategory::TwelveInch);
        assert_eq!(classifier.classify(&["LP", "7\""]), SizeCategory::TwelveInch);
    }

    #[test]
    fn test_unmatched_is_other_size() {
        let classifier = SizeClassifier::default();
        let empty: [&str; 0] = [];
        assert_eq!(classifier.classify(&empty), SizeCategory::Other);
        assert_eq!(classifier.classify(&["10\"", "EP"]), SizeCategory::Other);
    }

    #[test]
    fn test_tokens_are_exact() {
        let classifier = SizeClassifier::default();
        assert_eq!(classifier.classify(&["lp"]), SizeCategory::Other);
        assert_eq!(classifier.classify(&["2xLP"]), SizeCategory::Other);
    }

    #[test]
    fn test_owned_strings() {
        let classifier = SizeClassifier::default();
        let descriptors = vec!["LP".to_string()];
        assert_eq!(classifier.classify(&descriptors), SizeCategory::TwelveInch);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_lp_with_seven_inch_is_always_twelve_inch(
                others in prop::collection::vec("[A-Za-z0-9\" ]{0,12}", 0..6),
                lp_at in any::<prop::sample::Index>(),
                seven_at in any::<prop::sample::Index>()
            ) {
                let mut descriptors = others;
                descriptors.insert(lp_at.index(descriptors.len() + 1), "LP".to_string());
                descriptors.insert(seven_at.index(descriptors.len() + 1), "7\"".to_string());

                let classifier = SizeClassifier::default();
                prop_assert_eq!(classifier.classify(&descriptors), SizeCategory::TwelveInch);
            }
        }
    }
}
