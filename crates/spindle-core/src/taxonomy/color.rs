use std::collections::BTreeSet;

use crate::taxonomy::category::ColorCategory;
use crate::taxonomy::rules::{ClassificationRules, ColorRule};

/// Maps free-text pressing descriptions onto a [`ColorCategory`].
///
/// Every rule is tested against the description; the result depends only
/// on how many distinct labels matched, never on rule order:
///
/// - no label → [`ColorCategory::Black`] (standard pressings carry no color text)
/// - one label → that label
/// - two or more → [`ColorCategory::Multicolor`]
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    rules: Vec<ColorRule>,
}

impl ColorClassifier {
    /// Build a classifier from a color table. Substrings are lowercased once
    /// here so classification only lowercases the description.
    #[must_use]
    pub fn new(rules: Vec<ColorRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ColorRule {
                label: rule.label,
                match_any: rule.match_any.iter().map(|p| p.to_lowercase()).collect(),
            })
            .collect();
        Self { rules }
    }

    /// All labels with at least one substring present in `description`.
    pub fn matches(&self, description: &str) -> BTreeSet<ColorCategory> {
        let description = description.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| {
                rule.match_any
                    .iter()
                    .any(|pattern| description.contains(pattern.as_str()))
            })
            .map(|rule| rule.label)
            .collect()
    }

    pub fn classify(&self, description: &str) -> ColorCategory {
        let matched = self.matches(description);
        let mut labels = matched.into_iter();
        match (labels.next(), labels.next()) {
            (None, _) => ColorCategory::Black,
            (Some(label), None) => label,
            (Some(_), Some(_)) => ColorCategory::Multicolor,
        }
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new(ClassificationRules::default().color_rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_alias_maps_to_label() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify("Emerald"), ColorCategory::Green);
        assert_eq!(classifier.classify("Ocean Blue"), ColorCategory::Blue);
        assert_eq!(classifier.classify("Translucent Violet"), ColorCategory::Purple);
        assert_eq!(classifier.classify("Grey Marble"), ColorCategory::Gray);
        assert_eq!(classifier.classify("Glow In The Dark"), ColorCategory::Green);
    }

    #[test]
    fn test_two_colors_are_multicolor() {
        let classifier = ColorClassifier::default();
        assert_eq!(
            classifier.classify("Green and Blue Swirl"),
            ColorCategory::Multicolor
        );
        assert_eq!(
            classifier.classify("Clear With Orange Splatter"),
            ColorCategory::Multicolor
        );
    }

    #[test]
    fn test_no_match_defaults_to_black() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify(""), ColorCategory::Black);
        assert_eq!(classifier.classify("Bone"), ColorCategory::Black);
        assert_eq!(classifier.classify("Standard Black"), ColorCategory::Black);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify("TANGERINE"), ColorCategory::Orange);
        assert_eq!(classifier.classify("picture DISC"), ColorCategory::PictureDisc);
    }

    #[test]
    fn test_aliases_of_one_label_count_once() {
        let classifier = ColorClassifier::default();
        assert_eq!(classifier.classify("Aqua Blue"), ColorCategory::Blue);
        assert_eq!(classifier.matches("Aqua Blue").len(), 1);
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let mut reversed = ClassificationRules::default().color_rules;
        reversed.reverse();
        let forward = ColorClassifier::default();
        let backward = ColorClassifier::new(reversed);

        for description in ["Green and Blue Swirl", "Emerald", "Bone", "Gold Nugget"] {
            assert_eq!(forward.classify(description), backward.classify(description));
        }
    }

    #[test]
    fn test_fixture_table() {
        let classifier = ColorClassifier::new(vec![
            ColorRule::new(ColorCategory::Blue, ["NAVY"]),
            ColorRule::new(ColorCategory::Red, ["crimson"]),
        ]);
        assert_eq!(classifier.classify("Navy Haze"), ColorCategory::Blue);
        assert_eq!(classifier.classify("Crimson/Navy"), ColorCategory::Multicolor);
        assert_eq!(classifier.classify("Blue"), ColorCategory::Black);
    }
}
