pub mod artist;
pub mod category;
pub mod color;
pub mod edition;
pub mod region;
pub mod rules;
pub mod size;

pub use category::{ColorCategory, EditionType, SizeCategory};
pub use color::ColorClassifier;
pub use edition::EditionClassifier;
pub use region::RegionParser;
pub use rules::{ClassificationRules, ColorRule, EditionRule, SizeRules};
pub use size::SizeClassifier;

/// The four table-driven classifiers, built from one rule set.
#[derive(Debug, Clone)]
pub struct Classifiers {
    pub color: ColorClassifier,
    pub region: RegionParser,
    pub size: SizeClassifier,
    pub edition: EditionClassifier,
}

impl Classifiers {
    #[must_use]
    pub fn from_rules(rules: &ClassificationRules) -> Self {
        Self {
            color: ColorClassifier::new(rules.color_rules.clone()),
            region: RegionParser::new(rules.region_aliases.clone()),
            size: SizeClassifier::new(rules.size_rules.clone()),
            edition: EditionClassifier::new(rules.edition_rules.clone()),
        }
    }
}

impl Default for Classifiers {
    fn default() -> Self {
        Self::from_rules(&ClassificationRules::default())
    }
}
