//! Classification rule tables.
//!
//! Every lookup table the classifiers consult (color substrings, region
//! aliases, size tokens, the edition priority chain) lives in
//! [`ClassificationRules`]. The built-in defaults cover the vocabulary the
//! catalog uses today; a TOML file can replace any section without touching
//! code, and tests can hand fixture tables straight to the classifiers.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use spindle_core::taxonomy::rules::ClassificationRules;
//!
//! let rules = ClassificationRules::load(Path::new("config/rules.toml")).unwrap();
//! assert!(!rules.color_rules.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::taxonomy::category::{ColorCategory, EditionType};

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

/// Top-level container for the classification tables.
///
/// Sections missing from a rules file fall back to the built-in defaults,
/// so a file that only adds a region alias keeps the stock color table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Color label to substrings. A label matches when any of its
    /// substrings occurs in the pressing text (case-insensitive).
    #[serde(default = "default_color_rules")]
    pub color_rules: Vec<ColorRule>,

    /// Region token aliases, applied after splitting and trimming.
    #[serde(default = "default_region_aliases")]
    pub region_aliases: BTreeMap<String, String>,

    /// Descriptor tokens that identify each physical size.
    #[serde(default)]
    pub size_rules: SizeRules,

    /// Edition rules in priority order; the first matching rule wins.
    #[serde(default = "default_edition_rules")]
    pub edition_rules: Vec<EditionRule>,
}

/// Maps a set of substrings onto one canonical color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    pub label: ColorCategory,

    #[serde(default)]
    pub match_any: Vec<String>,
}

/// Descriptor tokens for the two sizes the catalog distinguishes.
///
/// Matching is exact token membership; anything else is "Other Size".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRules {
    #[serde(default = "default_twelve_inch")]
    pub twelve_inch: Vec<String>,

    #[serde(default = "default_seven_inch")]
    pub seven_inch: Vec<String>,
}

/// One link of the edition priority chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionRule {
    /// Human-readable rule name for traceability.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Match if the descriptor list contains any of these tokens exactly.
    #[serde(default)]
    pub match_any: Vec<String>,

    pub output: EditionType,
}

impl ColorRule {
    #[must_use]
    pub fn new<I, S>(label: ColorCategory, match_any: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label,
            match_any: match_any.into_iter().map(Into::into).collect(),
        }
    }
}

impl EditionRule {
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, match_any: I, output: EditionType) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            match_any: match_any.into_iter().map(Into::into).collect(),
            output,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn default_color_rules() -> Vec<ColorRule> {
    vec![
        ColorRule::new(ColorCategory::Blue, ["blue", "aqua", "ocean"]),
        ColorRule::new(ColorCategory::Purple, ["purple", "violet"]),
        ColorRule::new(ColorCategory::Green, ["green", "emerald", "glow in the dark"]),
        ColorRule::new(ColorCategory::Yellow, ["yellow", "gold"]),
        ColorRule::new(ColorCategory::Pink, ["pink"]),
        ColorRule::new(ColorCategory::Red, ["red"]),
        ColorRule::new(ColorCategory::Orange, ["orange", "tangerine"]),
        ColorRule::new(ColorCategory::White, ["white", "cream"]),
        ColorRule::new(ColorCategory::Brown, ["brown", "chestnut"]),
        ColorRule::new(ColorCategory::Clear, ["clear"]),
        ColorRule::new(ColorCategory::PictureDisc, ["picture disc"]),
        ColorRule::new(ColorCategory::Gray, ["gray", "grey"]),
        ColorRule::new(ColorCategory::Black, ["black"]),
    ]
}

fn default_region_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("US".to_string(), "USA".to_string())])
}

fn default_twelve_inch() -> Vec<String> {
    strings(&["LP", "12\""])
}

fn default_seven_inch() -> Vec<String> {
    strings(&["7\""])
}

fn default_edition_rules() -> Vec<EditionRule> {
    vec![
        EditionRule::new(
            "record-store-day",
            ["Record Store Day"],
            EditionType::RecordStoreDay,
        ),
        EditionRule::new(
            "limited-edition",
            ["Limited Edition"],
            EditionType::LimitedEdition,
        ),
        EditionRule::new(
            "special-deluxe",
            ["Special Edition", "Deluxe Edition"],
            EditionType::SpecialDeluxe,
        ),
        EditionRule::new(
            "reissue-repress",
            ["Reissue", "Repress"],
            EditionType::ReissueRepress,
        ),
    ]
}

impl Default for SizeRules {
    fn default() -> Self {
        Self {
            twelve_inch: default_twelve_inch(),
            seven_inch: default_seven_inch(),
        }
    }
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            color_rules: default_color_rules(),
            region_aliases: default_region_aliases(),
            size_rules: SizeRules::default(),
            edition_rules: default_edition_rules(),
        }
    }
}

/// The built-in tables as a commented rules file, written by `rules init`.
pub const DEFAULT_RULES_TOML: &str = r###"# Spindle Classification Rules
#
# Every table the classifiers consult. Sections left out of this file
# fall back to the built-in defaults.

# Color Rules
# A pressing matches a label when any substring occurs in its text
# (case-insensitive). Two or more matching labels classify as "Multicolor";
# no match classifies as "Black".

[[color_rules]]
label = "Blue"
match_any = ["blue", "aqua", "ocean"]

[[color_rules]]
label = "Purple"
match_any = ["purple", "violet"]

[[color_rules]]
label = "Green"
match_any = ["green", "emerald", "glow in the dark"]

[[color_rules]]
label = "Yellow"
match_any = ["yellow", "gold"]

[[color_rules]]
label = "Pink"
match_any = ["pink"]

[[color_rules]]
label = "Red"
match_any = ["red"]

[[color_rules]]
label = "Orange"
match_any = ["orange", "tangerine"]

[[color_rules]]
label = "White"
match_any = ["white", "cream"]

[[color_rules]]
label = "Brown"
match_any = ["brown", "chestnut"]

[[color_rules]]
label = "Clear"
match_any = ["clear"]

[[color_rules]]
label = "Picture Disc"
match_any = ["picture disc"]

[[color_rules]]
label = "Gray"
match_any = ["gray", "grey"]

[[color_rules]]
label = "Black"
match_any = ["black"]

# Region Aliases
# Applied to each trimmed region token.

[region_aliases]
US = "USA"

# Size Rules
# Exact descriptor tokens. 12" wins when both sizes are present.

[size_rules]
twelve_inch = ["LP", "12\""]
seven_inch = ["7\""]

# Edition Rules
# Evaluated top to bottom; the first rule with a matching token wins.
# Releases matching none are "Standard".

[[edition_rules]]
name = "record-store-day"
match_any = ["Record Store Day"]
output = "Record Store Day"

[[edition_rules]]
name = "limited-edition"
match_any = ["Limited Edition"]
output = "Limited Edition"

[[edition_rules]]
name = "special-deluxe"
match_any = ["Special Edition", "Deluxe Edition"]
output = "Special/Deluxe Edition"

[[edition_rules]]
name = "reissue-repress"
match_any = ["Reissue", "Repress"]
output = "Reissue/Repress"
"###;

// ---------------------------------------------------------------------------
// Implementation
// ---------------------------------------------------------------------------

impl ClassificationRules {
    /// Load classification rules from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let rules = Self::from_toml_str(&content).map_err(|e| {
            Error::InvalidData(format!(
                "failed to parse classification rules from {}: {}",
                path.display(),
                e
            ))
        })?;
        log::debug!(
            "Loaded {} color rules and {} edition rules from {}",
            rules.color_rules.len(),
            rules.edition_rules.len(),
            path.display()
        );
        Ok(rules)
    }

    /// Parse and validate rules from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rules: Self =
            toml::from_str(content).map_err(|e| Error::InvalidData(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Render the rules as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidData(e.to_string()))
    }

    /// Reject tables that would break the classifiers' output contract.
    ///
    /// `Multicolor` is derived from the match count, so no rule may emit it
    /// directly. Empty substrings would match every pressing.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.color_rules {
            if rule.label == ColorCategory::Multicolor {
                return Err(Error::InvalidData(
                    "color rule label \"Multicolor\" is reserved".to_string(),
                ));
            }
            if rule.match_any.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::InvalidData(format!(
                    "color rule \"{}\" has an empty substring",
                    rule.label
                )));
            }
        }

        for rule in &self.edition_rules {
            if rule.match_any.is_empty() {
                return Err(Error::InvalidData(format!(
                    "edition rule \"{}\" has no match tokens",
                    rule.name
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
