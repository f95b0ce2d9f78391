//! Closed category enumerations emitted by the classifiers.
//!
//! Each enum serializes as its human-readable label ("Picture Disc",
//! `12"`, "Special/Deluxe Edition"), which is also what rule files use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical pressing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorCategory {
    Blue,
    Purple,
    Green,
    Yellow,
    Pink,
    Red,
    Orange,
    White,
    Brown,
    Clear,
    #[serde(rename = "Picture Disc")]
    PictureDisc,
    Gray,
    Black,
    /// Two or more distinct canonical colors matched.
    Multicolor,
}

impl ColorCategory {
    /// The 13 single-color labels a rule may map to.
    pub const CANONICAL: [Self; 13] = [
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Yellow,
        Self::Pink,
        Self::Red,
        Self::Orange,
        Self::White,
        Self::Brown,
        Self::Clear,
        Self::PictureDisc,
        Self::Gray,
        Self::Black,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Pink => "Pink",
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::White => "White",
            Self::Brown => "Brown",
            Self::Clear => "Clear",
            Self::PictureDisc => "Picture Disc",
            Self::Gray => "Gray",
            Self::Black => "Black",
            Self::Multicolor => "Multicolor",
        }
    }
}

/// Canonical physical size of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "12\"")]
    TwelveInch,
    #[serde(rename = "7\"")]
    SevenInch,
    #[serde(rename = "Other Size")]
    Other,
}

impl SizeCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwelveInch => "12\"",
            Self::SevenInch => "7\"",
            Self::Other => "Other Size",
        }
    }
}

/// Edition type of a release, listed from rarest to most common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditionType {
    #[serde(rename = "Record Store Day")]
    RecordStoreDay,
    #[serde(rename = "Limited Edition")]
    LimitedEdition,
    #[serde(rename = "Special/Deluxe Edition")]
    SpecialDeluxe,
    #[serde(rename = "Reissue/Repress")]
    ReissueRepress,
    Standard,
}

impl EditionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RecordStoreDay => "Record Store Day",
            Self::LimitedEdition => "Limited Edition",
            Self::SpecialDeluxe => "Special/Deluxe Edition",
            Self::ReissueRepress => "Reissue/Repress",
            Self::Standard => "Standard",
        }
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serialized_label() {
        for color in ColorCategory::CANONICAL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{color}\""));
        }
        assert_eq!(
            serde_json::to_string(&SizeCategory::TwelveInch).unwrap(),
            r#""12\"""#
        );
        assert_eq!(
            serde_json::to_string(&EditionType::SpecialDeluxe).unwrap(),
            r#""Special/Deluxe Edition""#
        );
    }

    #[test]
    fn test_multicolor_is_not_canonical() {
        assert!(!ColorCategory::CANONICAL.contains(&ColorCategory::Multicolor));
        assert_eq!(ColorCategory::Multicolor.to_string(), "Multicolor");
    }

    #[test]
    fn test_unknown_label_rejected() {
        let result: Result<ColorCategory, _> = serde_json::from_str(r#""Teal""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(SizeCategory::SevenInch.to_string(), "7\"");
        assert_eq!(SizeCategory::Other.to_string(), "Other Size");
    }
}
