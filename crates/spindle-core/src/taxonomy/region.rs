use std::collections::BTreeMap;

use crate::taxonomy::rules::ClassificationRules;

const DELIMITERS: &[char] = &[',', '&'];

/// Splits a raw country string into region tokens.
///
/// Tokens keep the order they appear in (the catalog lists the primary
/// country first), are trimmed, and are passed through the alias table.
/// Empty input yields a single empty token; nothing is dropped.
#[derive(Debug, Clone)]
pub struct RegionParser {
    aliases: BTreeMap<String, String>,
}

impl RegionParser {
    #[must_use]
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    pub fn parse(&self, country: &str) -> Vec<String> {
        let tokens: Vec<&str> = if country.contains(DELIMITERS) {
            country.split(DELIMITERS).collect()
        } else {
            vec![country]
        };

        tokens
            .into_iter()
            .map(str::trim)
            .map(|token| self.resolve(token))
            .collect()
    }

    fn resolve(&self, token: &str) -> String {
        self.aliases
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}

impl Default for RegionParser {
    fn default() -> Self {
        Self::new(ClassificationRules::default().region_aliases)
    }
}
