//! Parsing of scraped marketplace price figures.
//!
//! The marketplace page lists up to three sold prices (lowest, median,
//! highest) as display strings such as `"$1,234.56"`. Fetching and reading
//! the page is not part of spindle; this module only turns the scraped
//! strings into [`Prices`].

use std::num::ParseFloatError;

use spindle_core::model::Prices;

/// Parse one display figure, ignoring currency signs and thousands separators.
pub fn parse_price(raw: &str) -> Result<f64, ParseFloatError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    cleaned.parse()
}

/// Map scraped figures positionally onto low/median/high.
///
/// An empty scrape (the release has never sold) yields all-null prices.
/// Figures beyond the third are ignored.
pub fn prices_from_scraped<S: AsRef<str>>(figures: &[S]) -> Result<Prices, ParseFloatError> {
    let mut parsed = figures
        .iter()
        .take(3)
        .map(|figure| parse_price(figure.as_ref()).map(Some))
        .collect::<Result<Vec<Option<f64>>, _>>()?
        .into_iter();

    Ok(Prices::new(
        parsed.next().flatten(),
        parsed.next().flatten(),
        parsed.next().flatten(),
    ))
}
