//! Currency-text-to-number parsing for free-form price strings.
//!
//! Listing pages wrap prices in arbitrary prose ("Starting at $1,995",
//! "$1,500 / mo"). Two parsing strategies cover the supported sites: a
//! leading-dollar match for prose, and a strip-and-parse for bare figures.

use crate::sites::models::Quote;
use regex_lite::Regex;
use std::sync::LazyLock;

/// Matches a `$` followed by the non-whitespace run holding the figure.
static DOLLAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\S+)").unwrap());

/// Parses price text of the form `...$1,234.00...`.
///
/// The figure is whatever non-whitespace follows the first `$`, with
/// thousands-separator commas stripped. No `$`, or a figure that does not
/// parse as a number, yields [`Quote::Unlisted`].
pub fn dollar_amount(text: &str) -> Quote {
    let Some(caps) = DOLLAR.captures(text) else {
        return Quote::Unlisted;
    };

    match caps[1].replace(',', "").parse() {
        Ok(value) => Quote::Listed(value),
        Err(_) => Quote::Unlisted,
    }
}

/// Parses price text that is a bare figure with optional `$`/`,` noise,
/// e.g. `"$1,899"` or `"2049"`.
pub fn bare_amount(text: &str) -> Quote {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();

    match cleaned.trim().parse() {
        Ok(value) => Quote::Listed(value),
        Err(_) => Quote::Unlisted,
    }
}
