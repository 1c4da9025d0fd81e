//! CSS selectors for the supported property sites.
//!
//! This file contains all CSS selectors used for parsing listing pages.
//! Update this file when a property's markup changes.
//!
//! **Update process**: when extraction starts returning empty lists,
//! capture an HTML sample, update the selectors, and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the Aertson Midtown floorplan page.
///
/// Each floorplan is a `div.card`: its `h2.card-title` carries the plan
/// name, and a `p` inside `div.card-body` carries the price text.
pub mod aertson {
    use super::*;

    /// Floorplan title heading (text names the plan, e.g. "2 Bed 2 Bath").
    pub static CARD_TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h2.card-title").unwrap());

    /// Card body holding the price paragraph.
    pub static CARD_BODY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.card-body").unwrap());

    /// Price paragraph within the card body.
    pub static PRICE_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
}

/// Selectors for the Morris floorplan page.
///
/// Pricing is rendered client-side into `ul.card__stats` lists whose last
/// `li` reads "Starting at $X".
pub mod morris {
    use super::*;

    /// Stat list per floorplan card. Also the DOM-readiness marker for the
    /// scripted fetch.
    pub const STATS_CSS: &str = "ul.card__stats";

    pub static STATS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(STATS_CSS).unwrap());

    /// Stat entries; the price is the last one.
    pub static STAT_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
}

/// Selectors for the 2010 West End floorplan page.
///
/// Each floorplan is a chart of unit rows; the price sits in a `span`
/// inside the row's last `div`.
pub mod westend {
    use super::*;

    /// One row per rentable unit.
    pub static UNIT_ROW: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.additionally-content__row").unwrap());

    /// Cells within a row; the last one holds the price span.
    pub static ROW_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());

    /// Price text span.
    pub static PRICE_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
}
