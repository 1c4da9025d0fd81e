//! Per-site price extraction from listing-page HTML.
//!
//! Each site gets its own hand-written structural traversal, kept behind a
//! common trait so the markup quirks of one property stay testable in
//! isolation. Dispatch is a lookup table built once at startup.

use crate::sites::models::Quote;
use crate::sites::registry::Site;
use crate::sites::{money, selectors};
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Price extraction for one site's markup.
///
/// Implementations are pure functions of the page content: no state, no
/// side effects, identical output for identical input. The returned list
/// has one quote per unit substructure found, parse failures included as
/// [`Quote::Unlisted`].
pub trait Extract: Send + Sync {
    /// The site this extractor understands.
    fn site(&self) -> Site;

    /// Extracts one quote per floorplan/unit from the rendered page.
    fn extract(&self, html: &str) -> Vec<Quote>;
}

/// Aertson Midtown: one `div.card` per floorplan.
///
/// The `h2.card-title` text names the plan; only two-bedroom plans (title
/// starting with "2") are tracked. The card element is two levels above
/// the title, and the price paragraph is the first `p` in `div.card-body`.
pub struct AertsonExtractor;

impl Extract for AertsonExtractor {
    fn site(&self) -> Site {
        Site::Aertson
    }

    fn extract(&self, html: &str) -> Vec<Quote> {
        let document = Html::parse_document(html);
        let mut quotes = Vec::new();

        for title in document.select(&selectors::aertson::CARD_TITLE) {
            let text = title.text().collect::<String>();
            if !text.trim_start().starts_with('2') {
                continue; // two-bedroom floorplans only
            }

            let price_text = title
                .parent()
                .and_then(ElementRef::wrap)
                .and_then(|el| el.parent())
                .and_then(ElementRef::wrap)
                .and_then(|card| card.select(&selectors::aertson::CARD_BODY).next())
                .and_then(|body| body.select(&selectors::aertson::PRICE_TEXT).next())
                .map(|p| p.text().collect::<String>());

            let quote = match price_text {
                Some(text) => money::dollar_amount(&text),
                None => {
                    warn!("floorplan card '{}' has no price paragraph", text.trim());
                    Quote::Unlisted
                }
            };
            quotes.push(quote);
        }

        debug!("{}: extracted {} quotes", self.site(), quotes.len());
        quotes
    }
}

/// Morris: one `ul.card__stats` per floorplan card.
///
/// The last `li` of each stat list reads "Starting at $X". The list only
/// exists after client-side rendering, so this site uses the scripted
/// fetch.
pub struct MorrisExtractor;

impl Extract for MorrisExtractor {
    fn site(&self) -> Site {
        Site::Morris
    }

    fn extract(&self, html: &str) -> Vec<Quote> {
        let document = Html::parse_document(html);
        let mut quotes = Vec::new();

        for stats in document.select(&selectors::morris::STATS) {
            let quote = stats
                .select(&selectors::morris::STAT_ITEM)
                .last()
                .map(|li| money::dollar_amount(&li.text().collect::<String>()))
                .unwrap_or(Quote::Unlisted);
            quotes.push(quote);
        }

        debug!("{}: extracted {} quotes", self.site(), quotes.len());
        quotes
    }
}

/// 2010 West End: one `div.additionally-content__row` per rentable unit.
///
/// The price sits in a `span` inside the row's last `div` cell, as a bare
/// figure rather than prose.
pub struct WestEndExtractor;

impl Extract for WestEndExtractor {
    fn site(&self) -> Site {
        Site::WestEnd
    }

    fn extract(&self, html: &str) -> Vec<Quote> {
        let document = Html::parse_document(html);
        let mut quotes = Vec::new();

        for row in document.select(&selectors::westend::UNIT_ROW) {
            let quote = row
                .select(&selectors::westend::ROW_CELL)
                .last()
                .and_then(|cell| cell.select(&selectors::westend::PRICE_TEXT).next())
                .map(|span| money::bare_amount(&span.text().collect::<String>()))
                .unwrap_or(Quote::Unlisted);
            quotes.push(quote);
        }

        debug!("{}: extracted {} quotes", self.site(), quotes.len());
        quotes
    }
}

/// Extraction dispatch table, built once at configuration time.
pub struct Extractors {
    table: HashMap<Site, Box<dyn Extract>>,
}

impl Extractors {
    /// Builds the table with every supported site registered.
    pub fn standard() -> Self {
        let extractors: Vec<Box<dyn Extract>> =
            vec![Box::new(AertsonExtractor), Box::new(MorrisExtractor), Box::new(WestEndExtractor)];

        let mut table = HashMap::new();
        for extractor in extractors {
            table.insert(extractor.site(), extractor);
        }
        Self { table }
    }

    /// Returns the extractor registered for a site.
    pub fn get(&self, site: Site) -> Option<&dyn Extract> {
        self.table.get(&site).map(|boxed| boxed.as_ref())
    }

    /// Extracts quotes for a registered site.
    pub fn extract_site(&self, site: Site, html: &str) -> Vec<Quote> {
        match self.get(site) {
            Some(extractor) => extractor.extract(html),
            None => {
                warn!("no extractor registered for '{}'", site);
                Vec::new()
            }
        }
    }

    /// Extracts quotes for a site given by name.
    ///
    /// Unsupported names are a diagnostic and an empty list, never an
    /// error.
    pub fn extract(&self, name: &str, html: &str) -> Vec<Quote> {
        match Site::lookup(name) {
            Some(site) => self.extract_site(site, html),
            None => {
                warn!("price tracking for '{}' is not supported", name);
                Vec::new()
            }
        }
    }
}

impl Default for Extractors {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aertson_card(title: &str, price: &str) -> String {
        format!(
            r#"<div class="card">
                <div><h2 class="card-title">{}</h2></div>
                <div class="card-body"><div><p>{}</p></div></div>
            </div>"#,
            title, price
        )
    }

    fn aertson_page(cards: &[(&str, &str)]) -> String {
        let mut html = String::from("<html><body>");
        for (title, price) in cards {
            html.push_str(&aertson_card(title, price));
        }
        html.push_str("</body></html>");
        html
    }

    fn morris_page(prices: &[&str]) -> String {
        let mut html = String::from("<html><body>");
        for price in prices {
            html.push_str(&format!(
                r#"<ul class="card__stats">
                    <li>2 Bed</li><li>2 Bath</li><li>1,050 sq ft</li>
                    <li>Starting at {}</li>
                </ul>"#,
                price
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn westend_page(prices: &[&str]) -> String {
        let mut html = String::from(r#"<html><body><div class="additionally-content__rows">"#);
        for price in prices {
            html.push_str(&format!(
                r#"<div class="additionally-content__row">
                    <div>Unit 204</div>
                    <div>1,108 sq ft</div>
                    <div><span>{}</span></div>
                </div>"#,
                price
            ));
        }
        html.push_str("</div></body></html>");
        html
    }

    // Aertson Midtown

    #[test]
    fn test_aertson_extracts_two_bed_cards() {
        let html = aertson_page(&[("2 Bed 2 Bath", "$1,500 / mo"), ("2 Bed 1 Bath", "$1,650")]);
        let quotes = AertsonExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(1500.0), Quote::Listed(1650.0)]);
    }

    #[test]
    fn test_aertson_skips_other_bedroom_counts() {
        let html = aertson_page(&[
            ("1 Bed 1 Bath", "$1,200"),
            ("2 Bed 2 Bath", "$1,500"),
            ("Studio", "$999"),
        ]);
        let quotes = AertsonExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(1500.0)]);
    }

    #[test]
    fn test_aertson_title_with_leading_whitespace() {
        let html = aertson_page(&[("  2 Bed 2 Bath", "$1,725")]);
        let quotes = AertsonExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(1725.0)]);
    }

    #[test]
    fn test_aertson_unparseable_price_keeps_slot() {
        let html =
            aertson_page(&[("2 Bed 2 Bath", "$1,500 / mo"), ("2 Bed Den", "no price available")]);
        let quotes = AertsonExtractor.extract(&html);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1], Quote::Unlisted);
    }

    #[test]
    fn test_aertson_card_without_body_keeps_slot() {
        let html = r#"<html><body><div class="card">
            <div><h2 class="card-title">2 Bed 2 Bath</h2></div>
        </div></body></html>"#;
        let quotes = AertsonExtractor.extract(html);
        assert_eq!(quotes, vec![Quote::Unlisted]);
    }

    #[test]
    fn test_aertson_empty_page() {
        assert!(AertsonExtractor.extract("<html><body></body></html>").is_empty());
    }

    // Morris

    #[test]
    fn test_morris_reads_last_stat_item() {
        let html = morris_page(&["$1,995", "$2,250"]);
        let quotes = MorrisExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(1995.0), Quote::Listed(2250.0)]);
    }

    #[test]
    fn test_morris_unparseable_price_keeps_slot() {
        let html = morris_page(&["$2,050", "Call for pricing"]);
        let quotes = MorrisExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(2050.0), Quote::Unlisted]);
    }

    #[test]
    fn test_morris_empty_stat_list_keeps_slot() {
        let html = r#"<html><body><ul class="card__stats"></ul></body></html>"#;
        let quotes = MorrisExtractor.extract(html);
        assert_eq!(quotes, vec![Quote::Unlisted]);
    }

    // 2010 West End

    #[test]
    fn test_westend_reads_span_in_last_cell() {
        let html = westend_page(&["$1,899", "$2,049", "$2,315"]);
        let quotes = WestEndExtractor.extract(&html);
        assert_eq!(
            quotes,
            vec![Quote::Listed(1899.0), Quote::Listed(2049.0), Quote::Listed(2315.0)]
        );
    }

    #[test]
    fn test_westend_unparseable_price_keeps_slot() {
        let html = westend_page(&["$1,899", "Waitlist"]);
        let quotes = WestEndExtractor.extract(&html);
        assert_eq!(quotes, vec![Quote::Listed(1899.0), Quote::Unlisted]);
    }

    #[test]
    fn test_westend_row_without_span_keeps_slot() {
        let html = r#"<html><body>
            <div class="additionally-content__row"><div>Unit 204</div><div></div></div>
        </body></html>"#;
        let quotes = WestEndExtractor.extract(html);
        assert_eq!(quotes, vec![Quote::Unlisted]);
    }

    // Dispatch table

    #[test]
    fn test_standard_table_covers_registry() {
        let extractors = Extractors::standard();
        for site in Site::all() {
            assert!(extractors.get(*site).is_some(), "missing extractor for {}", site);
        }
    }

    #[test]
    fn test_extract_by_name() {
        let extractors = Extractors::standard();
        let html = morris_page(&["$1,995"]);
        let quotes = extractors.extract("Morris", &html);
        assert_eq!(quotes, vec![Quote::Listed(1995.0)]);
    }

    #[test]
    fn test_extract_unsupported_name_is_empty_not_error() {
        let extractors = Extractors::standard();
        let quotes = extractors.extract("The Gulch", "<html><body></body></html>");
        assert!(quotes.is_empty());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let extractors = Extractors::standard();
        let html = aertson_page(&[("2 Bed 2 Bath", "$1,500 / mo"), ("2 Bed Den", "tbd")]);
        let first = extractors.extract_site(Site::Aertson, &html);
        let second = extractors.extract_site(Site::Aertson, &html);
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_to_end_aertson_scenario() {
        // Three cards: prose price, bare price, and no price at all.
        let html = aertson_page(&[
            ("2 Bed 2 Bath", "$1,500 / mo"),
            ("2 Bed 1 Bath", "$1,650"),
            ("2 Bed Den", "no price available"),
        ]);
        let quotes = Extractors::standard().extract("Aertson Midtown", &html);
        let amounts: Vec<f64> = quotes.iter().map(Quote::amount).collect();
        assert_eq!(amounts, vec![1500.0, 1650.0, 0.0]);
    }
}
