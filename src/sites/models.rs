//! Data models for extracted prices and per-site reports.

use serde::{Deserialize, Serialize};

/// One price slot per discovered floorplan/unit.
///
/// A unit whose price text could not be parsed still occupies a slot:
/// extraction output length always equals the number of unit substructures
/// found. `Unlisted` keeps "we could not read a price" distinguishable from
/// a genuine zero-dollar figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quote {
    Listed(f64),
    Unlisted,
}

impl Quote {
    /// Returns the dollar amount, coercing `Unlisted` to `0.0`.
    ///
    /// This reproduces the tracker's historical output, where an
    /// unparseable price and a free unit are indistinguishable.
    pub fn amount(&self) -> f64 {
        match self {
            Quote::Listed(value) => *value,
            Quote::Unlisted => 0.0,
        }
    }

    /// Returns the dollar amount only if a price was actually parsed.
    pub fn listed(&self) -> Option<f64> {
        match self {
            Quote::Listed(value) => Some(*value),
            Quote::Unlisted => None,
        }
    }

    /// Returns true if a price was parsed for this unit.
    pub fn is_listed(&self) -> bool {
        matches!(self, Quote::Listed(_))
    }
}

/// How unlisted quotes participate in min/max aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMode {
    /// Historical behavior: an unlisted quote counts as $0 and can win the
    /// minimum.
    #[default]
    ZeroFill,
    /// Unlisted quotes are excluded from aggregation.
    ListedOnly,
}

/// The extracted price list for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    /// Human-readable site name.
    pub site: String,
    /// One quote per discovered floorplan/unit, in page order.
    pub quotes: Vec<Quote>,
}

impl SiteReport {
    /// Creates a report for a named site.
    pub fn new(site: impl Into<String>, quotes: Vec<Quote>) -> Self {
        Self { site: site.into(), quotes }
    }

    /// Returns the number of discovered units.
    pub fn count(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if no units were discovered.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Returns the minimum price, or `None` if nothing aggregates.
    pub fn min(&self, mode: AggregateMode) -> Option<f64> {
        self.amounts(mode).reduce(f64::min)
    }

    /// Returns the maximum price, or `None` if nothing aggregates.
    pub fn max(&self, mode: AggregateMode) -> Option<f64> {
        self.amounts(mode).reduce(f64::max)
    }

    /// Returns the (min, max) price range, or `None` if nothing aggregates.
    pub fn range(&self, mode: AggregateMode) -> Option<(f64, f64)> {
        Some((self.min(mode)?, self.max(mode)?))
    }

    fn amounts(&self, mode: AggregateMode) -> impl Iterator<Item = f64> + '_ {
        self.quotes.iter().filter_map(move |quote| match mode {
            AggregateMode::ZeroFill => Some(quote.amount()),
            AggregateMode::ListedOnly => quote.listed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report() -> SiteReport {
        SiteReport::new(
            "Aertson Midtown",
            vec![Quote::Listed(950.0), Quote::Listed(1100.0), Quote::Unlisted],
        )
    }

    #[test]
    fn test_quote_amount_zero_fills() {
        assert_eq!(Quote::Listed(1500.0).amount(), 1500.0);
        assert_eq!(Quote::Unlisted.amount(), 0.0);
    }

    #[test]
    fn test_quote_listed() {
        assert_eq!(Quote::Listed(950.0).listed(), Some(950.0));
        assert_eq!(Quote::Unlisted.listed(), None);
        assert!(Quote::Listed(0.0).is_listed());
        assert!(!Quote::Unlisted.is_listed());
    }

    #[test]
    fn test_zero_fill_min_is_polluted_by_unlisted() {
        // The historical defect, kept regression-detectable: an unlisted
        // unit aggregates as $0 and wins the minimum.
        let report = make_report();
        assert_eq!(report.min(AggregateMode::ZeroFill), Some(0.0));
        assert_eq!(report.max(AggregateMode::ZeroFill), Some(1100.0));
        assert_eq!(report.range(AggregateMode::ZeroFill), Some((0.0, 1100.0)));
    }

    #[test]
    fn test_listed_only_excludes_unlisted() {
        let report = make_report();
        assert_eq!(report.min(AggregateMode::ListedOnly), Some(950.0));
        assert_eq!(report.max(AggregateMode::ListedOnly), Some(1100.0));
        assert_eq!(report.range(AggregateMode::ListedOnly), Some((950.0, 1100.0)));
    }

    #[test]
    fn test_empty_report_aggregates_to_none() {
        let report = SiteReport::new("Morris", Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.min(AggregateMode::ZeroFill), None);
        assert_eq!(report.max(AggregateMode::ZeroFill), None);
        assert_eq!(report.range(AggregateMode::ZeroFill), None);
    }

    #[test]
    fn test_all_unlisted_listed_only_is_none() {
        let report = SiteReport::new("Morris", vec![Quote::Unlisted, Quote::Unlisted]);
        assert_eq!(report.min(AggregateMode::ListedOnly), None);
        assert_eq!(report.min(AggregateMode::ZeroFill), Some(0.0));
    }

    #[test]
    fn test_count() {
        assert_eq!(make_report().count(), 3);
    }

    #[test]
    fn test_quote_serde_untagged() {
        let json = serde_json::to_string(&vec![Quote::Listed(1500.0), Quote::Unlisted]).unwrap();
        assert_eq!(json, "[1500.0,null]");

        let parsed: Vec<Quote> = serde_json::from_str("[950.0,null]").unwrap();
        assert_eq!(parsed, vec![Quote::Listed(950.0), Quote::Unlisted]);
    }

    #[test]
    fn test_report_serde() {
        let report = make_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("Aertson Midtown"));

        let parsed: SiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
