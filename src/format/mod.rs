//! Output formatting for price reports (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::sites::models::{AggregateMode, Quote, SiteReport};

/// Formats site reports for output.
pub struct Formatter {
    format: OutputFormat,
    mode: AggregateMode,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, mode: AggregateMode) -> Self {
        Self { format, mode }
    }

    /// Formats the full price list of each site.
    pub fn format_price_lists(&self, reports: &[SiteReport]) -> String {
        if reports.is_empty() {
            return self.empty_output();
        }

        match self.format {
            OutputFormat::Json => self.json_reports(reports),
            OutputFormat::Table => self.table_price_lists(reports),
            OutputFormat::Markdown => self.markdown_price_lists(reports),
            OutputFormat::Csv => self.csv_price_lists(reports),
        }
    }

    /// Formats the min/max/range summary of each site.
    pub fn format_summaries(&self, reports: &[SiteReport]) -> String {
        if reports.is_empty() {
            return self.empty_output();
        }

        match self.format {
            OutputFormat::Json => self.json_summaries(reports),
            OutputFormat::Table => self.table_summaries(reports),
            OutputFormat::Markdown => self.markdown_summaries(reports),
            OutputFormat::Csv => self.csv_summaries(reports),
        }
    }

    fn empty_output(&self) -> String {
        match self.format {
            OutputFormat::Json => "[]".to_string(),
            OutputFormat::Csv => "site,units".to_string(),
            _ => "No sites tracked.".to_string(),
        }
    }

    /// Renders one quote the way the active aggregation mode sees it.
    fn quote_cell(&self, quote: &Quote) -> String {
        match self.mode {
            AggregateMode::ZeroFill => format!("${:.2}", quote.amount()),
            AggregateMode::ListedOnly => match quote.listed() {
                Some(value) => format!("${:.2}", value),
                None => "n/a".to_string(),
            },
        }
    }

    fn dollars(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("${:.2}", v),
            None => "n/a".to_string(),
        }
    }

    // JSON formatting

    fn json_reports(&self, reports: &[SiteReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }

    fn json_summaries(&self, reports: &[SiteReport]) -> String {
        let summaries: Vec<serde_json::Value> = reports
            .iter()
            .map(|report| {
                serde_json::json!({
                    "site": report.site,
                    "units": report.count(),
                    "min": report.min(self.mode),
                    "max": report.max(self.mode),
                })
            })
            .collect();

        serde_json::to_string_pretty(&summaries).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_price_lists(&self, reports: &[SiteReport]) -> String {
        let site_width = 18;
        let units_width = 5;

        let mut lines = Vec::new();

        lines.push(format!("{:<site_width$}  {:<units_width$}  {}", "Site", "Units", "Prices"));
        lines.push(format!("{:-<site_width$}  {:-<units_width$}  {:-<30}", "", "", ""));

        for report in reports {
            let prices = if report.is_empty() {
                "no floorplans found".to_string()
            } else {
                report.quotes.iter().map(|q| self.quote_cell(q)).collect::<Vec<_>>().join(", ")
            };

            lines.push(format!(
                "{:<site_width$}  {:>units_width$}  {}",
                report.site,
                report.count(),
                prices
            ));
        }

        lines.join("\n")
    }

    fn table_summaries(&self, reports: &[SiteReport]) -> String {
        let site_width = 18;
        let price_width = 10;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<site_width$}  {:<price_width$}  {:<price_width$}  {}",
            "Site", "Min", "Max", "Range"
        ));
        lines.push(format!(
            "{:-<site_width$}  {:-<price_width$}  {:-<price_width$}  {:-<22}",
            "", "", "", ""
        ));

        for report in reports {
            let range = match report.range(self.mode) {
                Some((min, max)) => format!("${:.2} - ${:.2}", min, max),
                None => "no floorplans found".to_string(),
            };

            lines.push(format!(
                "{:<site_width$}  {:>price_width$}  {:>price_width$}  {}",
                report.site,
                Self::dollars(report.min(self.mode)),
                Self::dollars(report.max(self.mode)),
                range
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_price_lists(&self, reports: &[SiteReport]) -> String {
        let mut lines = Vec::new();

        lines.push("| Site | Units | Prices |".to_string());
        lines.push("|------|-------|--------|".to_string());

        for report in reports {
            let prices = if report.is_empty() {
                "no floorplans found".to_string()
            } else {
                report.quotes.iter().map(|q| self.quote_cell(q)).collect::<Vec<_>>().join(", ")
            };

            lines.push(format!("| {} | {} | {} |", report.site, report.count(), prices));
        }

        lines.join("\n")
    }

    fn markdown_summaries(&self, reports: &[SiteReport]) -> String {
        let mut lines = Vec::new();

        lines.push("| Site | Units | Min | Max |".to_string());
        lines.push("|------|-------|-----|-----|".to_string());

        for report in reports {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                report.site,
                report.count(),
                Self::dollars(report.min(self.mode)),
                Self::dollars(report.max(self.mode))
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_price_lists(&self, reports: &[SiteReport]) -> String {
        let mut lines = Vec::new();
        lines.push("site,unit,price".to_string());

        for report in reports {
            for (index, quote) in report.quotes.iter().enumerate() {
                let price = match self.mode {
                    AggregateMode::ZeroFill => quote.amount().to_string(),
                    AggregateMode::ListedOnly => {
                        quote.listed().map(|v| v.to_string()).unwrap_or_default()
                    }
                };
                lines.push(format!("{},{},{}", Self::csv_escape(&report.site), index, price));
            }
        }

        lines.join("\n")
    }

    fn csv_summaries(&self, reports: &[SiteReport]) -> String {
        let mut lines = Vec::new();
        lines.push("site,units,min,max".to_string());

        for report in reports {
            let min = report.min(self.mode).map(|v| v.to_string()).unwrap_or_default();
            let max = report.max(self.mode).map(|v| v.to_string()).unwrap_or_default();
            lines.push(format!(
                "{},{},{},{}",
                Self::csv_escape(&report.site),
                report.count(),
                min,
                max
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
