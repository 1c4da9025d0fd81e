//! Prices command: the full price list per site.

use crate::commands::{gather_reports, selection};
use crate::config::Config;
use crate::fetch::{PageSource, SiteFetcher};
use crate::format::Formatter;
use crate::sites::registry::Site;
use anyhow::{Context, Result};

/// Prints every extracted floorplan price for the selected sites.
pub struct PricesCommand {
    config: Config,
}

impl PricesCommand {
    /// Creates a new prices command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self, site: Option<Site>) -> Result<String> {
        let fetcher = SiteFetcher::new(&self.config).context("Failed to create fetcher")?;

        // Shutdown runs on the error path too; the browser session must be
        // released exactly once.
        let result = self.execute_with_source(&fetcher, site).await;
        fetcher.shutdown().await;
        result
    }

    /// Executes the command with a provided page source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl PageSource,
        site: Option<Site>,
    ) -> Result<String> {
        let sites = selection(site);
        let reports = gather_reports(source, &sites).await?;

        let formatter = Formatter::new(self.config.format, self.config.aggregate_mode());
        Ok(formatter.format_price_lists(&reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;
    use crate::config::OutputFormat;

    fn make_test_config() -> Config {
        Config { delay_ms: 0, delay_jitter_ms: 0, ..Config::default() }
    }

    #[tokio::test]
    async fn test_prices_single_site() {
        let source = MockPageSource::new()
            .with_page(Site::Aertson, aertson_html(&["$1,500 / mo", "$1,650"]));

        let cmd = PricesCommand::new(make_test_config());
        let output = cmd.execute_with_source(&source, Some(Site::Aertson)).await.unwrap();

        assert!(output.contains("Aertson Midtown"));
        assert!(output.contains("$1500.00"));
        assert!(output.contains("$1650.00"));
    }

    #[tokio::test]
    async fn test_prices_zero_fills_unparseable() {
        let source = MockPageSource::new()
            .with_page(Site::Aertson, aertson_html(&["$1,500 / mo", "no price available"]));

        let cmd = PricesCommand::new(make_test_config());
        let output = cmd.execute_with_source(&source, Some(Site::Aertson)).await.unwrap();

        assert!(output.contains("$1500.00"));
        assert!(output.contains("$0.00"));
    }

    #[tokio::test]
    async fn test_prices_exclude_unlisted() {
        let source = MockPageSource::new()
            .with_page(Site::Aertson, aertson_html(&["$1,500 / mo", "no price available"]));

        let mut config = make_test_config();
        config.exclude_unlisted = true;

        let cmd = PricesCommand::new(config);
        let output = cmd.execute_with_source(&source, Some(Site::Aertson)).await.unwrap();

        assert!(output.contains("$1500.00"));
        assert!(output.contains("n/a"));
        assert!(!output.contains("$0.00"));
    }

    #[tokio::test]
    async fn test_prices_all_sites() {
        let source = MockPageSource::new()
            .with_page(Site::Aertson, aertson_html(&["$1,500"]))
            .with_page(Site::Morris, morris_html(&["$1,995"]))
            .with_page(Site::WestEnd, westend_html(&["$1,899"]));

        let cmd = PricesCommand::new(make_test_config());
        let output = cmd.execute_with_source(&source, None).await.unwrap();

        assert!(output.contains("Aertson Midtown"));
        assert!(output.contains("Morris"));
        assert!(output.contains("2010 West End"));
    }

    #[tokio::test]
    async fn test_prices_json_format() {
        let source = MockPageSource::new().with_page(Site::Morris, morris_html(&["$1,995"]));

        let mut config = make_test_config();
        config.format = OutputFormat::Json;

        let cmd = PricesCommand::new(config);
        let output = cmd.execute_with_source(&source, Some(Site::Morris)).await.unwrap();

        assert!(output.starts_with('['));
        assert!(output.contains("1995.0"));
    }

    #[tokio::test]
    async fn test_prices_fetch_failure_single_site() {
        let source = MockPageSource::new();

        let cmd = PricesCommand::new(make_test_config());
        let result = cmd.execute_with_source(&source, Some(Site::WestEnd)).await;

        assert!(result.is_err());
    }
}
