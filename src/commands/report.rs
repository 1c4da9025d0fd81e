//! Report command: min/max/range per site.

use crate::commands::{gather_reports, selection};
use crate::config::Config;
use crate::fetch::{PageSource, SiteFetcher};
use crate::format::Formatter;
use crate::sites::registry::Site;
use anyhow::{Context, Result};

/// Prints the minimum, maximum, and price range for the selected sites.
pub struct ReportCommand {
    config: Config,
}

impl ReportCommand {
    /// Creates a new report command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns formatted output.
    pub async fn execute(&self, site: Option<Site>) -> Result<String> {
        let fetcher = SiteFetcher::new(&self.config).context("Failed to create fetcher")?;

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
        Ok(formatter.format_summaries(&reports))
    }
}
