//! Command implementations for the CLI.

pub mod prices;
pub mod report;

pub use prices::PricesCommand;
pub use report::ReportCommand;

use crate::fetch::PageSource;
use crate::sites::extract::Extractors;
use crate::sites::models::SiteReport;
use crate::sites::registry::Site;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Resolves the site selection for a command run: one requested site, or
/// the whole registry.
fn selection(site: Option<Site>) -> Vec<Site> {
    site.map(|s| vec![s]).unwrap_or_else(|| Site::all().to_vec())
}

/// Fetches and extracts each selected site in registry order.
///
/// A fetch failure in a multi-site run is reported and skipped so the
/// remaining sites still produce output; a single-site run propagates it.
async fn gather_reports(source: &impl PageSource, sites: &[Site]) -> Result<Vec<SiteReport>> {
    let extractors = Extractors::standard();
    let single = sites.len() == 1;
    let mut reports = Vec::new();

    for site in sites {
        info!("Fetching {}", site);

        match source.page(*site).await {
            Ok(html) => {
                let quotes = extractors.extract_site(*site, &html);
                if quotes.is_empty() {
                    warn!("{}: no floorplans found", site);
                }
                reports.push(SiteReport::new(site.name(), quotes));
            }
            Err(e) if single => {
                return Err(e).with_context(|| format!("Failed to fetch {}", site));
            }
            Err(e) => {
                eprintln!("{}: fetch failed: {:#}", site, e);
            }
        }
    }

    Ok(reports)
}
