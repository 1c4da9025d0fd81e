//! The site registry: supported properties, their listing URLs, and how
//! each page has to be fetched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::sites::selectors;

/// Supported property sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Aertson,
    Morris,
    WestEnd,
}

/// How a site's listing page is retrieved.
///
/// Chosen per site by configuration, not detected at runtime: a site either
/// serves its pricing in the initial response or fills it in client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Plain HTTP GET; the response body already contains the pricing.
    Static,
    /// Drive a headless browser and wait (bounded) until `wait_for`
    /// matches in the rendered DOM before reading the page.
    Scripted { wait_for: &'static str },
}

impl Site {
    /// Returns the human-readable property name.
    pub fn name(&self) -> &'static str {
        match self {
            Site::Aertson => "Aertson Midtown",
            Site::Morris => "Morris",
            Site::WestEnd => "2010 West End",
        }
    }

    /// Returns the floorplan listing URL for this site.
    pub fn url(&self) -> &'static str {
        match self {
            Site::Aertson => "https://www.aertsonmidtown.com/floorplans",
            Site::Morris => "https://livemorris.com/floor-plans/#/plan?bedrooms=31",
            Site::WestEnd => "https://2010westend.com/floorplans/bed-2/so-rent/sd-desc",
        }
    }

    /// Returns how this site's page must be fetched.
    pub fn fetch_strategy(&self) -> FetchStrategy {
        match self {
            Site::Aertson | Site::WestEnd => FetchStrategy::Static,
            // Morris renders its floorplan cards after page load.
            Site::Morris => FetchStrategy::Scripted { wait_for: selectors::morris::STATS_CSS },
        }
    }

    /// Returns all supported sites, in registry order.
    pub fn all() -> &'static [Site] {
        &[Site::Aertson, Site::Morris, Site::WestEnd]
    }

    /// Looks a site up by name, accepting the display name or the slug.
    pub fn lookup(name: &str) -> Option<Site> {
        name.parse().ok()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aertson" | "aertson midtown" => Ok(Site::Aertson),
            "morris" => Ok(Site::Morris),
            "westend" | "west end" | "2010 west end" | "2010-west-end" => Ok(Site::WestEnd),
            _ => Err(format!(
                "Unknown site: '{}'. Supported: {}",
                s,
                Site::all().iter().map(|site| site.name()).collect::<Vec<_>>().join(", ")
            )),
        }
    }
}
