use std::ops::Range;
use std::sync::LazyLock;

use ::scraper::Selector;
use regex::Regex;

use crate::error::Result;
use crate::scraper::{Html, PageLayout};

/// Category tag selecting team (rather than individual) tournaments.
const TOURNAMENT_TYPE: &str = "type=team";

/// Query appended to every result-page link so the whole field is listed in
/// finishing order on a single page.
pub const RESULT_QUERY_SUFFIX: &str =
    "&action=displayThisMany&page=recalculate&sortField=place&junior=no";

static RESULT_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^results\.cfm\?tournament_id=\d+&type=team&yearSelected=\d+$")
        .expect("result href pattern is valid")
});

/// One listing URL per year, `years.start` inclusive to `years.end` exclusive.
pub fn annual_listing_urls(base_url: &str, years: Range<u16>) -> Vec<String> {
    years
        .map(|year| format!("{base_url}/resultsIntro.cfm?{TOURNAMENT_TYPE}&yearSelected={year}"))
        .collect()
}

/// The yearly listing page that links to each tournament's results.
#[derive(Debug, Clone)]
pub struct YearListing {
    base_url: String,
}

impl YearListing {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl PageLayout for YearListing {
    type Output = Vec<String>;

    fn parse(&self, document: &Html) -> Result<Vec<String>> {
        let anchor_selector = Selector::parse("a[href]")?;
        let links = document
            .select(&anchor_selector)
            .filter_map(|a| a.value().attr("href"))
            .map(|href| href.trim().replace("&amp;", "&"))
            .filter(|href| RESULT_HREF.is_match(href))
            .map(|href| format!("{}/{href}{RESULT_QUERY_SUFFIX}", self.base_url))
            .collect();
        Ok(links)
    }
}
