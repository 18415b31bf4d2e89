use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::config::ScrapeConfig;
use crate::error::{BassError, Result};
use crate::model::{LinkSet, TournamentPage};
use crate::scraper::{self, annual_listing_urls, PageLayout, TeamResults, YearListing};
use crate::staging;

/// The main entry point for talking to basschamps.com.
///
/// `BassChampsClient` wraps a [`reqwest::Client`] configured with a fixed
/// per-request timeout. Every fetch is awaited one at a time.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> basschamps_scraper::Result<()> {
/// use basschamps_scraper::{BassChampsClient, LinkSet, ScrapeConfig};
///
/// let client = BassChampsClient::new(&ScrapeConfig::default())?;
/// let links = client.discover_links(2019..2020, LinkSet::new()).await;
/// for url in &links {
///     if let Some(page) = client.try_get_tournament(url).await {
///         println!("{:?}: {} teams", page.metadata.tournament, page.results.len());
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct BassChampsClient {
    http: reqwest::Client,
    base_url: String,
}

impl BassChampsClient {
    /// Create a client from scrape settings.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(BassError::Client)?;
        Ok(Self::with_client(http, &config.base_url))
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http: client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `url` and parse it with the given page layout.
    #[instrument(skip(self, layout))]
    pub async fn fetch_page<L: PageLayout>(&self, url: &str, layout: &L) -> Result<L::Output> {
        let document = scraper::get_document(&self.http, url).await?;
        layout.parse(&document)
    }

    /// Walk the yearly listings and merge every tournament link found into
    /// `links`.
    ///
    /// A listing that cannot be fetched is logged and skipped.
    #[instrument(skip(self, links), fields(known = links.len()))]
    pub async fn discover_links(&self, years: Range<u16>, mut links: LinkSet) -> LinkSet {
        let layout = YearListing::new(&self.base_url);
        for url in annual_listing_urls(&self.base_url, years) {
            let found = match self.fetch_page(&url, &layout).await {
                Ok(found) => found,
                Err(e) => {
                    error!(url, error = %e, "failed to fetch tournament listing");
                    continue;
                }
            };
            debug!(url, count = found.len(), "parsed tournament listing");
            for link in found {
                if links.contains(&link) {
                    debug!(link, "link exists, skipping");
                } else {
                    links.insert(link);
                }
            }
        }
        info!(total = links.len(), "link discovery finished");
        links
    }

    /// Fetch and parse a single team result page.
    pub async fn get_tournament(&self, url: &str) -> Result<TournamentPage> {
        self.fetch_page(url, &TeamResults).await
    }

    /// Like [`get_tournament`](Self::get_tournament), but logs failures and
    /// yields nothing so a batch can carry on.
    pub async fn try_get_tournament(&self, url: &str) -> Option<TournamentPage> {
        match self.get_tournament(url).await {
            Ok(page) => Some(page),
            Err(e) => {
                error!(url, error = %e, "error parsing tournament page");
                None
            }
        }
    }

    /// Fetch every linked result page and write it to `data_dir` as a
    /// staging file.
    ///
    /// Pages that cannot be fetched or written are logged and counted as
    /// failed.
    #[instrument(skip(self, links), fields(links = links.len()))]
    pub async fn stage_tournaments(&self, links: &LinkSet, data_dir: &Path) -> ScrapeSummary {
        let mut summary = ScrapeSummary::default();
        for url in links {
            let staged = match self.try_get_tournament(url).await {
                Some(page) => stage_page(data_dir, url, &page),
                None => false,
            };
            if staged {
                summary.written += 1;
            } else {
                summary.failed += 1;
            }
        }
        info!(written = summary.written, failed = summary.failed, "scrape finished");
        summary
    }
}

/// Write one fetched page, returning whether a staging file was written.
fn stage_page(data_dir: &Path, url: &str, page: &TournamentPage) -> bool {
    match staging::write_page(data_dir, page) {
        Ok(path) => {
            debug!(path = %path.display(), teams = page.results.len(), "wrote results");
            true
        }
        Err(e @ BassError::MissingMetadata { .. }) => {
            warn!(url, error = %e, "skipping page without tournament name or date");
            false
        }
        Err(e) => {
            error!(url, error = %e, "failed to write staging file");
            false
        }
    }
}

/// Outcome of a scrape run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub written: usize,
    pub failed: usize,
}
