pub use crate::client::{BassChampsClient, ScrapeSummary};
pub use crate::config::{AppConfig, ScrapeConfig, StorageConfig};
pub use crate::error::{BassError, Result};
pub use crate::loader::{load_dir, load_page, LoadOutcome, LoadSummary};
pub use crate::model::*;
pub use crate::scraper::prize::normalize_prize;
pub use crate::scraper::{PageLayout, TeamResults, YearListing};
pub use crate::store::{Database, NewTournament};

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod scraper;
pub mod staging;
pub mod store;
