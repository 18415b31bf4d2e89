pub(crate) mod links;
pub mod prize;
pub(crate) mod results;

pub(crate) use ::scraper::Html;
use ::scraper::ElementRef;
use tracing::debug;

use crate::error::{BassError, Result};

pub use links::{annual_listing_urls, YearListing, RESULT_QUERY_SUFFIX};
pub use results::TeamResults;

/// One page shape on the results site.
///
/// Each implementation knows the markup of a single kind of page. When the
/// site changes a layout, add a new implementation rather than branching
/// inside an existing one.
pub trait PageLayout {
    type Output;

    fn parse(&self, document: &Html) -> Result<Self::Output>;
}

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| BassError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BassError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| BassError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Every text node of `element` trimmed, empties dropped, joined without
/// separators.
pub(crate) fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect()
}

/// [`stripped_text`] with non-breaking spaces removed, for numeric cells.
pub(crate) fn cell_text(element: &ElementRef) -> String {
    stripped_text(element).replace('\u{a0}', "")
}

/// Uppercase each letter that follows a non-letter and lowercase the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
