use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BassError, Result};
use crate::scraper::prize::normalize_prize;

/// Date format used on result pages, e.g. "October 12, 2019".
pub const TOURNAMENT_DATE_FORMAT: &str = "%B %d, %Y";

/// One scraped tournament: header metadata plus the ranked team results.
///
/// This is also the on-disk shape of a staging file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentPage {
    #[serde(default)]
    pub metadata: TournamentMetadata,
    #[serde(default)]
    pub results: Vec<ResultRow>,
}

/// Label/value pairs from the header table of a result page, kept as raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentMetadata {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Region", default)]
    pub region: Option<String>,
    #[serde(rename = "Tournament", default)]
    pub tournament: Option<String>,
    #[serde(rename = "Tournament Trail", default)]
    pub trail: Option<String>,
}

impl TournamentMetadata {
    /// Parse the raw `Date` value into a calendar date.
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        let raw = self
            .date
            .as_deref()
            .ok_or(BassError::MissingMetadata { field: "Date" })?;
        Ok(NaiveDate::parse_from_str(raw.trim(), TOURNAMENT_DATE_FORMAT)?)
    }

    pub fn tournament_name(&self) -> Result<&str> {
        self.tournament
            .as_deref()
            .ok_or(BassError::MissingMetadata {
                field: "Tournament",
            })
    }
}

/// A single team's finish in a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub place: u32,
    #[serde(default)]
    pub skeeter_boat: bool,
    pub angler1: String,
    #[serde(default)]
    pub angler1_hometown: String,
    #[serde(default)]
    pub angler2: Option<String>,
    #[serde(default)]
    pub angler2_hometown: Option<String>,
    pub fish: u32,
    #[serde(rename = "big bass")]
    pub big_bass: f64,
    #[serde(rename = "Wt.")]
    pub weight: f64,
    #[serde(default, alias = "prize amt.")]
    pub prize: Option<Prize>,
}

impl ResultRow {
    /// The second angler, if the team had one.
    pub fn partner(&self) -> Option<(&str, Option<&str>)> {
        self.angler2
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| {
                let hometown = self
                    .angler2_hometown
                    .as_deref()
                    .filter(|town| !town.is_empty());
                (name, hometown)
            })
    }

    /// Prize in dollars; raw prize text is normalized on the way out.
    pub fn prize_amount(&self) -> f64 {
        self.prize.as_ref().map_or(0.0, Prize::amount)
    }
}

/// A prize as stored in a staging file.
///
/// The parser writes canonical amounts. Files produced by earlier scrapes may
/// carry the prize cell's raw text instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prize {
    Amount(f64),
    Text(String),
}

impl Prize {
    pub fn amount(&self) -> f64 {
        match self {
            Prize::Amount(amount) => amount.max(0.0),
            Prize::Text(text) => normalize_prize(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_date() {
        let metadata = TournamentMetadata {
            date: Some("October 12, 2019".to_string()),
            ..Default::default()
        };
        assert_eq!(
            metadata.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2019, 10, 12).unwrap()
        );

        let metadata = TournamentMetadata {
            date: Some("June 5, 2006".to_string()),
            ..Default::default()
        };
        assert_eq!(
            metadata.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2006, 6, 5).unwrap()
        );
    }

    #[test]
    fn test_parsed_date_errors() {
        let missing = TournamentMetadata::default();
        assert!(matches!(
            missing.parsed_date(),
            Err(BassError::MissingMetadata { field: "Date" })
        ));

        let garbled = TournamentMetadata {
            date: Some("2019-10-12".to_string()),
            ..Default::default()
        };
        assert!(matches!(garbled.parsed_date(), Err(BassError::DateParse(_))));
    }

    #[test]
    fn test_staging_json_keys() {
        let json = r#"{
            "metadata": {
                "Date": "May 21, 2006",
                "Region": null,
                "Tournament": "Sam Rayburn Team Trail",
                "Tournament Trail": "Bass Champs South"
            },
            "results": [
                {
                    "place": 1,
                    "skeeter_boat": true,
                    "angler1": "John Smith",
                    "angler1_hometown": "Jasper, Tx",
                    "angler2": "",
                    "angler2_hometown": "",
                    "fish": 5,
                    "big bass": 8.31,
                    "Wt.": 24.5,
                    "prize": "$2,500.00"
                },
                {
                    "place": 2,
                    "skeeter_boat": false,
                    "angler1": "Bob Jones",
                    "angler1_hometown": "",
                    "angler2": "Jim Jones",
                    "angler2_hometown": "Lufkin, Tx",
                    "fish": 5,
                    "big bass": 5.0,
                    "Wt.": 20.02,
                    "prize amt.": 1200.0
                }
            ]
        }"#;
        let page: TournamentPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.metadata.region, None);
        assert_eq!(page.metadata.trail.as_deref(), Some("Bass Champs South"));
        assert_eq!(page.results.len(), 2);

        let first = &page.results[0];
        assert_eq!(first.partner(), None);
        assert_eq!(first.prize_amount(), 2500.0);

        let second = &page.results[1];
        assert_eq!(second.partner(), Some(("Jim Jones", Some("Lufkin, Tx"))));
        assert_eq!(second.weight, 20.02);
        assert_eq!(second.prize_amount(), 1200.0);
    }

    #[test]
    fn test_missing_prize_is_zero() {
        let row: ResultRow = serde_json::from_str(
            r#"{"place": 3, "angler1": "A", "fish": 0, "big bass": 0.0, "Wt.": 0.0, "prize": null}"#,
        )
        .unwrap();
        assert_eq!(row.prize_amount(), 0.0);
        assert!(!row.skeeter_boat);
    }
}
