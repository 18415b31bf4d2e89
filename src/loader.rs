//! Batch load of staged tournament files into the store.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::{BassError, Result};
use crate::model::{Lake, TournamentPage};
use crate::staging;
use crate::store::{Database, NewTournament};

/// What happened to a single staged tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Inserted { tournament_id: i64, results: usize },
    AlreadyLoaded { tournament_id: i64 },
}

/// Totals for a batch load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub results: usize,
}

impl LoadSummary {
    fn record(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Inserted { results, .. } => {
                self.inserted += 1;
                self.results += results;
            }
            LoadOutcome::AlreadyLoaded { .. } => self.skipped += 1,
        }
    }
}

/// Insert one tournament and its results unless a tournament with the same
/// date and name is already stored.
pub fn load_page(db: &Database, page: &TournamentPage) -> Result<LoadOutcome> {
    let metadata = &page.metadata;
    let date = metadata.parsed_date()?;
    let name = metadata.tournament_name()?;

    if let Some(tournament_id) = db.find_tournament(date, name)? {
        debug!(tournament_id, name, %date, "tournament already loaded");
        return Ok(LoadOutcome::AlreadyLoaded { tournament_id });
    }

    let lake = Lake::infer(name);
    if lake.is_none() {
        debug!(name, %date, "no lake found in tournament name");
    }

    let tournament_id = db.insert_tournament(&NewTournament {
        date,
        lake,
        region: metadata.region.as_deref(),
        tournament: name,
        trail: metadata.trail.as_deref(),
    })?;
    for result in &page.results {
        db.insert_result(tournament_id, result)?;
    }
    info!(tournament_id, name, %date, results = page.results.len(), "inserted tournament");

    Ok(LoadOutcome::Inserted {
        tournament_id,
        results: page.results.len(),
    })
}

/// Load every staged file in `dir`.
///
/// Stops at the first file that cannot be read or whose date cannot be
/// parsed. Tournaments inserted before that point stay inserted and are
/// skipped on the next run.
#[instrument(skip(db))]
pub fn load_dir(db: &Database, dir: &Path) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();
    for path in staging::staged_files(dir)? {
        let outcome = staging::read_page(&path)
            .and_then(|page| load_page(db, &page))
            .map_err(|source| BassError::Staging {
                path: path.clone(),
                source: Box::new(source),
            })?;
        summary.record(outcome);
    }
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        results = summary.results,
        "load finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::model::{Prize, ResultRow, TournamentMetadata};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "basschamps-loader-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn row(place: u32, weight: f64) -> ResultRow {
        ResultRow {
            place,
            skeeter_boat: false,
            angler1: format!("Angler {place}"),
            angler1_hometown: String::new(),
            angler2: Some(format!("Partner {place}")),
            angler2_hometown: Some("Tyler, Tx".to_string()),
            fish: 5,
            big_bass: 4.0,
            weight,
            prize: Some(Prize::Text("$500".to_string())),
        }
    }

    fn page(name: &str, date: Option<&str>) -> TournamentPage {
        TournamentPage {
            metadata: TournamentMetadata {
                date: date.map(str::to_string),
                region: Some("East".to_string()),
                tournament: Some(name.to_string()),
                trail: Some("Bass Champs".to_string()),
            },
            results: vec![row(1, 22.1), row(2, 19.8), row(3, 17.0)],
        }
    }

    #[test]
    fn test_load_page_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let p = page("Lake Fork Team Trail", Some("October 12, 2019"));

        let first = load_page(&db, &p).unwrap();
        let LoadOutcome::Inserted {
            tournament_id,
            results,
        } = first
        else {
            panic!("expected insert, got {first:?}");
        };
        assert_eq!(results, 3);

        let second = load_page(&db, &p).unwrap();
        assert_eq!(second, LoadOutcome::AlreadyLoaded { tournament_id });
        assert_eq!(db.tournament_count().unwrap(), 1);
        assert_eq!(db.result_count(tournament_id).unwrap(), 3);

        let stored = &db.tournaments().unwrap()[0];
        assert_eq!(stored.lake.as_deref(), Some("Lake Fork"));
        assert_eq!(stored.date.to_string(), "2019-10-12");
    }

    #[test]
    fn test_unknown_lake_is_null() {
        let db = Database::in_memory().unwrap();
        load_page(&db, &page("Fall Classic", Some("May 2, 2015"))).unwrap();
        assert_eq!(db.tournaments().unwrap()[0].lake, None);
    }

    #[test]
    fn test_same_name_different_date_is_new() {
        let db = Database::in_memory().unwrap();
        load_page(&db, &page("Lake Fork Team Trail", Some("March 2, 2019"))).unwrap();
        load_page(&db, &page("Lake Fork Team Trail", Some("March 7, 2020"))).unwrap();
        assert_eq!(db.tournament_count().unwrap(), 2);
    }

    #[test]
    fn test_missing_date_fails() {
        let db = Database::in_memory().unwrap();
        let err = load_page(&db, &page("Lake Fork", None)).unwrap_err();
        assert!(matches!(err, BassError::MissingMetadata { field: "Date" }));
        assert_eq!(db.tournament_count().unwrap(), 0);
    }

    #[test]
    fn test_load_dir_twice() {
        let dir = scratch_dir("twice");
        staging::write_page(&dir, &page("Lake Fork Team Trail", Some("October 12, 2019"))).unwrap();
        staging::write_page(&dir, &page("Toledo Bend Classic", Some("February 17, 2018"))).unwrap();

        let db = Database::in_memory().unwrap();
        let first = load_dir(&db, &dir).unwrap();
        assert_eq!(
            first,
            LoadSummary {
                inserted: 2,
                skipped: 0,
                results: 6
            }
        );

        let second = load_dir(&db, &dir).unwrap();
        assert_eq!(
            second,
            LoadSummary {
                inserted: 0,
                skipped: 2,
                results: 0
            }
        );
        assert_eq!(db.tournament_count().unwrap(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_dir_stops_on_bad_date() {
        let dir = scratch_dir("bad-date");
        staging::write_page(&dir, &page("A Lake Fork Event", Some("October 12, 2019"))).unwrap();
        staging::write_page(&dir, &page("B Texoma Event", Some("12/10/2019"))).unwrap();

        let db = Database::in_memory().unwrap();
        match load_dir(&db, &dir).unwrap_err() {
            BassError::Staging { path, source } => {
                assert!(path.ends_with("B_Texoma_Event_12_10_2019.json"));
                assert!(matches!(*source, BassError::DateParse(_)));
            }
            other => panic!("expected staging error, got {other:?}"),
        }
        // The file before the bad one stays loaded.
        assert_eq!(db.tournament_count().unwrap(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
