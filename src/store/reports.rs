use rusqlite::params;

use super::{parse_stored_date, Database};
use crate::error::Result;
use crate::model::{
    AnglerFinish, Finisher, LakePlaceAverage, LakeSummary, PlaceAverage, StoredTournament,
};

impl Database {
    /// Average total weight of the top three places, per year.
    pub fn winning_weight_by_year(&self) -> Result<Vec<PlaceAverage>> {
        let mut stmt = self.conn.prepare(
            "SELECT CAST(strftime('%Y', t.date) AS INTEGER) AS year, r.place,
                    ROUND(AVG(r.weight), 2)
             FROM results r
             JOIN tournaments t ON r.tournament_id = t.id
             WHERE r.place IN (1, 2, 3) AND r.weight IS NOT NULL
             GROUP BY year, r.place
             ORDER BY year, r.place",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PlaceAverage {
                    year: row.get(0)?,
                    place: row.get(1)?,
                    avg_weight: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Winning weight and tournament count per known lake, heaviest first.
    pub fn winning_weight_by_lake(&self) -> Result<Vec<LakeSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.lake, COUNT(*), ROUND(AVG(r.weight), 2) AS avg_winning_weight
             FROM tournaments t
             JOIN results r ON t.id = r.tournament_id
             WHERE r.place = 1 AND t.lake IS NOT NULL
             GROUP BY t.lake
             ORDER BY avg_winning_weight DESC, t.lake",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LakeSummary {
                    lake: row.get(0)?,
                    tournament_count: row.get(1)?,
                    avg_winning_weight: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Average weight of the top three places per lake and year, most recent
    /// year first.
    pub fn winning_weight_by_lake_year(&self) -> Result<Vec<LakePlaceAverage>> {
        let mut stmt = self.conn.prepare(
            "SELECT CAST(strftime('%Y', t.date) AS INTEGER) AS year, t.lake, r.place,
                    ROUND(AVG(r.weight), 2)
             FROM results r
             JOIN tournaments t ON r.tournament_id = t.id
             WHERE r.place IN (1, 2, 3) AND r.weight IS NOT NULL AND t.lake IS NOT NULL
             GROUP BY year, t.lake, r.place
             ORDER BY year DESC, t.lake, r.place",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LakePlaceAverage {
                    year: row.get(0)?,
                    lake: row.get(1)?,
                    place: row.get(2)?,
                    avg_weight: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// All tournaments, most recent first.
    pub fn tournaments(&self) -> Result<Vec<StoredTournament>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, lake, region, tournament, tournament_trail
             FROM tournaments
             ORDER BY date DESC, id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let date: String = row.get(1)?;
                Ok(StoredTournament {
                    id: row.get(0)?,
                    date: parse_stored_date(&date)?,
                    lake: row.get(2)?,
                    region: row.get(3)?,
                    tournament: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    trail: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// The first `limit` finishers of a tournament.
    pub fn tournament_top_results(&self, tournament_id: i64, limit: u32) -> Result<Vec<Finisher>> {
        let mut stmt = self.conn.prepare(
            "SELECT place, angler1, angler1_hometown, angler2, angler2_hometown,
                    fish, big_bass, weight
             FROM results
             WHERE tournament_id = ?1
             ORDER BY place ASC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![tournament_id, limit], |row| {
                Ok(Finisher {
                    place: row.get(0)?,
                    angler1: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    angler1_hometown: row.get(2)?,
                    angler2: row.get(3)?,
                    angler2_hometown: row.get(4)?,
                    fish: row.get(5)?,
                    big_bass: row.get(6)?,
                    weight: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Every angler who has fished from either seat, alphabetically.
    pub fn anglers(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT angler FROM (
                SELECT angler1 AS angler FROM results
                UNION
                SELECT angler2 AS angler FROM results
             ) WHERE angler IS NOT NULL AND angler != ''
             ORDER BY angler",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
    }

    /// Every finish for `angler`, best place first, then most recent.
    pub fn angler_finishes(&self, angler: &str) -> Result<Vec<AnglerFinish>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.date, t.lake, t.tournament, r.place, r.weight, r.fish
             FROM tournaments t
             JOIN results r ON t.id = r.tournament_id
             WHERE r.angler1 = ?1 OR r.angler2 = ?1
             ORDER BY r.place ASC, t.date DESC",
        )?;
        let rows = stmt
            .query_map(params![angler], |row| {
                let date: String = row.get(0)?;
                Ok(AnglerFinish {
                    date: parse_stored_date(&date)?,
                    lake: row.get(1)?,
                    tournament: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    place: row.get(3)?,
                    weight: row.get(4)?,
                    fish: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::tests::result;
    use super::*;
    use crate::model::Lake;
    use crate::store::NewTournament;

    fn seed(db: &Database, date: (i32, u32, u32), name: &str, weights: &[f64]) -> i64 {
        let id = db
            .insert_tournament(&NewTournament {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                lake: Lake::infer(name),
                region: None,
                tournament: name,
                trail: None,
            })
            .unwrap();
        for (i, weight) in weights.iter().enumerate() {
            let place = i as u32 + 1;
            let angler1 = format!("Angler {place}");
            let partner = (place == 1).then_some("John Smith");
            db.insert_result(id, &result(place, &angler1, partner, *weight))
                .unwrap();
        }
        id
    }

    fn seeded() -> Database {
        let db = Database::in_memory().unwrap();
        seed(&db, (2019, 3, 2), "Lake Fork Team Trail", &[24.0, 20.0, 18.0, 10.0]);
        seed(&db, (2019, 10, 12), "Lake Texoma Team Trail", &[16.0, 14.0, 12.0]);
        seed(&db, (2020, 6, 28), "Lake Fork Team Trail", &[30.0, 22.0]);
        seed(&db, (2020, 9, 12), "Bass Champs Championship", &[19.0]);
        db
    }

    #[test]
    fn test_winning_weight_by_year() {
        let db = seeded();
        let averages = db.winning_weight_by_year().unwrap();
        let firsts: Vec<(i32, f64)> = averages
            .iter()
            .filter(|a| a.place == 1)
            .map(|a| (a.year, a.avg_weight))
            .collect();
        assert_eq!(firsts, vec![(2019, 20.0), (2020, 24.5)]);
        assert!(averages.iter().all(|a| a.place <= 3));
        assert_eq!(averages.len(), 5);
    }

    #[test]
    fn test_winning_weight_by_lake() {
        let db = seeded();
        let lakes = db.winning_weight_by_lake().unwrap();
        assert_eq!(
            lakes,
            vec![
                LakeSummary {
                    lake: "Lake Fork".to_string(),
                    tournament_count: 2,
                    avg_winning_weight: 27.0,
                },
                LakeSummary {
                    lake: "Lake Texoma".to_string(),
                    tournament_count: 1,
                    avg_winning_weight: 16.0,
                },
            ]
        );
    }

    #[test]
    fn test_winning_weight_by_lake_year() {
        let db = seeded();
        seed(&db, (2019, 11, 9), "Lake Fork Fall Classic", &[28.0, 21.0]);

        let averages = db.winning_weight_by_lake_year().unwrap();
        let row = |year: i32, lake: &str, place: u32, avg_weight: f64| LakePlaceAverage {
            year,
            lake: lake.to_string(),
            place,
            avg_weight,
        };
        assert_eq!(
            averages,
            vec![
                row(2020, "Lake Fork", 1, 30.0),
                row(2020, "Lake Fork", 2, 22.0),
                row(2019, "Lake Fork", 1, 26.0),
                row(2019, "Lake Fork", 2, 20.5),
                row(2019, "Lake Fork", 3, 18.0),
                row(2019, "Lake Texoma", 1, 16.0),
                row(2019, "Lake Texoma", 2, 14.0),
                row(2019, "Lake Texoma", 3, 12.0),
            ]
        );
    }

    #[test]
    fn test_tournaments_and_top_results() {
        let db = seeded();
        let tournaments = db.tournaments().unwrap();
        assert_eq!(tournaments.len(), 4);
        assert_eq!(tournaments[0].tournament, "Bass Champs Championship");
        assert_eq!(tournaments[0].lake, None);
        assert_eq!(tournaments[3].lake.as_deref(), Some("Lake Fork"));

        let fork_2019 = tournaments[3].id;
        let top = db.tournament_top_results(fork_2019, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].place, 1);
        assert_eq!(top[0].angler2.as_deref(), Some("John Smith"));
        assert_eq!(top[1].angler2, None);
    }

    #[test]
    fn test_angler_lookup() {
        let db = seeded();
        let anglers = db.anglers().unwrap();
        assert_eq!(
            anglers,
            vec!["Angler 1", "Angler 2", "Angler 3", "Angler 4", "John Smith"]
        );

        let finishes = db.angler_finishes("John Smith").unwrap();
        assert_eq!(finishes.len(), 4);
        // All first places, so most recent comes first.
        assert_eq!(finishes[0].date, NaiveDate::from_ymd_opt(2020, 9, 12).unwrap());
        assert_eq!(finishes[3].date, NaiveDate::from_ymd_opt(2019, 3, 2).unwrap());

        let finishes = db.angler_finishes("Angler 2").unwrap();
        assert_eq!(finishes.len(), 3);
        assert!(finishes.iter().all(|f| f.place == 2));

        assert!(db.angler_finishes("Nobody").unwrap().is_empty());
    }
}
