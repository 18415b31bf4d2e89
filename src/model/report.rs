use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::Serialize;

/// A tournament row as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredTournament {
    pub id: i64,
    pub date: NaiveDate,
    pub lake: Option<String>,
    pub region: Option<String>,
    pub tournament: String,
    pub trail: Option<String>,
}

/// Average total weight for one podium place in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceAverage {
    pub year: i32,
    pub place: u32,
    pub avg_weight: f64,
}

/// Average total weight for one podium place on one lake in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LakePlaceAverage {
    pub year: i32,
    pub lake: String,
    pub place: u32,
    pub avg_weight: f64,
}

/// How often a lake was fished and what it took to win there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LakeSummary {
    pub lake: String,
    pub tournament_count: u32,
    pub avg_winning_weight: f64,
}

/// A finisher in a single tournament's standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finisher {
    pub place: u32,
    pub angler1: String,
    pub angler1_hometown: Option<String>,
    pub angler2: Option<String>,
    pub angler2_hometown: Option<String>,
    pub fish: u32,
    pub big_bass: f64,
    pub weight: f64,
}

/// One finish for an angler in either seat of the boat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnglerFinish {
    pub date: NaiveDate,
    pub lake: Option<String>,
    pub tournament: String,
    pub place: u32,
    pub weight: f64,
    pub fish: u32,
}

/// Per-year averages over an angler's finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnglerYear {
    pub year: i32,
    pub tournaments: usize,
    pub avg_weight: f64,
    pub avg_place: f64,
}

/// Group finishes by calendar year, oldest year first.
pub fn yearly_averages(finishes: &[AnglerFinish]) -> Vec<AnglerYear> {
    finishes
        .iter()
        .into_group_map_by(|f| f.date.year())
        .into_iter()
        .sorted_by_key(|(year, _)| *year)
        .map(|(year, group)| {
            let n = group.len() as f64;
            AnglerYear {
                year,
                tournaments: group.len(),
                avg_weight: group.iter().map(|f| f.weight).sum::<f64>() / n,
                avg_place: group.iter().map(|f| f64::from(f.place)).sum::<f64>() / n,
            }
        })
        .collect()
}
