use ::scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Prize, ResultRow, TournamentMetadata, TournamentPage};
use crate::scraper::prize::normalize_prize;
use crate::scraper::{cell_text, stripped_text, title_case, Html, PageLayout};

/// Rows narrower than this are layout or summary rows, not team results.
const MIN_RESULT_CELLS: usize = 9;

/// Vendor token in the boat logo of teams fishing out of a Skeeter.
const SKEETER_TOKEN: &str = "skeeter";

/// Team tournament result page: a label/value header table followed by the
/// standings table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamResults;

impl PageLayout for TeamResults {
    type Output = TournamentPage;

    fn parse(&self, document: &Html) -> Result<TournamentPage> {
        let metadata = parse_metadata(document)?;
        let results = parse_results(document)?;
        debug!(
            tournament = metadata.tournament.as_deref().unwrap_or_default(),
            count = results.len(),
            "parsed result page"
        );
        Ok(TournamentPage { metadata, results })
    }
}

fn parse_metadata(document: &Html) -> Result<TournamentMetadata> {
    let row_selector = Selector::parse("tr")?;
    let label_selector = Selector::parse("td.white[align=right]")?;
    let value_selector = Selector::parse("td.babyBlue")?;

    let mut metadata = TournamentMetadata::default();
    for row in document.select(&row_selector) {
        let Some(label_cell) = row.select(&label_selector).next() else {
            continue;
        };
        let label_text = label_cell.text().collect::<String>();
        let label_text = label_text.trim();
        if !label_text.ends_with(':') {
            continue;
        }
        let Some(value_cell) = row.select(&value_selector).next() else {
            continue;
        };

        let value = Some(stripped_text(&value_cell));
        match label_text.replace(':', "").as_str() {
            "Date" => metadata.date = value,
            "Region" => metadata.region = value,
            "Tournament" => metadata.tournament = value,
            "Tournament Trail" => metadata.trail = value,
            _ => {}
        }
    }
    Ok(metadata)
}

fn parse_results(document: &Html) -> Result<Vec<ResultRow>> {
    let row_selector = Selector::parse("tr")?;
    let td_selector = Selector::parse("td")?;
    let img_selector = Selector::parse("img")?;
    let strong_selector = Selector::parse("strong")?;

    let mut results = vec![];
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
        if cells.len() < MIN_RESULT_CELLS {
            continue;
        }
        // Header and total rows carry no numeric place.
        let Ok(place) = cell_text(&cells[0]).parse::<u32>() else {
            continue;
        };

        match parse_result_row(place, &cells, &img_selector, &strong_selector) {
            Ok(result) => results.push(result),
            Err(e) => warn!(place, error = %e, "skipping result row with unparsable numbers"),
        }
    }
    Ok(results)
}

fn parse_result_row(
    place: u32,
    cells: &[ElementRef],
    img_selector: &Selector,
    strong_selector: &Selector,
) -> Result<ResultRow> {
    let skeeter_boat = cells[1]
        .select(img_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .is_some_and(|src| src.to_lowercase().contains(SKEETER_TOKEN));

    let (angler1, angler1_hometown) = parse_angler(&cells[3], strong_selector);
    let (angler2, angler2_hometown) = parse_angler(&cells[4], strong_selector);
    let has_partner = !angler2.is_empty();

    Ok(ResultRow {
        place,
        skeeter_boat,
        angler1,
        angler1_hometown,
        angler2: has_partner.then_some(angler2),
        angler2_hometown: has_partner.then_some(angler2_hometown),
        fish: cell_text(&cells[5]).parse()?,
        big_bass: cell_text(&cells[6]).parse()?,
        weight: cell_text(&cells[7]).parse()?,
        prize: Some(Prize::Amount(normalize_prize(&stripped_text(&cells[8])))),
    })
}

/// Name is the first line of text in the cell; the hometown is split across
/// two `<strong>` elements as city and state.
fn parse_angler(cell: &ElementRef, strong_selector: &Selector) -> (String, String) {
    let name = cell
        .text()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    let strong: Vec<String> = cell
        .select(strong_selector)
        .take(2)
        .map(|s| stripped_text(&s))
        .collect();
    let hometown = match strong.as_slice() {
        [city, state] => format!("{city}, {state}"),
        _ => String::new(),
    };

    (title_case(name), title_case(&hometown))
}
