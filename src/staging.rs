//! On-disk staging between scrape and load: the links file and one JSON
//! document per tournament.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{BassError, Result};
use crate::model::{LinkSet, TournamentPage};

impl LinkSet {
    /// Read the links file. A missing or empty file is an empty set.
    pub fn load(path: &Path) -> Result<LinkSet> {
        if !path.exists() {
            return Ok(LinkSet::new());
        }
        let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        if raw.trim().is_empty() {
            return Ok(LinkSet::new());
        }
        info!(path = %path.display(), "loading links");
        serde_json::from_str(&raw).map_err(|source| json_error(path, source))
    }

    /// Overwrite the links file with the whole set.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)?;
        info!(path = %path.display(), count = self.len(), "saved links");
        Ok(())
    }
}

/// Staging file name for a page, derived from its tournament name and date.
pub fn file_name(page: &TournamentPage) -> Result<String> {
    let name = page.metadata.tournament_name()?;
    let date = page
        .metadata
        .date
        .as_deref()
        .ok_or(BassError::MissingMetadata { field: "Date" })?;

    let name = sanitize(&name.replace(' ', "_"));
    let date = sanitize(&date.replace(' ', "_").replace(',', ""));
    Ok(format!("{name}_{date}.json"))
}

fn sanitize(part: &str) -> String {
    part.replace(['/', '\\'], "_")
}

/// Write `page` into `dir`, replacing any earlier copy. Returns the path
/// written.
pub fn write_page(dir: &Path, page: &TournamentPage) -> Result<PathBuf> {
    let path = dir.join(file_name(page)?);
    write_json(&path, page)?;
    Ok(path)
}

pub fn read_page(path: &Path) -> Result<TournamentPage> {
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    serde_json::from_str(&raw).map_err(|source| json_error(path, source))
}

/// Every `*.json` file in `dir`, sorted by name.
pub fn staged_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
    let mut files = vec![];
    for entry in entries {
        let path = entry.map_err(|source| io_error(dir, source))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "found staged files");
    Ok(files)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| json_error(path, source))?;
    fs::write(path, json).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> BassError {
    BassError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> BassError {
    BassError::Json {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Prize, ResultRow, TournamentMetadata};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "basschamps-staging-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn page(name: &str, date: &str) -> TournamentPage {
        TournamentPage {
            metadata: TournamentMetadata {
                date: Some(date.to_string()),
                region: Some("North".to_string()),
                tournament: Some(name.to_string()),
                trail: None,
            },
            results: vec![ResultRow {
                place: 1,
                skeeter_boat: true,
                angler1: "John Smith".to_string(),
                angler1_hometown: "Denton, Tx".to_string(),
                angler2: None,
                angler2_hometown: None,
                fish: 5,
                big_bass: 6.5,
                weight: 22.25,
                prize: Some(Prize::Amount(5000.0)),
            }],
        }
    }

    #[test]
    fn test_file_name() {
        let p = page("Lake Fork Team Trail", "October 12, 2019");
        assert_eq!(
            file_name(&p).unwrap(),
            "Lake_Fork_Team_Trail_October_12_2019.json"
        );

        let p = page("Red River 1/2 Day", "May 1, 2010");
        assert_eq!(file_name(&p).unwrap(), "Red_River_1_2_Day_May_1_2010.json");
    }

    #[test]
    fn test_file_name_requires_metadata() {
        let mut p = page("Lake Fork", "October 12, 2019");
        p.metadata.date = None;
        assert!(matches!(
            file_name(&p),
            Err(BassError::MissingMetadata { field: "Date" })
        ));
        p.metadata.tournament = None;
        assert!(matches!(
            file_name(&p),
            Err(BassError::MissingMetadata { field: "Tournament" })
        ));
    }

    #[test]
    fn test_write_then_read_page() {
        let dir = scratch_dir("pages");
        let original = page("Lake Fork Team Trail", "October 12, 2019");
        let path = write_page(&dir, &original).unwrap();
        write_page(&dir, &page("Texoma", "June 1, 2020")).unwrap();
        fs::write(dir.join("notes.txt"), "not staged").unwrap();

        assert_eq!(read_page(&path).unwrap(), original);
        let files = staged_files(&dir).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("Lake_Fork_Team_Trail_October_12_2019.json"));
        assert!(files[1].ends_with("Texoma_June_1_2020.json"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_links_file() {
        let dir = scratch_dir("links");
        let path = dir.join("links").join("basschamps_links.json");
        assert!(LinkSet::load(&path).unwrap().is_empty());

        let links: LinkSet = vec!["a".to_string(), "b".to_string()].into();
        links.save(&path).unwrap();
        assert_eq!(LinkSet::load(&path).unwrap(), links);

        fs::write(&path, "  \n").unwrap();
        assert!(LinkSet::load(&path).unwrap().is_empty());

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(LinkSet::load(&path), Err(BassError::Json { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }
}
