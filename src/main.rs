//! BASS CHAMPS results CLI
//!
//! Discovers tournament result pages, stages them as JSON and loads them into
//! SQLite, plus a few reports over the loaded data.

use std::path::PathBuf;

use anyhow::Context;
use basschamps_scraper::{
    load_dir, yearly_averages, AppConfig, BassChampsClient, Database, LinkSet,
};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "basschamps")]
#[command(about = "Scrape BASS CHAMPS team tournament results into SQLite", long_about = None)]
struct Cli {
    /// Config file path (defaults to ./basschamps.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover tournament links and merge them into the links file
    Links {
        #[command(flatten)]
        years: YearArgs,
    },
    /// Fetch every known tournament and write staging files
    Scrape {
        #[command(flatten)]
        years: YearArgs,
        /// Use the links file as is, without checking the yearly listings
        #[arg(long)]
        skip_discovery: bool,
        /// Staging directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Load staging files into the database
    Load {
        /// Staging directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// SQLite database path
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Discover, scrape and load in one go
    Run {
        #[command(flatten)]
        years: YearArgs,
    },
    /// Average weight of the top three places per year
    Years,
    /// Average winning weight and tournament count per lake
    Lakes {
        /// Show the top three places per lake for each year instead
        #[arg(long)]
        by_year: bool,
    },
    /// List tournaments, or the top finishers of one tournament
    Top {
        /// Only list tournaments from this year
        #[arg(long)]
        year: Option<i32>,
        /// Tournament id to show standings for
        #[arg(long)]
        tournament: Option<i64>,
        /// Number of finishers to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Finishes and yearly averages for one angler
    Angler {
        /// Full angler name as published, e.g. "John Smith"
        name: String,
    },
}

#[derive(clap::Args)]
struct YearArgs {
    /// First year to list (inclusive)
    #[arg(long)]
    min_year: Option<u16>,
    /// Year to stop at (exclusive)
    #[arg(long)]
    max_year: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "basschamps_scraper=debug,basschamps=debug"
    } else {
        "basschamps_scraper=info,basschamps=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Links { years } => {
            years.apply(&mut config);
            discover(&config).await?;
        }
        Commands::Scrape {
            years,
            skip_discovery,
            data_dir,
        } => {
            years.apply(&mut config);
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir;
            }
            scrape(&config, skip_discovery).await?;
        }
        Commands::Load { data_dir, database } => {
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir;
            }
            if let Some(path) = database {
                config.storage.database = path;
            }
            load(&config)?;
        }
        Commands::Run { years } => {
            years.apply(&mut config);
            scrape(&config, false).await?;
            load(&config)?;
        }
        Commands::Years => report_years(&open_db(&config)?)?,
        Commands::Lakes { by_year: false } => report_lakes(&open_db(&config)?)?,
        Commands::Lakes { by_year: true } => report_lakes_by_year(&open_db(&config)?)?,
        Commands::Top {
            year,
            tournament,
            limit,
        } => report_top(&open_db(&config)?, year, tournament, limit)?,
        Commands::Angler { name } => report_angler(&open_db(&config)?, &name)?,
    }

    Ok(())
}

impl YearArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(year) = self.min_year {
            config.scrape.min_year = year;
        }
        if let Some(year) = self.max_year {
            config.scrape.max_year = year;
        }
    }
}

async fn discover(config: &AppConfig) -> anyhow::Result<LinkSet> {
    let client = BassChampsClient::new(&config.scrape)?;
    let known = LinkSet::load(&config.storage.links_file)?;
    let years = config.scrape.min_year..config.scrape.max_year;
    let links = client.discover_links(years, known).await;
    links.save(&config.storage.links_file)?;
    Ok(links)
}

async fn scrape(config: &AppConfig, skip_discovery: bool) -> anyhow::Result<()> {
    let links = if skip_discovery {
        LinkSet::load(&config.storage.links_file)?
    } else {
        discover(config).await?
    };
    let client = BassChampsClient::new(&config.scrape)?;
    let summary = client
        .stage_tournaments(&links, &config.storage.data_dir)
        .await;
    println!(
        "Staged {} tournaments in {} ({} failed)",
        summary.written,
        config.storage.data_dir.display(),
        summary.failed
    );
    Ok(())
}

fn load(config: &AppConfig) -> anyhow::Result<()> {
    let db = open_db(config)?;
    let summary = load_dir(&db, &config.storage.data_dir)?;
    println!(
        "Loaded {} tournaments ({} results), {} already present, into {}",
        summary.inserted,
        summary.results,
        summary.skipped,
        config.storage.database.display()
    );
    Ok(())
}

fn open_db(config: &AppConfig) -> anyhow::Result<Database> {
    Database::open(&config.storage.database)
        .with_context(|| format!("opening {}", config.storage.database.display()))
}

fn report_years(db: &Database) -> anyhow::Result<()> {
    println!("{:<6} {:>8} {:>8} {:>8}", "Year", "1st", "2nd", "3rd");
    for (year, group) in &db.winning_weight_by_year()?.into_iter().chunk_by(|a| a.year) {
        let mut weights = [None; 3];
        for average in group {
            if let Some(slot) = weights.get_mut(average.place as usize - 1) {
                *slot = Some(average.avg_weight);
            }
        }
        let cells = weights
            .iter()
            .map(|w| w.map_or_else(|| "-".to_string(), |w| format!("{w:.2}")))
            .map(|w| format!("{w:>8}"))
            .join(" ");
        println!("{year:<6} {cells}");
    }
    Ok(())
}

fn report_lakes(db: &Database) -> anyhow::Result<()> {
    println!("{:<30} {:>11} {:>12}", "Lake", "Tournaments", "Avg Winning");
    for lake in db.winning_weight_by_lake()? {
        println!(
            "{:<30} {:>11} {:>12.2}",
            lake.lake, lake.tournament_count, lake.avg_winning_weight
        );
    }
    Ok(())
}

fn report_lakes_by_year(db: &Database) -> anyhow::Result<()> {
    let averages = db.winning_weight_by_lake_year()?;
    for (year, group) in &averages.iter().chunk_by(|a| a.year) {
        println!("{year}");
        println!("  {:<30} {:>8} {:>8} {:>8}", "Lake", "1st", "2nd", "3rd");
        for (lake, places) in &group.chunk_by(|a| a.lake.clone()) {
            let mut weights = [None; 3];
            for average in places {
                if let Some(slot) = weights.get_mut(average.place as usize - 1) {
                    *slot = Some(average.avg_weight);
                }
            }
            let cells = weights
                .iter()
                .map(|w| w.map_or_else(|| "-".to_string(), |w| format!("{w:.2}")))
                .map(|w| format!("{w:>8}"))
                .join(" ");
            println!("  {lake:<30} {cells}");
        }
    }
    Ok(())
}

fn report_top(
    db: &Database,
    year: Option<i32>,
    tournament: Option<i64>,
    limit: u32,
) -> anyhow::Result<()> {
    let Some(id) = tournament else {
        for t in db
            .tournaments()?
            .into_iter()
            .filter(|t| year.map_or(true, |y| t.date.year() == y))
        {
            println!(
                "{:>5}  {}  {:<45} {}",
                t.id,
                t.date,
                t.tournament,
                t.lake.as_deref().unwrap_or("-")
            );
        }
        return Ok(());
    };

    println!(
        "{:>5} {:<25} {:<25} {:<25} {:<25} {:>4} {:>8} {:>8}",
        "Place", "Angler 1", "Hometown", "Angler 2", "Hometown", "Fish", "Big Bass", "Weight"
    );
    for f in db.tournament_top_results(id, limit)? {
        println!(
            "{:>5} {:<25} {:<25} {:<25} {:<25} {:>4} {:>8.2} {:>8.2}",
            f.place,
            f.angler1,
            f.angler1_hometown.as_deref().unwrap_or(""),
            f.angler2.as_deref().unwrap_or(""),
            f.angler2_hometown.as_deref().unwrap_or(""),
            f.fish,
            f.big_bass,
            f.weight
        );
    }
    Ok(())
}

fn report_angler(db: &Database, name: &str) -> anyhow::Result<()> {
    let finishes = db.angler_finishes(name)?;
    if finishes.is_empty() {
        let needle = name.to_lowercase();
        let close: Vec<String> = db
            .anglers()?
            .into_iter()
            .filter(|a| a.to_lowercase().contains(&needle))
            .take(10)
            .collect();
        if close.is_empty() {
            println!("Angler not found. Try a full name or check the spelling.");
        } else {
            println!("Angler not found. Did you mean: {}", close.join(", "));
        }
        return Ok(());
    }

    println!("Finishes for {name} (best, then most recent)");
    println!("{:>5} {:<30} {:>8} {:>4}  {}", "Place", "Lake", "Weight", "Fish", "Date");
    for f in &finishes {
        println!(
            "{:>5} {:<30} {:>8.2} {:>4}  {}",
            f.place,
            f.lake.as_deref().unwrap_or("-"),
            f.weight,
            f.fish,
            f.date
        );
    }

    println!();
    println!("{:<6} {:>11} {:>10} {:>9}", "Year", "Tournaments", "Avg Weight", "Avg Place");
    for y in yearly_averages(&finishes) {
        println!(
            "{:<6} {:>11} {:>10.1} {:>9.1}",
            y.year, y.tournaments, y.avg_weight, y.avg_place
        );
    }
    Ok(())
}
