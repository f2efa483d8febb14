//! minbar command-line entry point.
//!
//! Each subcommand calls one gateway adapter and prints the result as JSON on
//! stdout, tagged with its freshness. Logging goes to stderr.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use minbar_client::{Gateway, TabularHijri, catalog};
use minbar_core::{AppConfig, daily, geodesy};

/// Quran, hadith, prayer-times and geolocation content from public providers.
#[derive(Debug, Parser)]
#[command(name = "minbar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Compact JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the 114 surahs
    Surahs,

    /// Arabic text of a surah
    Surah { number: u16 },

    /// A translation of a surah
    Translation {
        number: u16,
        /// Translation edition, e.g. en.sahih
        #[arg(short, long)]
        edition: Option<String>,
    },

    /// Verses of a juz grouped by surah
    Juz { number: u8 },

    /// Arabic text of one ayah
    Ayah { surah: u16, ayah: u16 },

    /// Recitation URL for one ayah
    Audio {
        surah: u16,
        ayah: u16,
        /// Reciter edition, e.g. ar.husary
        #[arg(short, long)]
        reciter: Option<String>,
    },

    /// Simplified tafsir for one ayah
    Tafsir { surah: u16, ayah: u16 },

    /// Search the Arabic Quran text
    Search { query: String },

    /// Verse of the day (today when no date is given)
    Vod {
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List translation editions and reciters
    Editions,

    /// List hadith collections
    HadithCollections,

    /// Sections of a hadith collection
    HadithSections { collection: String },

    /// Hadiths of one section
    HadithSection { collection: String, section: String },

    /// Search the Forty Hadith of an-Nawawi
    HadithSearch { query: String },

    /// Prayer times for a position
    Prayer {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
        /// Calculation method (aladhan numbering)
        #[arg(short, long)]
        method: Option<u8>,
    },

    /// Qibla bearing and distance from a position
    Qibla {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Locate a client address
    Geo {
        /// Value of an X-Forwarded-For header
        #[arg(long)]
        forwarded_for: Option<String>,
        /// Direct connection address
        #[arg(long)]
        remote: Option<IpAddr>,
    },

    /// Convert a Gregorian date to Hijri (tabular calendar)
    ConvertDate {
        /// Date as YYYY-MM-DD
        date: String,
        /// Regional adjustment in days, clamped to ±2
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        adjustment: i64,
    },

    /// Index chosen by the daily selector
    Daily {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        /// Exclusive upper bound of the index
        upper_bound: usize,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(command = ?cli.command, "starting minbar");

    run(cli.command, config, cli.compact).await
}

async fn run(command: Command, config: AppConfig, compact: bool) -> Result<()> {
    let out = Output { compact };

    // commands that need no provider
    match &command {
        Command::Surahs => return out.print(&catalog::SURAHS[..]),
        Command::Editions => {
            return out.print(&serde_json::json!({
                "translations": catalog::TRANSLATIONS,
                "reciters": catalog::RECITERS,
            }));
        }
        Command::HadithCollections => return out.print(&catalog::HADITH_COLLECTIONS),
        Command::Qibla { lat, lng } => return out.print(&geodesy::qibla(*lat, *lng)?),
        Command::Daily { date, upper_bound } => {
            let index = daily::select_index(*date, *upper_bound)?;
            return out.print(&serde_json::json!({"date": date, "upper_bound": upper_bound, "index": index}));
        }
        Command::Config => return out.print(&config),
        _ => {}
    }

    let gateway = Gateway::new(config)
        .context("failed to build gateway")?
        .with_hijri(Arc::new(TabularHijri));

    match command {
        Command::Surah { number } => out.print(&gateway.quran().surah_text(number).await?),
        Command::Translation { number, edition } => {
            out.print(&gateway.quran().translation(number, edition.as_deref()).await?)
        }
        Command::Juz { number } => out.print(&gateway.quran().juz(number).await?),
        Command::Ayah { surah, ayah } => out.print(&gateway.quran().ayah(surah, ayah).await?),
        Command::Audio { surah, ayah, reciter } => {
            out.print(&gateway.quran().audio_url(surah, ayah, reciter.as_deref()).await?)
        }
        Command::Tafsir { surah, ayah } => out.print(&gateway.quran().tafsir(surah, ayah).await?),
        Command::Search { query } => out.print(&gateway.quran().search(&query).await?),
        Command::Vod { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            out.print(&gateway.quran().verse_of_the_day(date).await?)
        }
        Command::HadithSections { collection } => out.print(&gateway.hadith().sections(&collection).await?),
        Command::HadithSection { collection, section } => {
            out.print(&gateway.hadith().section(&collection, &section).await?)
        }
        Command::HadithSearch { query } => out.print(&gateway.hadith().search(&query).await?),
        Command::Prayer { lat, lng, method } => out.print(&gateway.prayer().times(lat, lng, method).await?),
        Command::Geo { forwarded_for, remote } => {
            out.print(&gateway.geo().locate(forwarded_for.as_deref(), remote).await?)
        }
        Command::ConvertDate { date, adjustment } => out.print(&gateway.calendar().convert_iso(&date, adjustment)?),
        Command::Surahs
        | Command::Editions
        | Command::HadithCollections
        | Command::Qibla { .. }
        | Command::Daily { .. }
        | Command::Config => Ok(()),
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    compact: bool,
}

impl Output {
    fn print<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        let json = if self.compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
        println!("{json}");
        Ok(())
    }
}
