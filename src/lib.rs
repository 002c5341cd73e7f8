//! Station infobox scraper.
//!
//! Pulls name, coordinates, daily ridership and neighbouring-station links out of
//! encyclopedia station articles, and walks the article graph at random along those links.

pub mod config;
pub mod coord;
mod error;
pub mod extract;
mod macros;
pub mod parse;
pub mod process;
pub mod record;
pub mod request;

pub use config::{Config, Markers};
pub use coord::{to_decimal_degrees, Coordinate};
pub use error::{Error, Result};
pub use process::{extract, extract_from_html, walk, Step, Traversal, WalkLimits};
pub use record::StationRecord;
pub use request::{Fetch, WikiClient};

pub const DEFAULT_WIKI_URL: &str = "https://ja.wikipedia.org";
pub const DEFAULT_START: &str = "/wiki/京橋駅_(大阪府)";

#[doc(hidden)]
pub fn elapsed_secs(since: chrono::DateTime<chrono::Local>) -> f64 {
    (chrono::Local::now() - since)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}
