//! Application runtime: one fetch, one selection pass, one printed report.

use anyhow::Result;
use chrono::Local;
use log::debug;

use crate::arrivals::{MAX_SHOWN, select_upcoming};
use crate::cli::Config;
use crate::fetch::{ArrivalsSource, FetchError, HttpSource, REQUEST_TIMEOUT, fetch_arrivals};
use crate::table::{display_row, render_table};

const EMPTY_MESSAGE: &str = "No upcoming buses found.";

/// Produce the full report text for one stop URL: either the empty-feed
/// message or a headline plus the rendered table.
pub async fn report_for<S: ArrivalsSource>(source: &S, url: &str) -> Result<String, FetchError> {
    let records = fetch_arrivals(source, url).await?;

    // One reference instant for the whole run, taken before any filtering.
    let now = Local::now().fixed_offset();
    let upcoming = select_upcoming(records, now);
    debug!("{} upcoming arrivals after selection", upcoming.len());

    if upcoming.is_empty() {
        return Ok(EMPTY_MESSAGE.to_string());
    }

    let rows: Vec<_> = upcoming.iter().map(|a| display_row(a, now)).collect();
    Ok(format!("Next {MAX_SHOWN} buses\n{}", render_table(&rows)))
}

/// Run one fetch/report cycle against the configured URL.
pub async fn run(config: Config) -> Result<()> {
    debug!("querying {}", config.url);
    let source = HttpSource::new(REQUEST_TIMEOUT);
    let report = report_for(&source, &config.url).await?;
    println!("{report}");
    Ok(())
}
