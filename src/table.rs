//! Table presentation: turns selected arrivals into display rows and lays
//! them out as an aligned, dash-separated text table.

use chrono::{DateTime, FixedOffset, Local};
use log::debug;

use crate::arrivals::{ResolvedArrival, parse_arrival_time};

pub const COLUMNS: usize = 6;

pub const HEADERS: [&str; COLUMNS] = [
    "Expected at",
    "In",
    "Destination",
    "Status",
    "Stops to dest.",
    "Theoretical",
];

/// Destination cells longer than this many characters are truncated.
pub const MAX_DESTINATION_CHARS: usize = 28;

/// No column grows wider than this, whatever its contents.
pub const MAX_COLUMN_WIDTH: usize = 40;

/// Shown in place of any field the feed did not provide.
const PLACEHOLDER: &str = "—";

/// One fully formatted table row.
pub type DisplayRow = [String; COLUMNS];

/// Wall-clock rendering of an instant, in the machine's local timezone.
pub fn human_time(instant: DateTime<FixedOffset>) -> String {
    instant.with_timezone(&Local).format("%H:%M").to_string()
}

/// Minutes-until label for an arrival. Floors toward the past, so anything
/// under a full minute away (or already gone) reads as "due".
pub fn countdown_label(target: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    let minutes = (target - now).num_seconds().div_euclid(60);
    match minutes {
        m if m <= 0 => "due".to_string(),
        1 => "1 min".to_string(),
        m => format!("{m} mins"),
    }
}

/// Shorten `text` to at most `limit` characters, marking the cut with an
/// ellipsis. Counts characters, not bytes.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit <= 1 {
        return text.chars().take(limit).collect();
    }
    let mut cut: String = text.chars().take(limit - 1).collect();
    cut.push('…');
    cut
}

/// Format one resolved arrival as the six display cells.
pub fn display_row(resolved: &ResolvedArrival, now: DateTime<FixedOffset>) -> DisplayRow {
    let record = &resolved.record;
    let destination = record.destination.as_deref().unwrap_or("Unknown");
    [
        human_time(resolved.arrival),
        countdown_label(resolved.arrival, now),
        truncate(destination, MAX_DESTINATION_CHARS),
        record
            .status
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        record
            .stops_to_destination
            .map(|n| n.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        parse_arrival_time(record.aimed_arrival.as_deref())
            .map(human_time)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    ]
}

/// Lay out header, separator and data rows with two spaces between columns.
/// Every column is as wide as its widest cell, capped at [`MAX_COLUMN_WIDTH`].
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut widths: [usize; COLUMNS] = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count()).min(MAX_COLUMN_WIDTH);
        }
    }
    debug!("rendering {} rows", rows.len());

    let format_row = |row: &DisplayRow| {
        row.iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header_row: DisplayRow = HEADERS.map(str::to_string);
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![format_row(&header_row), separator];
    lines.extend(rows.iter().map(format_row));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{ArrivalRecord, resolve_arrival};
    use chrono::Duration;

    fn base_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00+02:00").unwrap()
    }

    fn resolved(record: ArrivalRecord) -> ResolvedArrival {
        let arrival = resolve_arrival(&record).unwrap();
        ResolvedArrival { arrival, record }
    }

    #[test]
    fn countdown_is_due_at_or_before_now() {
        let now = base_now();
        assert_eq!(countdown_label(now, now), "due");
        assert_eq!(countdown_label(now - Duration::minutes(3), now), "due");
        assert_eq!(countdown_label(now + Duration::seconds(59), now), "due");
    }

    #[test]
    fn countdown_floors_partial_minutes() {
        let now = base_now();
        assert_eq!(countdown_label(now + Duration::seconds(90), now), "1 min");
        assert_eq!(countdown_label(now + Duration::seconds(150), now), "2 mins");
    }

    #[test]
    fn countdown_has_no_upper_cap() {
        let now = base_now();
        assert_eq!(
            countdown_label(now + Duration::minutes(1440), now),
            "1440 mins"
        );
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("Chelles", MAX_DESTINATION_CHARS), "Chelles");
        let exact = "a".repeat(MAX_DESTINATION_CHARS);
        assert_eq!(truncate(&exact, MAX_DESTINATION_CHARS), exact);
    }

    #[test]
    fn truncate_cuts_long_text_with_ellipsis() {
        let long = "a".repeat(30);
        let cut = truncate(&long, MAX_DESTINATION_CHARS);
        assert_eq!(cut.chars().count(), MAX_DESTINATION_CHARS);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        // 10 accented characters, each more than one byte.
        let text = "éøéøéøéøéø";
        assert_eq!(truncate(text, 10), text);
        assert_eq!(truncate(text, 5).chars().count(), 5);
    }

    #[test]
    fn truncate_degenerate_limits() {
        assert_eq!(truncate("abc", 1), "a");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn placeholders_fill_missing_fields() {
        let record = ArrivalRecord {
            expected_arrival: Some("2024-06-01T12:10:00+02:00".to_string()),
            ..Default::default()
        };
        let row = display_row(&resolved(record), base_now());
        assert_eq!(row[1], "10 mins");
        assert_eq!(row[2], "Unknown");
        assert_eq!(row[3], PLACEHOLDER);
        assert_eq!(row[4], PLACEHOLDER);
        assert_eq!(row[5], PLACEHOLDER);
    }

    #[test]
    fn last_column_shows_schedule_even_when_estimate_differs() {
        let record = ArrivalRecord {
            destination: Some("Gare de Bussy-St-Georges".to_string()),
            status: Some("delayed".to_string()),
            stops_to_destination: Some(4),
            expected_arrival: Some("2024-06-01T12:12:00+02:00".to_string()),
            aimed_arrival: Some("2024-06-01T12:05:00+02:00".to_string()),
        };
        let row = display_row(&resolved(record), base_now());
        let aimed = parse_arrival_time(Some("2024-06-01T12:05:00+02:00")).unwrap();
        assert_eq!(row[5], human_time(aimed));
        assert_ne!(row[5], row[0]);
        assert_eq!(row[3], "delayed");
        assert_eq!(row[4], "4");
    }

    #[test]
    fn clock_cells_are_hour_minute() {
        let record = ArrivalRecord {
            expected_arrival: Some("2024-06-01T12:10:00+02:00".to_string()),
            ..Default::default()
        };
        let row = display_row(&resolved(record), base_now());
        assert_eq!(row[0].len(), 5);
        assert_eq!(row[0].as_bytes()[2], b':');
    }

    #[test]
    fn rendered_lines_align() {
        let now = base_now();
        let rows: Vec<DisplayRow> = vec![
            display_row(
                &resolved(ArrivalRecord {
                    destination: Some("Gare de Bussy-St-Georges".to_string()),
                    status: Some("on time".to_string()),
                    stops_to_destination: Some(3),
                    expected_arrival: Some("2024-06-01T12:02:00+02:00".to_string()),
                    aimed_arrival: Some("2024-06-01T12:00:00+02:00".to_string()),
                }),
                now,
            ),
            display_row(
                &resolved(ArrivalRecord {
                    expected_arrival: Some("2024-06-01T12:20:00+02:00".to_string()),
                    ..Default::default()
                }),
                now,
            ),
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        // Separator segments never undershoot their header.
        let segments: Vec<&str> = lines[1].split("  ").collect();
        assert_eq!(segments.len(), COLUMNS);
        for (segment, header) in segments.iter().zip(HEADERS.iter()) {
            assert!(segment.chars().count() >= header.chars().count());
            assert!(segment.chars().all(|c| c == '-'));
        }
    }

    #[test]
    fn column_width_is_capped() {
        let record = ArrivalRecord {
            status: Some("s".repeat(60)),
            expected_arrival: Some("2024-06-01T12:10:00+02:00".to_string()),
            ..Default::default()
        };
        let table = render_table(&[display_row(&resolved(record), base_now())]);
        let separator = table.lines().nth(1).unwrap();
        let segments: Vec<&str> = separator.split("  ").collect();
        assert_eq!(segments[3].chars().count(), MAX_COLUMN_WIDTH);
        // The cell itself still carries its full text.
        assert!(table.lines().nth(2).unwrap().contains(&"s".repeat(60)));
    }
}
