//! Terminal output utilities: table rendering, ANSI formatting, review
//! formatting, stream writing.

use std::io::Write;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Wrap `s` in a style when color is enabled.
pub fn styled(style: &str, s: &str) -> String {
    if supports_color() {
        format!("{style}{s}{RESET}")
    } else {
        s.to_string()
    }
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

/// Print a formatted WARNING note.
pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

/// Print a formatted ERROR note.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Column alignment.
pub enum Align { Left, Right }

/// A table column definition.
pub struct Column {
    pub header: String,
    pub align: Align,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left, max_width: None }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right, max_width: None }
    }
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Render a table with given columns and rows. Cells wider than a column's
/// `max_width` are truncated with an ellipsis.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let num_cols = columns.len();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..num_cols)
                .map(|i| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    match columns[i].max_width {
                        Some(max) => truncate(cell, max),
                        None => cell.to_string(),
                    }
                })
                .collect()
        })
        .collect();

    // Compute column widths.
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_width(&c.header)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(visible_width(cell));
        }
    }

    let mut out = String::new();

    // Header.
    let header_cells: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad_cell(&col.header, widths[i], &col.align))
        .collect();
    out.push_str(&styled(BOLD, &format!("  {}  ", header_cells.join("  "))));
    out.push('\n');

    // Separator.
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}  \n", sep.join("  ")));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad_cell(cell, widths[i], &columns[i].align))
            .collect();
        out.push_str(&format!("  {}  \n", cells.join("  ")));
    }

    out
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = width.saturating_sub(visible_width(s));
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

// ---------------------------------------------------------------------------
// Review formatting
// ---------------------------------------------------------------------------

/// Five-slot star bar, e.g. `★★★★☆` for 4.
pub fn star_bar(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// `Mar 7, 2024`
pub fn format_review_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `4.3 / 5 (12 reviews)`
pub fn format_rating_header(average: f64, count: usize) -> String {
    let noun = if count == 1 { "review" } else { "reviews" };
    format!("{average:.1} / 5 ({count} {noun})")
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

// ---------------------------------------------------------------------------
// Streaming writer
// ---------------------------------------------------------------------------

/// Write chunks to a buffered writer, flushing after each.
pub fn stream_write(writer: &mut impl Write, chunk: &str) -> std::io::Result<()> {
    writer.write_all(chunk.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn strips_ansi() {
        let colored = format!("{YELLOW}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_table_and_truncates() {
        let cols = vec![
            Column::right("ID"),
            Column::left("Name").max_width(8),
            Column::right("Price"),
        ];
        let rows = vec![
            vec!["1".to_string(), "Kettle".to_string(), "$29.99".to_string()],
            vec!["2".to_string(), "Espresso Machine".to_string(), "$399.00".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        assert!(table.contains("Kettle"));
        assert!(table.contains("Espress…"));
        assert!(!table.contains("Espresso Machine"));
        assert!(table.contains(" $29.99"));
    }

    #[test]
    fn widths_count_characters_not_bytes() {
        let cols = vec![Column::left("Name"), Column::left("X")];
        let rows = vec![vec!["Café".to_string(), "y".to_string()]];
        let table = strip_ansi(&render_table(&cols, &rows));
        let line = table.lines().nth(2).unwrap();
        assert_eq!(line, "  Café  y  ");
    }

    #[test]
    fn stars_clamp_to_five() {
        assert_eq!(star_bar(4), "★★★★☆");
        assert_eq!(star_bar(0), "☆☆☆☆☆");
        assert_eq!(star_bar(9), "★★★★★");
    }

    #[test]
    fn formats_dates_without_padding() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 15, 4, 0).unwrap();
        assert_eq!(format_review_date(&date), "Mar 7, 2024");
    }

    #[test]
    fn rating_header_rounds_to_one_decimal() {
        assert_eq!(format_rating_header(13.0 / 3.0, 3), "4.3 / 5 (3 reviews)");
        assert_eq!(format_rating_header(5.0, 1), "5.0 / 5 (1 review)");
    }

    #[test]
    fn stream_write_appends() {
        let mut buf = Vec::new();
        stream_write(&mut buf, "Great ").unwrap();
        stream_write(&mut buf, "kettle").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Great kettle");
    }
}
