//! Terminal rendering for notes.

use crate::config::defaults::PREVIEW_LEN;
use chrono::{DateTime, NaiveDateTime, Utc};
use colored::Colorize;
use jot_types::Note;

/// Timestamp layout produced by SQLite's `datetime('now')`
const STORE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ELLIPSIS: char = '…';

/// One line per note: right-aligned id, padded preview, dimmed age
pub fn render_list(notes: &[Note], now: DateTime<Utc>) -> String {
    if notes.is_empty() {
        return "no notes yet\n".to_string();
    }

    let id_width = notes.iter().map(|n| n.id.to_string().len()).max().unwrap_or(1);

    let mut out = String::new();
    for note in notes {
        out.push_str(&format!(
            "  {:>width$}  {:<pad$}  {}\n",
            note.id,
            preview(&note.body),
            dim(&format_age(&note.created_at, now)),
            width = id_width,
            pad = PREVIEW_LEN,
        ));
    }
    out
}

/// Header line, blank line, then the full body
pub fn render_note(note: &Note, now: DateTime<Utc>) -> String {
    format!(
        "{}  {}\n\n{}\n",
        dim(&format!("#{}", note.id)),
        dim(&format_age(&note.created_at, now)),
        note.body
    )
}

/// Bodies longer than the preview width are cut so that, with the trailing
/// ellipsis, they are exactly `PREVIEW_LEN` characters.
pub fn preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_LEN {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(PREVIEW_LEN - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

pub fn dim(s: &str) -> String {
    s.dimmed().to_string()
}

/// Human age of a store timestamp relative to `now`. Timestamps that do not
/// parse are returned as-is.
pub fn format_age(created_at: &str, now: DateTime<Utc>) -> String {
    let Ok(created) = NaiveDateTime::parse_from_str(created_at, STORE_TIME_FORMAT) else {
        return created_at.to_string();
    };
    let created = created.and_utc();
    let secs = (now - created).num_seconds();

    if secs < 60 {
        return "just now".to_string();
    }
    if secs < 3600 {
        return plural(secs / 60, "min");
    }
    if secs < 86_400 {
        return plural(secs / 3600, "hr");
    }

    match secs / 86_400 {
        1 => "yesterday".to_string(),
        days if days < 30 => plural(days, "day"),
        _ => created.format("%b %-d").to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {} ago", n, unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).format(STORE_TIME_FORMAT).to_string()
    }

    fn note(id: i64, body: &str) -> Note {
        Note {
            id,
            body: body.to_string(),
            created_at: ago(Duration::minutes(5)),
        }
    }

    #[test]
    fn test_age_buckets() {
        assert_eq!(format_age(&ago(Duration::seconds(45)), now()), "just now");
        assert_eq!(format_age(&ago(Duration::seconds(90)), now()), "1 min ago");
        assert_eq!(format_age(&ago(Duration::minutes(2)), now()), "2 mins ago");
        assert_eq!(format_age(&ago(Duration::minutes(61)), now()), "1 hr ago");
        assert_eq!(format_age(&ago(Duration::hours(23)), now()), "23 hrs ago");
        assert_eq!(format_age(&ago(Duration::hours(24)), now()), "yesterday");
        assert_eq!(format_age(&ago(Duration::hours(25)), now()), "yesterday");
        assert_eq!(format_age(&ago(Duration::days(2)), now()), "2 days ago");
        assert_eq!(format_age(&ago(Duration::days(29)), now()), "29 days ago");
        assert_eq!(format_age("2026-01-02 08:00:00", now()), "Jan 2");
    }

    #[test]
    fn test_future_and_unparseable_ages() {
        let future = (now() + Duration::hours(3)).format(STORE_TIME_FORMAT).to_string();
        assert_eq!(format_age(&future, now()), "just now");
        assert_eq!(format_age("yesterday-ish", now()), "yesterday-ish");
    }

    #[test]
    fn test_preview_is_exactly_the_limit() {
        for len in [PREVIEW_LEN + 1, PREVIEW_LEN + 5, 500] {
            let body = "é".repeat(len);
            let p = preview(&body);
            assert_eq!(p.chars().count(), PREVIEW_LEN);
            assert!(p.ends_with(ELLIPSIS));
            assert_eq!(p.matches(ELLIPSIS).count(), 1);
        }
    }

    #[test]
    fn test_preview_keeps_short_bodies() {
        let exact = "x".repeat(PREVIEW_LEN);
        assert_eq!(preview(&exact), exact);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_render_list_aligns_ids() {
        let out = render_list(&[note(100, "big"), note(7, "small")], now());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  100  big"));
        assert!(lines[1].starts_with("    7  small"));
        assert!(lines[1].contains("5 mins ago"));
    }

    #[test]
    fn test_render_list_truncates_long_bodies() {
        let long = "a".repeat(200);
        let out = render_list(&[note(1, &long)], now());
        let expected = format!("  1  {}{}", "a".repeat(PREVIEW_LEN - 1), ELLIPSIS);
        assert!(out.starts_with(&expected));
        assert!(!out.contains(&"a".repeat(PREVIEW_LEN)));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&[], now()), "no notes yet\n");
    }

    #[test]
    fn test_render_note_shows_full_body() {
        let body = "line one\nline two ".repeat(20);
        let out = render_note(&note(9, &body), now());
        assert!(out.contains("#9"));
        assert!(out.contains("5 mins ago"));
        assert!(out.ends_with(&format!("\n\n{}\n", body)));
    }
}
