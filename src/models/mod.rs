// Backend entity records. The backend owns these shapes; the client only
// imposes what the UI needs: dual identity fields (`id` / `_id`), optional
// timestamps and display formatting.

pub mod checklist;
pub mod post;
pub mod progress;
pub mod project;
pub mod user;

pub use checklist::{Checklist, ChecklistItem};
pub use post::Post;
pub use progress::{
    ProgressItem, ProgressStatistics, ProjectProgress, RoleCount, RoleProgress, RoleProgressDetail,
};
pub use project::Project;
pub use user::User;

use chrono::{DateTime, Datelike, Timelike, Utc};

// Swedish short month names, matching sv-SE locale output.
const MONTHS_SHORT: [&str; 12] = [
    "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.", "dec.",
];

/// Format a timestamp as Swedish short date with time, e.g. "5 aug. 2025 14:30".
/// Missing timestamps render as "-".
pub fn format_datetime(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => format!(
            "{} {} {} {:02}:{:02}",
            t.day(),
            MONTHS_SHORT[t.month0() as usize],
            t.year(),
            t.hour(),
            t.minute()
        ),
        None => "-".to_string(),
    }
}

/// Date-only variant, e.g. "5 aug. 2025".
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => format!("{} {} {}", t.day(), MONTHS_SHORT[t.month0() as usize], t.year()),
        None => "-".to_string(),
    }
}

/// Pick the first present identity field.
pub(crate) fn identity<'a>(id: &'a Option<String>, alt_id: &'a Option<String>) -> Option<&'a str> {
    id.as_deref().or(alt_id.as_deref())
}

/// True when either identity field equals `candidate`.
pub(crate) fn matches_identity(id: &Option<String>, alt_id: &Option<String>, candidate: &str) -> bool {
    id.as_deref() == Some(candidate) || alt_id.as_deref() == Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_swedish_datetime() {
        let ts = Utc.with_ymd_and_hms(2025, 8, 5, 14, 30, 0).unwrap();
        assert_eq!(format_datetime(Some(ts)), "5 aug. 2025 14:30");
        assert_eq!(format_date(Some(ts)), "5 aug. 2025");
    }

    #[test]
    fn missing_timestamp_renders_dash() {
        assert_eq!(format_datetime(None), "-");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn month_without_trailing_dot() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 8, 5, 0).unwrap();
        assert_eq!(format_datetime(Some(ts)), "1 mars 2025 08:05");
    }
}
