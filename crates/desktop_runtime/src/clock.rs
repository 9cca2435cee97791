use chrono::{DateTime, TimeZone};

/// Menu-bar time, e.g. `9:05 AM`.
pub fn format_menu_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn twelve_hour_clock_without_leading_zero() {
        let tz = FixedOffset::east_opt(0).expect("offset");
        let at = |h, m| tz.with_ymd_and_hms(2024, 1, 1, h, m, 0).single().expect("time");
        assert_eq!(format_menu_time(&at(0, 5)), "12:05 AM");
        assert_eq!(format_menu_time(&at(9, 30)), "9:30 AM");
        assert_eq!(format_menu_time(&at(12, 0)), "12:00 PM");
        assert_eq!(format_menu_time(&at(23, 59)), "11:59 PM");
    }
}
