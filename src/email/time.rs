use chrono::{NaiveDateTime, Timelike};

/// Format a session deadline for display, e.g. `Mon, 01 Jan 2024, 11:59 PM`.
///
/// Exactly midday is written as `12:00 NOON`.
pub fn format_deadline(end_time: NaiveDateTime) -> String {
    if end_time.hour() == 12 && end_time.minute() == 0 {
        return format!("{} NOON", end_time.format("%a, %d %b %Y, %I:%M"));
    }

    end_time.format("%a, %d %b %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_evening_deadline() {
        assert_eq!(format_deadline(at(23, 59)), "Mon, 01 Jan 2024, 11:59 PM");
    }

    #[test]
    fn test_morning_deadline() {
        assert_eq!(format_deadline(at(9, 5)), "Mon, 01 Jan 2024, 09:05 AM");
    }

    #[test]
    fn test_noon_deadline() {
        assert_eq!(format_deadline(at(12, 0)), "Mon, 01 Jan 2024, 12:00 NOON");
        assert_eq!(format_deadline(at(12, 30)), "Mon, 01 Jan 2024, 12:30 PM");
    }

    #[test]
    fn test_midnight_deadline() {
        assert_eq!(format_deadline(at(0, 0)), "Mon, 01 Jan 2024, 12:00 AM");
    }
}
