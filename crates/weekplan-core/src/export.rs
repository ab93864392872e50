//! CSV export of one week's timetable.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::model::StudySlot;
use crate::week::DAY_NAMES;

/// Write the given week's slots as CSV.
///
/// One row per slot, in store order, resolved against the week's
/// concrete dates.
pub fn write_week_csv<W: Write>(
    writer: W,
    slots: &[&StudySlot],
    dates: &[NaiveDate; 7],
) -> Result<(), CoreError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Day", "Date", "Start", "Duration (min)", "Subject", "Done"])?;
    for slot in slots {
        let date = dates[slot.day as usize % 7];
        csv.write_record([
            DAY_NAMES[slot.day as usize % 7],
            &date.format("%Y-%m-%d").to_string(),
            &slot.start.format("%H:%M").to_string(),
            &slot.duration.to_string(),
            &slot.subject,
            if slot.done { "Yes" } else { "No" },
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::new_id;
    use crate::week::week_dates;
    use chrono::NaiveTime;

    #[test]
    fn exports_header_and_rows() {
        let dates = week_dates(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(), 0);
        let slot = StudySlot {
            id: new_id(),
            day: 1,
            start: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            duration: 60,
            subject: "Algebra, advanced".to_string(),
            done: true,
            week_start: Some(dates[0]),
        };

        let mut out = Vec::new();
        write_week_csv(&mut out, &[&slot], &dates).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Day,Date,Start,Duration (min),Subject,Done"
        );
        // The comma in the subject forces quoting.
        assert_eq!(
            lines.next().unwrap(),
            "Mon,2026-03-02,14:00,60,\"Algebra, advanced\",Yes"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_week_exports_header_only() {
        let dates = week_dates(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(), 0);
        let mut out = Vec::new();
        write_week_csv(&mut out, &[], &dates).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
