//! Timetable grid renderer.
//!
//! A pure projection from the slot store to a day-by-hour view model.
//! The view-binding layer (CLI table, GUI, ...) renders the model and
//! dispatches per-card actions by slot id, so card actions never go
//! through whatever selection behavior the enclosing cell has.

use chrono::{NaiveDate, Timelike};

use crate::model::StudySlot;
use crate::storage::GridConfig;
use crate::store::SlotStore;
use crate::week::{week_dates, week_label, DAY_NAMES};

/// One slot rendered inside a grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCard {
    pub id: String,
    pub subject: String,
    /// Start time and duration, e.g. `"14:00 (60m)"`.
    pub time_label: String,
    pub done: bool,
}

impl SlotCard {
    fn from_slot(slot: &StudySlot) -> Self {
        Self {
            id: slot.id.clone(),
            subject: slot.subject.clone(),
            time_label: format!("{} ({}m)", slot.start.format("%H:%M"), slot.duration),
            done: slot.done,
        }
    }
}

/// Column header: the concrete date of one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub name: &'static str,
}

/// One hour row crossed with the seven days.
#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub hour: u32,
    /// `"06:00"` style row label.
    pub label: String,
    pub cells: [Vec<SlotCard>; 7],
}

/// The rendered week: label, day headers, hour rows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub offset: i32,
    pub label: String,
    pub days: [DayHeader; 7],
    pub rows: Vec<HourRow>,
}

/// Project the store onto the week at `offset` from the week containing
/// `today`. Slots keep their insertion order within a cell.
pub fn build(slots: &SlotStore, today: NaiveDate, offset: i32, cfg: &GridConfig) -> WeekGrid {
    let dates = week_dates(today, offset);
    let key = dates[0];
    let current_key = week_dates(today, 0)[0];
    let week_slots = slots.slots_for_week(key, current_key);

    let label = if offset == 0 {
        "This week".to_string()
    } else {
        week_label(&dates)
    };
    let days = std::array::from_fn(|i| DayHeader {
        date: dates[i],
        name: DAY_NAMES[i],
    });

    let rows = (cfg.start_hour..=cfg.end_hour)
        .map(|hour| {
            let mut cells: [Vec<SlotCard>; 7] = Default::default();
            for slot in &week_slots {
                if slot.start.hour() == hour {
                    if let Some(cell) = cells.get_mut(slot.day as usize) {
                        cell.push(SlotCard::from_slot(slot));
                    }
                }
            }
            HourRow {
                hour,
                label: format!("{hour:02}:00"),
                cells,
            }
        })
        .collect();

    WeekGrid {
        offset,
        label,
        days,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGateway;
    use chrono::NaiveTime;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2026-03-04 is a Wednesday; its week starts Sunday 2026-03-01.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn grid_covers_configured_hours() {
        let store = SlotStore::default();
        let grid = build(&store, today(), 0, &GridConfig::default());
        assert_eq!(grid.label, "This week");
        assert_eq!(grid.rows.len(), 14);
        assert_eq!(grid.rows[0].hour, 6);
        assert_eq!(grid.rows[0].label, "06:00");
        assert_eq!(grid.rows[13].hour, 19);
        assert_eq!(grid.days[0].name, "Sun");
        assert_eq!(grid.days[0].date, week());
    }

    #[test]
    fn slot_lands_in_its_day_and_hour_cell() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        store.create(&gw, 1, hm(14, 0), 60, "Algebra", week()).unwrap();

        let grid = build(&store, today(), 0, &GridConfig::default());
        let row = grid.rows.iter().find(|r| r.hour == 14).unwrap();
        assert_eq!(row.cells[1].len(), 1);
        let card = &row.cells[1][0];
        assert_eq!(card.subject, "Algebra");
        assert_eq!(card.time_label, "14:00 (60m)");
        assert!(!card.done);

        // Every other cell in the grid stays empty.
        let total: usize = grid
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.len())
            .sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn overlapping_slots_stack_in_insertion_order() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        store.create(&gw, 3, hm(9, 0), 30, "First", week()).unwrap();
        store.create(&gw, 3, hm(9, 30), 30, "Second", week()).unwrap();

        let grid = build(&store, today(), 0, &GridConfig::default());
        let row = grid.rows.iter().find(|r| r.hour == 9).unwrap();
        let subjects: Vec<&str> = row.cells[3].iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["First", "Second"]);
    }

    #[test]
    fn other_weeks_render_empty_with_range_label() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        store.create(&gw, 1, hm(14, 0), 60, "Algebra", week()).unwrap();

        let grid = build(&store, today(), 1, &GridConfig::default());
        assert_eq!(grid.label, "Mar 8 – 14, 2026");
        let total: usize = grid
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.len())
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn done_state_shows_on_the_card() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        let slot = store.create(&gw, 1, hm(14, 0), 60, "Algebra", week()).unwrap();
        store.toggle_done(&gw, &slot.id);

        let grid = build(&store, today(), 0, &GridConfig::default());
        let row = grid.rows.iter().find(|r| r.hour == 14).unwrap();
        assert!(row.cells[1][0].done);
    }
}
