use std::fmt::Write;

use clap::Subcommand;
use weekplan_core::{App, WeekGrid};

#[derive(Subcommand)]
pub enum WeekAction {
    /// Print the viewed week's timetable
    Show,
    /// Move the view one week forward
    Next,
    /// Move the view one week back
    Prev,
}

/// Day-by-day listing of the grid. Empty hours are skipped; cards keep
/// their stacking order within an hour.
fn render(grid: &WeekGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.label);
    for (day, header) in grid.days.iter().enumerate() {
        let _ = writeln!(out, "{} {}", header.name, header.date.format("%Y-%m-%d"));
        for row in &grid.rows {
            for card in &row.cells[day] {
                let mark = if card.done { "x" } else { " " };
                let _ = writeln!(
                    out,
                    "  [{mark}] {}  {}  ({})",
                    card.time_label, card.subject, card.id
                );
            }
        }
    }
    out
}

pub fn run(action: WeekAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open()?;
    match action {
        WeekAction::Show => print!("{}", render(&app.grid())),
        WeekAction::Next => {
            app.next_week();
            println!("{}", app.grid().label);
        }
        WeekAction::Prev => {
            app.prev_week();
            println!("{}", app.grid().label);
        }
    }
    Ok(())
}
