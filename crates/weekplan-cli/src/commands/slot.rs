use clap::Subcommand;
use weekplan_core::store::SlotPatch;
use weekplan_core::App;

#[derive(Subcommand)]
pub enum SlotAction {
    /// Add a slot to the week being viewed
    Add {
        /// Day of week, 0 = Sunday .. 6 = Saturday
        #[arg(long)]
        day: u8,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Subject shown on the card
        subject: String,
    },
    /// Edit fields of an existing slot
    Edit {
        id: String,
        #[arg(long)]
        day: Option<u8>,
        /// Start time, HH:MM
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Delete a slot
    Del { id: String },
    /// Toggle a slot's done flag
    Done { id: String },
    /// Print the viewed week's slots as JSON
    List,
}

pub fn run(action: SlotAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open()?;
    match action {
        SlotAction::Add {
            day,
            start,
            duration,
            subject,
        } => {
            let start = super::parse_time(&start)?;
            let slot = app.add_slot(day, start, duration, &subject)?;
            println!("{}", serde_json::to_string_pretty(&slot)?);
        }
        SlotAction::Edit {
            id,
            day,
            start,
            duration,
            subject,
        } => {
            let start = start.as_deref().map(super::parse_time).transpose()?;
            let patch = SlotPatch {
                day,
                start,
                duration,
                subject,
                week_start: None,
            };
            if app.update_slot(&id, patch)? {
                println!("ok");
            } else {
                eprintln!("unknown slot: {id}");
                std::process::exit(1);
            }
        }
        SlotAction::Del { id } => {
            if app.delete_slot(&id) {
                println!("ok");
            } else {
                eprintln!("unknown slot: {id}");
                std::process::exit(1);
            }
        }
        SlotAction::Done { id } => match app.toggle_done(&id) {
            Some(true) => println!("done"),
            Some(false) => println!("not done"),
            None => {
                eprintln!("unknown slot: {id}");
                std::process::exit(1);
            }
        },
        SlotAction::List => {
            println!("{}", serde_json::to_string_pretty(&app.viewed_slots())?);
        }
    }
    Ok(())
}
