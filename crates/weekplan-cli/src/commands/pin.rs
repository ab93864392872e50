use clap::Subcommand;
use weekplan_core::App;

#[derive(Subcommand)]
pub enum PinAction {
    /// Add a one-shot reminder
    Add {
        /// Reminder text
        title: String,
        /// When to fire, YYYY-MM-DD HH:MM local time
        #[arg(long)]
        at: String,
    },
    /// Print all pending pins as JSON
    List,
    /// Remove a pin before it fires
    Remove { id: String },
}

pub fn run(action: PinAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open()?;
    match action {
        PinAction::Add { title, at } => {
            let remind_at = super::parse_datetime(&at)?;
            let pin = app.add_pin(&title, remind_at)?;
            println!("{}", serde_json::to_string_pretty(&pin)?);
        }
        PinAction::List => {
            let pins: Vec<_> = app.pins.iter().collect();
            println!("{}", serde_json::to_string_pretty(&pins)?);
        }
        PinAction::Remove { id } => {
            if app.remove_pin(&id) {
                println!("ok");
            } else {
                eprintln!("unknown pin: {id}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
