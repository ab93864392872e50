use clap::Subcommand;
use weekplan_core::storage::{keys, Database, Gateway};
use weekplan_core::{Clock, FocusTimer, SystemClock};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown (resumes if paused)
    Start {
        /// Countdown length in minutes; defaults to 25
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Stop and rearm at the configured duration
    Reset,
    /// Print the current timer state as JSON
    Status,
}

fn load_timer(db: &Database) -> FocusTimer {
    if let Ok(Some(json)) = db.get(keys::TIMER) {
        if let Ok(timer) = serde_json::from_str::<FocusTimer>(&json) {
            return timer;
        }
    }
    FocusTimer::default()
}

fn save_timer(db: &Database, timer: &FocusTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.set(keys::TIMER, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut timer = load_timer(&db);
    let now = SystemClock.now();

    match action {
        TimerAction::Start { minutes } => {
            if let Some(minutes) = minutes {
                timer.set_duration(minutes.max(1).saturating_mul(60));
            }
            if let Some(event) = timer.start(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{} remaining", timer.display());
            }
        }
        TimerAction::Pause => match timer.pause(now) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("timer is not running"),
        },
        TimerAction::Resume => match timer.resume(now) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("timer is not paused"),
        },
        TimerAction::Reset => {
            let event = timer.reset(now);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Status => {
            // Tick first so the displayed remainder is current.
            let finished = timer.tick(now);
            println!("{}", serde_json::to_string_pretty(&timer)?);
            if let Some(event) = finished {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    save_timer(&db, &timer)?;
    Ok(())
}
