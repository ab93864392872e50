use clap::Subcommand;
use weekplan_core::storage::Config;
use weekplan_core::App;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Control the notification opt-in
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
    /// Print the full configuration as TOML
    Show,
    /// Reset the configuration file to defaults
    Reset,
}

#[derive(Subcommand)]
pub enum NotificationsAction {
    /// Enable reminders, requesting platform permission if needed
    On,
    /// Disable reminders
    Off,
    /// Print the current opt-in state
    Status,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Notifications { action } => {
            let mut app = App::open()?;
            let enabled = match action {
                NotificationsAction::On => {
                    if app.settings.notifications_enabled() {
                        true
                    } else {
                        app.toggle_notifications()
                    }
                }
                NotificationsAction::Off => {
                    if app.settings.notifications_enabled() {
                        app.toggle_notifications()
                    } else {
                        false
                    }
                }
                NotificationsAction::Status => app.settings.notifications_enabled(),
            };
            println!("{}", if enabled { "on" } else { "off" });
        }
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
