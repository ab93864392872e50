use std::path::PathBuf;

use weekplan_core::App;

pub fn run(out: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;
    match out {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            app.export_week_csv(file)?;
            println!("wrote {}", path.display());
        }
        None => app.export_week_csv(std::io::stdout().lock())?,
    }
    Ok(())
}
