use weekplan_core::App;

/// Foreground reminder loop: pin polls, study-now polls and the timer
/// tick, all on one current-thread runtime until Ctrl-C.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::open()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (stop, watch_rx) = tokio::sync::watch::channel(false);
        tokio::select! {
            _ = app.run(watch_rx) => {}
            _ = tokio::signal::ctrl_c() => {
                let _ = stop.send(true);
            }
        }
    });

    println!("stopped");
    Ok(())
}
