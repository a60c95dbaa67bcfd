//! Sandrun headless runner
//!
//! Plays the reference route with the autopilot and logs what happens.
//!
//! Usage: `sandrun [seed] [tuning.json] [progress-file]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sandrun::consts::SIM_DT;
    use sandrun::sim::{Driver, GameEvent, RouteData, autopilot};
    use sandrun::{FileStore, MemoryStore, ProgressStore, Tuning};

    /// Simulated length of a headless run (seconds)
    const RUN_SECONDS: u32 = 180;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed ({}), using 0", e);
            0
        }
        None => 0,
    };
    let tuning = args
        .next()
        .map(|path| Tuning::load_or_default(path))
        .unwrap_or_default();
    let store: Box<dyn ProgressStore> = match args.next() {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    log::info!("Sandrun (headless) starting with seed {}", seed);
    let route = RouteData::reference(seed);
    let mut driver = Driver::new(route, tuning, store);
    if driver.has_saved_progress() {
        driver.continue_run();
    } else {
        driver.start_new_run();
    }

    let mut respawns = 0u32;
    let mut coins = 0u32;
    for _ in 0..RUN_SECONDS * 60 {
        let input = autopilot(driver.session(), driver.route());
        driver.set_input(input);
        driver.frame(SIM_DT);

        for event in driver.drain_events() {
            match event {
                GameEvent::CheckpointReached(_) => log::info!("{}", driver.progress_label()),
                GameEvent::CoinCollected(id) => {
                    coins += 1;
                    log::info!("Coin {} collected", id);
                }
                GameEvent::Respawned => respawns += 1,
                GameEvent::Jumped => {}
                other => log::debug!("{:?}", other),
            }
        }
    }

    println!("\n{} after {}s", driver.progress_label(), RUN_SECONDS);
    println!("Coins: {}  Respawns: {}", coins, respawns);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser build links the library directly; nothing to run here
}
