//! Horse Race - Backend
//!
//! Multi-round horse race engine: pool generation, per-round scoring and
//! the race state machine. The `desktop` feature adds Tauri commands for
//! frontend communication.

pub mod race_server;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use race_server::RaceController;
    use std::sync::Mutex;

    tauri::Builder::default()
        .manage(Mutex::new(RaceController::new()))
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("Horse race server initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::generate_horses,
            commands::generate_schedule,
            commands::start_race,
            commands::reset_race,
            commands::tick,
            commands::get_snapshot,
            commands::get_results,
            commands::get_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
