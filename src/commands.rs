//! Desktop commands for frontend communication

use std::sync::Mutex;

use tauri::State;

use crate::race_server::{RaceConfig, RaceController, RaceSnapshot, RoundResults};

/// Generate a fresh horse pool
#[tauri::command]
pub fn generate_horses(controller: State<'_, Mutex<RaceController>>) -> Result<(), String> {
    let mut controller = controller.lock().map_err(|e| e.to_string())?;
    controller.generate_horses().map_err(|e| e.to_string())
}

/// Draw the round schedule from the current pool
#[tauri::command]
pub fn generate_schedule(controller: State<'_, Mutex<RaceController>>) -> Result<(), String> {
    let mut controller = controller.lock().map_err(|e| e.to_string())?;
    controller.generate_schedule().map_err(|e| e.to_string())
}

/// Start running the scheduled rounds
#[tauri::command]
pub fn start_race(controller: State<'_, Mutex<RaceController>>) -> Result<(), String> {
    let mut controller = controller.lock().map_err(|e| e.to_string())?;
    controller.start_race().map_err(|e| e.to_string())
}

/// Reset to idle state
#[tauri::command]
pub fn reset_race(controller: State<'_, Mutex<RaceController>>) -> Result<(), String> {
    let mut controller = controller.lock().map_err(|e| e.to_string())?;
    controller.reset_race();
    Ok(())
}

/// Advance round sequencing and return the current state
#[tauri::command]
pub fn tick(controller: State<'_, Mutex<RaceController>>) -> Result<RaceSnapshot, String> {
    let mut controller = controller.lock().map_err(|e| e.to_string())?;
    Ok(controller.tick())
}

/// Get current race snapshot without advancing
#[tauri::command]
pub fn get_snapshot(controller: State<'_, Mutex<RaceController>>) -> Result<RaceSnapshot, String> {
    let controller = controller.lock().map_err(|e| e.to_string())?;
    Ok(controller.get_snapshot())
}

/// Get standings of every completed round
#[tauri::command]
pub fn get_results(controller: State<'_, Mutex<RaceController>>) -> Result<RoundResults, String> {
    let controller = controller.lock().map_err(|e| e.to_string())?;
    Ok(controller.get_results().clone())
}

/// Get the fixed race rules
#[tauri::command]
pub fn get_config(controller: State<'_, Mutex<RaceController>>) -> Result<RaceConfig, String> {
    let controller = controller.lock().map_err(|e| e.to_string())?;
    Ok(controller.config().clone())
}
