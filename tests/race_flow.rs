use std::collections::HashSet;
use std::time::{Duration, Instant};

use horse_race_lib::race_server::config::{
    HORSES_PER_ROUND, MAX_CONDITION, MIN_CONDITION, RACE_DURATION_MS, ROUND_DISTANCES,
    TOTAL_HORSES, TOTAL_ROUNDS,
};
use horse_race_lib::race_server::{RaceController, RaceSnapshot, RaceStatus};

const ROUND: Duration = Duration::from_millis(RACE_DURATION_MS);

#[test]
fn full_race_runs_six_rounds_in_order() {
    let mut controller = RaceController::with_seed(2024);
    controller.generate_horses().unwrap();

    let pool = controller.store().horses().to_vec();
    assert_eq!(pool.len(), TOTAL_HORSES);
    let ids: HashSet<u32> = pool.iter().map(|h| h.id).collect();
    assert_eq!(ids, (1..=TOTAL_HORSES as u32).collect::<HashSet<u32>>());
    let colors: HashSet<&str> = pool.iter().map(|h| h.color.as_str()).collect();
    assert_eq!(colors.len(), TOTAL_HORSES);
    assert!(pool
        .iter()
        .all(|h| (MIN_CONDITION..=MAX_CONDITION).contains(&h.condition)));

    controller.generate_schedule().unwrap();
    let distances: Vec<u32> = controller
        .store()
        .schedule()
        .iter()
        .map(|r| r.distance)
        .collect();
    assert_eq!(distances, ROUND_DISTANCES.to_vec());

    let t0 = Instant::now();
    controller.start_race_at(t0).unwrap();

    for completed in 1..=TOTAL_ROUNDS {
        let at = t0 + ROUND * completed as u32;
        let snapshot = controller.tick_at(at);

        assert_eq!(snapshot.results.len(), completed);
        assert_eq!(snapshot.current_round_index, completed);
        let standings = &snapshot.results[&(completed as u32)];
        assert_eq!(standings.len(), HORSES_PER_ROUND);

        if completed < TOTAL_ROUNDS {
            assert_eq!(snapshot.status, RaceStatus::BetweenRounds);
            assert!(!snapshot.is_race_finished);
            assert_eq!(
                snapshot.current_round.as_ref().map(|r| r.id),
                Some(completed as u32 + 1)
            );
            assert_eq!(snapshot.round_remaining_ms, Some(RACE_DURATION_MS));
        } else {
            assert_eq!(snapshot.status, RaceStatus::Finished);
            assert!(snapshot.is_race_finished);
            assert!(snapshot.current_round.is_none());
            assert_eq!(snapshot.round_remaining_ms, None);
        }
    }

    assert!(!controller.is_round_pending());
    assert!(controller.store().round_winner(6).is_some());
}

#[test]
fn finished_race_can_be_rescheduled() {
    let mut controller = RaceController::with_seed(8);
    controller.generate_horses().unwrap();
    controller.generate_schedule().unwrap();

    let t0 = Instant::now();
    controller.start_race_at(t0).unwrap();
    for completed in 1..=TOTAL_ROUNDS {
        controller.tick_at(t0 + ROUND * completed as u32);
    }
    assert_eq!(controller.store().status(), RaceStatus::Finished);

    controller.generate_schedule().unwrap();
    let store = controller.store();
    assert_eq!(store.status(), RaceStatus::Generated);
    assert_eq!(store.current_round_index(), 0);
    assert!(store.results().is_empty());
    assert_eq!(store.horses().len(), TOTAL_HORSES);
}

#[test]
fn restart_after_reset_ignores_old_timer() {
    let mut controller = RaceController::with_seed(31);
    controller.generate_horses().unwrap();
    controller.generate_schedule().unwrap();

    let t0 = Instant::now();
    controller.start_race_at(t0).unwrap();
    controller.reset_race();

    controller.generate_horses().unwrap();
    controller.generate_schedule().unwrap();
    let t1 = t0 + Duration::from_millis(1000);
    controller.start_race_at(t1).unwrap();

    // The first race's round would have been due here
    let snapshot = controller.tick_at(t0 + ROUND);
    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.status, RaceStatus::Running);

    let snapshot = controller.tick_at(t1 + ROUND);
    assert_eq!(snapshot.results.len(), 1);
}

#[test]
fn wrong_state_operations_leave_state_alone() {
    let mut controller = RaceController::with_seed(4);

    assert!(controller.start_race().is_err());
    assert!(controller.generate_schedule().is_err());
    assert_eq!(controller.store().status(), RaceStatus::Idle);

    controller.generate_horses().unwrap();
    controller.generate_schedule().unwrap();
    controller.store_mut().set_status(RaceStatus::Running);
    let before = controller.get_snapshot();

    assert!(controller.start_race().is_err());
    assert!(controller.generate_horses().is_err());
    assert!(controller.generate_schedule().is_err());

    let after = controller.get_snapshot();
    assert_eq!(after.schedule.len(), TOTAL_ROUNDS);
    assert_eq!(after, before);
}

#[test]
fn snapshot_serializes_for_frontend() {
    let mut controller = RaceController::with_seed(12);
    controller.generate_horses().unwrap();
    controller.generate_schedule().unwrap();
    let t0 = Instant::now();
    controller.start_race_at(t0).unwrap();
    let snapshot = controller.tick_at(t0 + ROUND);

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["status"], "between_rounds");
    assert_eq!(value["current_round_index"], 1);
    let first = &value["results"]["1"][0];
    assert!(first["performance"].is_number());
    assert!(first["name"].is_string());

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: RaceSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.results.len(), 1);
}
