//! Fixed timestep simulation tick
//!
//! Advances one run deterministically: player movement, obstacle sweep,
//! scoring, difficulty escalation, and the terminal game-over transition.

use super::state::{GameState, RunStatus};
use crate::consts::*;
use crate::timer::{Scheduler, TimerTask};

/// Held input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Left held (ArrowLeft / A)
    pub left: bool,
    /// Right held (ArrowRight / D)
    pub right: bool,
}

/// Terminal event reported to the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The game-over delay elapsed; the shell should display and persist
    RunEnded { score: u32 },
}

/// Advance the game state by one fixed timestep.
///
/// No-op once the run is over, even if the host keeps calling it.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, timers: &mut Scheduler) {
    if state.status != RunStatus::Running {
        return;
    }

    // Player update happens-before the obstacle sweep
    state.player.update(input.left, input.right);
    state.player.integrate(dt);

    for obstacle in &mut state.obstacles {
        obstacle.integrate(dt);
    }

    // Reverse spawn order so in-place removal never skips or double-visits.
    // Each obstacle hits exactly one branch: dodged or collided.
    let player_box = state.player.aabb();
    for i in (0..state.obstacles.len()).rev() {
        if state.obstacles[i].is_off_screen() {
            state.obstacles.remove(i);
            state.score += POINTS_PER_DODGE;
            check_difficulty_increase(state, timers);
        } else if state.obstacles[i].aabb().overlaps(&player_box) {
            game_over(state, timers);
            break;
        }
    }
}

/// Route a due timer task into the simulation.
///
/// Returns the event the shell must act on, if any. Stale tasks from timers
/// that outlived their run resolve to no-ops.
pub fn handle_timer(state: &mut GameState, task: TimerTask) -> Option<GameEvent> {
    match task {
        TimerTask::SpawnObstacle => {
            state.spawn_obstacle();
            None
        }
        TimerTask::ReportGameOver => {
            if state.status == RunStatus::Over {
                Some(GameEvent::RunEnded { score: state.score })
            } else {
                None
            }
        }
    }
}

/// Escalate difficulty on every 100-point boundary, evaluated against the
/// post-increment score. POINTS_PER_DODGE divides the interval, so every 10th
/// dodge triggers exactly one escalation.
fn check_difficulty_increase(state: &mut GameState, timers: &mut Scheduler) {
    if state.score == 0 || state.score % DIFFICULTY_INCREASE_INTERVAL != 0 {
        return;
    }

    state.obstacle_speed += SPEED_INCREASE_AMOUNT;

    if state.spawn_interval_ms > SPAWN_INTERVAL_MIN_MS {
        state.spawn_interval_ms =
            (state.spawn_interval_ms - SPAWN_RATE_DECREASE_MS).max(SPAWN_INTERVAL_MIN_MS);

        // Replace the spawn timer at the new cadence; cancel first so at most
        // one is ever active.
        if let Some(handle) = state.spawn_timer.take() {
            timers.cancel(handle);
        }
        state.spawn_timer =
            Some(timers.schedule_repeating(state.spawn_interval_ms, TimerTask::SpawnObstacle));
    }

    log::debug!(
        "difficulty up: score {} speed {} interval {}ms",
        state.score,
        state.obstacle_speed,
        state.spawn_interval_ms
    );
}

/// Terminal transition: freeze the field and defer the score report
fn game_over(state: &mut GameState, timers: &mut Scheduler) {
    state.status = RunStatus::Over;
    state.player.die();

    if let Some(handle) = state.spawn_timer.take() {
        timers.cancel(handle);
    }

    // Freeze, don't destroy; the field stays visible until run teardown
    for obstacle in &mut state.obstacles {
        obstacle.stop();
    }

    timers.schedule_once(GAME_OVER_REPORT_DELAY_MS, TimerTask::ReportGameOver);
    log::info!("game over at score {}", state.score);
}
