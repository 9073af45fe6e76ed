//! Obstacle Dodge - a vertical-dodge arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, difficulty)
//! - `timer`: Scheduler capability for spawn cadence and delayed callbacks
//! - `fsm`: Top-level app state machine (menu / running / game over)
//! - `highscore`: Persistent high score port (LocalStorage on web)

pub mod fsm;
pub mod highscore;
pub mod sim;
pub mod timer;

pub use fsm::{AppAction, AppFsm, AppPhase};
pub use highscore::HighScoreStore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth movement)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const GAME_WIDTH: f32 = 400.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Player rides a fixed horizontal line near the bottom edge
    pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 50.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_SPEED_START: f32 = 200.0;
    /// Spawn x keeps this margin from both side edges
    pub const SPAWN_PADDING: f32 = 20.0;
    /// Obstacles materialize just above the visible top edge
    pub const SPAWN_Y: f32 = -20.0;
    /// An obstacle counts as dodged once it is this far past the bottom edge
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Spawn cadence
    pub const SPAWN_INTERVAL_START_MS: u32 = 1500;
    pub const SPAWN_INTERVAL_MIN_MS: u32 = 500;
    /// One-shot spawn shortly after run start so the field isn't empty
    pub const FIRST_SPAWN_DELAY_MS: u32 = 500;

    /// Difficulty progression
    pub const DIFFICULTY_INCREASE_INTERVAL: u32 = 100;
    pub const SPEED_INCREASE_AMOUNT: f32 = 20.0;
    pub const SPAWN_RATE_DECREASE_MS: u32 = 100;

    /// Scoring
    pub const POINTS_PER_DODGE: u32 = 10;
    /// Delay between the fatal collision and reporting the final score
    pub const GAME_OVER_REPORT_DELAY_MS: u32 = 1000;
}
