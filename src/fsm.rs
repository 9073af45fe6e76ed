//! App state machine
//!
//! Owns the screen-level flow: main menu, an active run, and the game-over
//! screen. The simulation only ever implements the inside of `Running`.

/// Top-level app states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    MainMenu,
    Running,
    GameOver,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Confirm on the menu screen
    Start,
    /// The sim reported its final score
    RunEnded,
    /// Confirm on the game-over screen
    PlayAgain,
    /// Back out to the menu
    ToMenu,
}

/// App finite state machine
#[derive(Debug)]
pub struct AppFsm {
    phase: AppPhase,
}

impl Default for AppFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl AppFsm {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::MainMenu,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == AppPhase::Running
    }

    /// Check if a transition is valid without applying it
    pub fn can_transition(&self, action: AppAction) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition; returns false and stays put if invalid
    pub fn transition(&mut self, action: AppAction) -> bool {
        match self.next_phase(action) {
            Some(next) => {
                log::debug!("app {:?} -> {:?} on {:?}", self.phase, next, action);
                self.phase = next;
                true
            }
            None => false,
        }
    }

    fn next_phase(&self, action: AppAction) -> Option<AppPhase> {
        match (self.phase, action) {
            (AppPhase::MainMenu, AppAction::Start) => Some(AppPhase::Running),
            (AppPhase::Running, AppAction::RunEnded) => Some(AppPhase::GameOver),
            (AppPhase::GameOver, AppAction::PlayAgain) => Some(AppPhase::Running),
            (AppPhase::GameOver, AppAction::ToMenu) => Some(AppPhase::MainMenu),
            _ => None,
        }
    }
}
