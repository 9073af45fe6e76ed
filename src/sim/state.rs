//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::timer::{Scheduler, TimerHandle, TimerTask};

/// Lifecycle of a single run. `Over` is terminal; a new run gets a fresh
/// `GameState`, never a resurrected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Over,
}

/// The player's shape, constrained to a horizontal line near the bottom edge
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity, one of {-PLAYER_SPEED, 0, +PLAYER_SPEED}
    pub vel_x: f32,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0, PLAYER_START_Y),
            vel_x: 0.0,
            alive: true,
        }
    }
}

impl Player {
    /// Recompute velocity from held input. Left wins if both are held.
    /// No-op once dead.
    pub fn update(&mut self, left: bool, right: bool) {
        if !self.alive {
            return;
        }
        self.vel_x = if left {
            -PLAYER_SPEED
        } else if right {
            PLAYER_SPEED
        } else {
            0.0
        };
    }

    /// Latch the dead state and freeze. Idempotent; `alive` never flips back
    /// within a run.
    pub fn die(&mut self) {
        self.alive = false;
        self.vel_x = 0.0;
    }

    /// Integrate horizontal motion, keeping the whole sprite inside the world
    pub fn integrate(&mut self, dt: f32) {
        let half = PLAYER_WIDTH / 2.0;
        self.pos.x = (self.pos.x + self.vel_x * dt).clamp(half, GAME_WIDTH - half);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// A falling obstacle. Velocity is a snapshot of the global obstacle speed at
/// spawn time; obstacles already in flight never speed up retroactively.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel_y: f32,
}

impl Obstacle {
    pub fn spawn(x: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, SPAWN_Y),
            vel_y: speed,
        }
    }

    /// True once the obstacle has fallen past the bottom edge by the margin.
    /// Pure query; y only grows, so this is monotone over the lifetime.
    pub fn is_off_screen(&self) -> bool {
        self.pos.y > GAME_HEIGHT + OFFSCREEN_MARGIN
    }

    /// Freeze in place (game-over field freeze); does not remove the entity
    pub fn stop(&mut self) {
        self.vel_y = 0.0;
    }

    pub fn integrate(&mut self, dt: f32) {
        self.pos.y += self.vel_y * dt;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT))
    }
}

/// Complete state of one run (deterministic given seed and inputs)
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub status: RunStatus,
    /// Monotone non-decreasing within a run
    pub score: u32,
    /// Speed given to newly spawned obstacles; monotone non-decreasing
    pub obstacle_speed: f32,
    /// Spawn timer cadence; monotone non-increasing, floored at the minimum
    pub spawn_interval_ms: u32,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// The one active spawn timer, if any. Cancelled before every reschedule
    /// so at most one is ever live.
    pub(crate) spawn_timer: Option<TimerHandle>,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: RunStatus::Running,
            score: 0,
            obstacle_speed: OBSTACLE_SPEED_START,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            player: Player::default(),
            obstacles: Vec::new(),
            spawn_timer: None,
        }
    }

    /// Arm the spawn timers for a freshly created run: the repeating cadence
    /// plus one early spawn so the field isn't empty at the start.
    ///
    /// The caller must have cleared any timers left over from a previous run.
    pub fn start(&mut self, timers: &mut Scheduler) {
        debug_assert!(self.spawn_timer.is_none());
        self.spawn_timer =
            Some(timers.schedule_repeating(self.spawn_interval_ms, TimerTask::SpawnObstacle));
        timers.schedule_once(FIRST_SPAWN_DELAY_MS, TimerTask::SpawnObstacle);
        log::info!("run started (seed {})", self.seed);
    }

    /// Spawn one obstacle at a random x, with the current speed snapshot.
    /// Defensive no-op once the run is over (a stale timer must not mutate a
    /// finished run).
    pub fn spawn_obstacle(&mut self) {
        if self.status != RunStatus::Running {
            return;
        }
        let x = self
            .rng
            .random_range(SPAWN_PADDING..=GAME_WIDTH - SPAWN_PADDING);
        self.obstacles.push(Obstacle::spawn(x, self.obstacle_speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_to_velocity() {
        let mut player = Player::default();

        player.update(true, false);
        assert_eq!(player.vel_x, -PLAYER_SPEED);
        player.update(false, true);
        assert_eq!(player.vel_x, PLAYER_SPEED);
        player.update(false, false);
        assert_eq!(player.vel_x, 0.0);
        // Left takes precedence when both are held
        player.update(true, true);
        assert_eq!(player.vel_x, -PLAYER_SPEED);
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut player = Player::default();
        player.die();
        assert!(!player.alive);
        assert_eq!(player.vel_x, 0.0);

        player.update(true, false);
        assert_eq!(player.vel_x, 0.0);

        // die() is idempotent
        player.die();
        assert!(!player.alive);
    }

    #[test]
    fn test_player_clamps_to_world() {
        let mut player = Player::default();
        player.update(true, false);
        for _ in 0..2000 {
            player.integrate(SIM_DT);
        }
        assert_eq!(player.pos.x, PLAYER_WIDTH / 2.0);
        assert!(player.aabb().min.x >= 0.0);

        player.update(false, true);
        for _ in 0..2000 {
            player.integrate(SIM_DT);
        }
        assert_eq!(player.pos.x, GAME_WIDTH - PLAYER_WIDTH / 2.0);
        assert!(player.aabb().max.x <= GAME_WIDTH);
    }

    #[test]
    fn test_obstacle_speed_is_snapshot() {
        let mut state = GameState::new(7);
        state.spawn_obstacle();
        state.obstacle_speed += SPEED_INCREASE_AMOUNT;
        state.spawn_obstacle();

        assert_eq!(state.obstacles[0].vel_y, OBSTACLE_SPEED_START);
        assert_eq!(
            state.obstacles[1].vel_y,
            OBSTACLE_SPEED_START + SPEED_INCREASE_AMOUNT
        );
    }

    #[test]
    fn test_spawn_x_within_padding() {
        let mut state = GameState::new(42);
        for _ in 0..200 {
            state.spawn_obstacle();
        }
        for obstacle in &state.obstacles {
            assert!(obstacle.pos.x >= SPAWN_PADDING);
            assert!(obstacle.pos.x <= GAME_WIDTH - SPAWN_PADDING);
            assert_eq!(obstacle.pos.y, SPAWN_Y);
        }
    }

    #[test]
    fn test_spawn_is_noop_after_game_over() {
        let mut state = GameState::new(1);
        state.status = RunStatus::Over;
        state.spawn_obstacle();
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_off_screen_is_monotone() {
        let mut obstacle = Obstacle::spawn(100.0, OBSTACLE_SPEED_START);
        assert!(!obstacle.is_off_screen());

        let mut seen_off_screen = false;
        for _ in 0..1000 {
            obstacle.integrate(SIM_DT);
            if seen_off_screen {
                assert!(obstacle.is_off_screen());
            }
            seen_off_screen = obstacle.is_off_screen();
        }
        assert!(seen_off_screen);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        for _ in 0..50 {
            a.spawn_obstacle();
            b.spawn_obstacle();
        }
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos, ob.pos);
        }
    }
}
