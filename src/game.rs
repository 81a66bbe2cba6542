use std::collections::BTreeSet;
use std::time::Duration;

use glam::Vec2;

use crate::entities::Entity;

/// Simulation tick period (~60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

const FORMATION_ROWS: usize = 6;
const FORMATION_COLS: usize = 10;
/// Vertical world position of the first formation row.
const FORMATION_TOP: f32 = 50.0;
const ENEMY_SIZE: Vec2 = Vec2::new(60.0, 50.0);
const ENEMY_SPACING: f32 = 8.0;
/// Horizontal distance the formation covers per tick.
const FORMATION_STEP: f32 = 10.0;
/// Vertical distance the formation drops on edge contact.
const FORMATION_DROP: f32 = 20.0;
/// Horizontal nudge applied with the drop so the formation clears the edge
/// instead of re-triggering the boundary check next tick.
const DROP_NUDGE: f32 = 18.0;
/// Safety distance between the formation edge and the viewport edge.
const EDGE_MARGIN: f32 = 20.0;

const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
/// Horizontal clamp margin for the player center.
const PLAYER_MARGIN: f32 = 30.0;
/// Distance between the bottom of the viewport and the player center.
const PLAYER_BOTTOM_OFFSET: f32 = 90.0;

const PROJECTILE_SIZE: Vec2 = Vec2::new(5.0, 15.0);
const PROJECTILE_SPEED: f32 = 5.0;
/// Projectiles spawn this far above the player center.
const MUZZLE_OFFSET: f32 = 50.0;

/// Enemies past `viewport.y - INVASION_LINE_OFFSET` end the game.
const INVASION_LINE_OFFSET: f32 = 160.0;
const POINTS_PER_KILL: u32 = 10;

/// The simulation core: entity lists, formation movement, projectile flight,
/// collision resolution, scoring and termination. All mutations happen inside
/// `tick` or the input-facing methods; there is no internal threading.
pub struct Game {
    pub player: Entity,
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Entity>,
    pub score: u32,
    /// Shared horizontal direction sign of the formation (+1 right, -1 left).
    direction: f32,
    game_over: bool,
    viewport: Vec2,
}

impl Game {
    pub fn new(viewport: Vec2) -> Self {
        let mut game = Self {
            player: Entity::new(Vec2::ZERO, PLAYER_SIZE),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            direction: 1.0,
            game_over: false,
            viewport,
        };
        game.reset(viewport);
        game
    }

    /// Start a fresh round. The formation layout is deterministic for a
    /// given viewport; the player entity is repositioned, not recreated.
    pub fn reset(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.projectiles.clear();
        self.score = 0;
        self.game_over = false;
        self.direction = 1.0;
        self.reposition_player();
        self.spawn_formation();
    }

    /// Adopt a new viewport size mid-session and put the player back at the
    /// bottom-center anchor.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.reposition_player();
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Advance the simulation by one fixed step. Does nothing once the game
    /// is over, so a stale scheduled tick cannot disturb the final state.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        self.advance_formation();
        self.advance_projectiles();
        self.resolve_collisions();
        self.check_over();
    }

    /// Shift the player horizontally, clamped to the playable band.
    pub fn move_player(&mut self, delta_x: f32) {
        let x = self.player.position.x + delta_x;
        self.player.position.x = x.clamp(PLAYER_MARGIN, self.viewport.x - PLAYER_MARGIN);
    }

    /// Spawn one projectile above the player.
    pub fn fire(&mut self) {
        let muzzle = Vec2::new(
            self.player.position.x,
            self.player.position.y - MUZZLE_OFFSET,
        );
        self.projectiles.push(Entity::new(muzzle, PROJECTILE_SIZE));
    }

    fn reposition_player(&mut self) {
        self.player.position = Vec2::new(
            self.viewport.x / 2.0,
            self.viewport.y - PLAYER_BOTTOM_OFFSET,
        );
    }

    /// Rebuild the enemy grid: FORMATION_ROWS x FORMATION_COLS, fixed cell
    /// size and spacing, horizontally centered, top row near the top edge.
    fn spawn_formation(&mut self) {
        self.enemies.clear();
        let cell = ENEMY_SIZE.x + ENEMY_SPACING;
        let total_width = FORMATION_COLS as f32 * cell - ENEMY_SPACING;
        let start_x = (self.viewport.x - total_width) / 2.0;
        for row in 0..FORMATION_ROWS {
            for col in 0..FORMATION_COLS {
                let position = Vec2::new(
                    start_x + col as f32 * cell,
                    row as f32 * (ENEMY_SIZE.y + ENEMY_SPACING) + FORMATION_TOP,
                );
                self.enemies.push(Entity::new(position, ENEMY_SIZE));
            }
        }
    }

    /// March every enemy by one step in the shared direction, then check the
    /// formation edges against the viewport margins. Edge contact flips the
    /// direction once for the whole formation and triggers a single drop.
    fn advance_formation(&mut self) {
        for enemy in &mut self.enemies {
            enemy.position.x += FORMATION_STEP * self.direction;
        }

        if self.enemies.is_empty() {
            return;
        }
        let right_edge = self.enemies.iter().map(Entity::right).fold(f32::MIN, f32::max);
        let left_edge = self.enemies.iter().map(Entity::left).fold(f32::MAX, f32::min);

        if right_edge > self.viewport.x - EDGE_MARGIN {
            self.direction = -1.0;
            self.drop_formation();
        } else if left_edge < EDGE_MARGIN {
            self.direction = 1.0;
            self.drop_formation();
        }
    }

    fn drop_formation(&mut self) {
        for enemy in &mut self.enemies {
            enemy.position.y += FORMATION_DROP;
            enemy.position.x += DROP_NUDGE * self.direction;
        }
    }

    /// Fly projectiles upward and cull the ones that left the viewport, so
    /// nothing lingers above the top edge.
    fn advance_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.position.y -= PROJECTILE_SPEED;
        }
        self.projectiles.retain(|p| p.position.y > 0.0);
    }

    /// Pairwise projectile-vs-enemy overlap test. Hits are collected into
    /// ordered index sets first and removed highest-index-first afterwards,
    /// so an entity overlapping several counterparts in the same tick is
    /// removed exactly once and an enemy is scored exactly once.
    fn resolve_collisions(&mut self) {
        let mut hit_projectiles: BTreeSet<usize> = BTreeSet::new();
        let mut hit_enemies: BTreeSet<usize> = BTreeSet::new();

        for (p_idx, projectile) in self.projectiles.iter().enumerate() {
            for (e_idx, enemy) in self.enemies.iter().enumerate() {
                if enemy.contains(projectile.position) {
                    hit_projectiles.insert(p_idx);
                    if hit_enemies.insert(e_idx) {
                        self.score += POINTS_PER_KILL;
                    }
                }
            }
        }

        for &e_idx in hit_enemies.iter().rev() {
            self.enemies.remove(e_idx);
        }
        for &p_idx in hit_projectiles.iter().rev() {
            self.projectiles.remove(p_idx);
        }
    }

    /// The round ends when the formation reaches the invasion line near the
    /// bottom, or when the last enemy has been destroyed.
    fn check_over(&mut self) {
        let invasion_line = self.viewport.y - INVASION_LINE_OFFSET;
        let reached_bottom = self.enemies.iter().any(|e| e.position.y > invasion_line);
        if reached_bottom || self.enemies.is_empty() {
            self.game_over = true;
        }
    }
}
