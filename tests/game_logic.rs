/// Integration tests for the simulation core
///
/// These tests verify formation movement, projectile flight, collision
/// resolution, scoring and the end-of-round conditions.
use glam::Vec2;
use swamp_protector::{Entity, Game};

const VIEWPORT: Vec2 = Vec2::new(800.0, 800.0);

/// Projectile dimensions, matching what `Game::fire` spawns.
const PROJECTILE_SIZE: Vec2 = Vec2::new(5.0, 15.0);

fn new_game() -> Game {
    Game::new(VIEWPORT)
}

#[test]
fn formation_spawns_six_by_ten_grid() {
    let game = new_game();

    assert_eq!(game.enemies.len(), 60);

    // First enemy of the top row: total grid width is 10 * 68 - 8 = 672,
    // centered in an 800-wide viewport.
    assert_eq!(game.enemies[0].position, Vec2::new(64.0, 50.0));
    assert_eq!(game.enemies[0].size, Vec2::new(60.0, 50.0));

    // Last column of the top row, 9 cells of 68 to the right.
    assert_eq!(game.enemies[9].position, Vec2::new(676.0, 50.0));

    // Bottom-right corner of the grid: 5 rows of 58 below the top row.
    assert_eq!(game.enemies[59].position, Vec2::new(676.0, 340.0));
}

#[test]
fn player_starts_bottom_center() {
    let game = new_game();
    assert_eq!(game.player.position, Vec2::new(400.0, 710.0));
    assert_eq!(game.player.size, Vec2::new(40.0, 40.0));
}

#[test]
fn reset_is_deterministic() {
    let mut game = new_game();
    let initial: Vec<Entity> = game.enemies.clone();

    // Disturb the session, then reset with the same viewport.
    for _ in 0..30 {
        game.fire();
        game.tick();
    }
    game.move_player(120.0);
    game.reset(VIEWPORT);

    assert_eq!(game.enemies, initial);
    assert_eq!(game.score, 0);
    assert!(game.projectiles.is_empty());
    assert!(!game.is_over());
    assert_eq!(game.direction(), 1.0);
    assert_eq!(game.player.position, Vec2::new(400.0, 710.0));
}

#[test]
fn tick_shifts_whole_formation_by_one_step() {
    let mut game = new_game();
    let before: Vec<Vec2> = game.enemies.iter().map(|e| e.position).collect();

    game.tick();

    assert_eq!(game.enemies.len(), before.len());
    for (enemy, old) in game.enemies.iter().zip(&before) {
        assert_eq!(enemy.position.x, old.x + 10.0);
        assert_eq!(enemy.position.y, old.y);
    }
    assert_eq!(game.score, 0);
    assert_eq!(game.direction(), 1.0);
}

#[test]
fn formation_flips_and_drops_on_right_edge_contact() {
    let mut game = new_game();

    // Rightmost enemy edge starts at 676 + 30 = 706 and needs to pass
    // 800 - 20 = 780: eight steps of 10.
    for _ in 0..7 {
        game.tick();
    }
    assert_eq!(game.direction(), 1.0);
    assert_eq!(game.enemies[0].position, Vec2::new(134.0, 50.0));

    game.tick();

    // Contact: direction flips once for the whole formation, every enemy
    // drops by 20 and is nudged 18 in the new direction.
    assert_eq!(game.direction(), -1.0);
    assert_eq!(game.enemies[0].position, Vec2::new(126.0, 70.0));
    assert_eq!(game.enemies[59].position, Vec2::new(738.0, 360.0));
}

#[test]
fn drop_happens_once_per_contact() {
    let mut game = new_game();
    for _ in 0..8 {
        game.tick();
    }
    let after_contact_y = game.enemies[0].position.y;

    // The compensation nudge moved the formation clear of the edge, so the
    // next tick marches left without another drop.
    game.tick();
    assert_eq!(game.direction(), -1.0);
    assert_eq!(game.enemies[0].position.y, after_contact_y);
    assert_eq!(game.enemies[0].position.x, 116.0);
}

#[test]
fn fire_spawns_projectile_above_player() {
    let mut game = new_game();
    game.fire();

    assert_eq!(game.projectiles.len(), 1);
    assert_eq!(game.projectiles[0].position, Vec2::new(400.0, 660.0));
    assert_eq!(game.projectiles[0].size, PROJECTILE_SIZE);
}

#[test]
fn firing_has_no_cooldown() {
    let mut game = new_game();
    game.fire();
    game.fire();
    game.fire();
    assert_eq!(game.projectiles.len(), 3);
}

#[test]
fn projectiles_rise_by_fixed_step() {
    let mut game = new_game();
    game.fire();

    // Far below the formation, so nothing collides yet.
    game.tick();
    assert_eq!(game.projectiles[0].position, Vec2::new(400.0, 655.0));
    game.tick();
    assert_eq!(game.projectiles[0].position, Vec2::new(400.0, 650.0));
}

#[test]
fn projectile_is_removed_past_the_top_edge() {
    let mut game = new_game();
    game.projectiles
        .push(Entity::new(Vec2::new(400.0, 4.0), PROJECTILE_SIZE));

    game.tick();

    assert!(game.projectiles.is_empty());
    assert_eq!(game.enemies.len(), 60);
    assert_eq!(game.score, 0);
}

#[test]
fn projectile_at_enemy_center_destroys_it() {
    let mut game = new_game();
    // After one tick the first enemy sits at (74, 50); a projectile placed
    // at (74, 55) moves up by 5 and lands exactly on that center.
    game.projectiles
        .push(Entity::new(Vec2::new(74.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    assert_eq!(game.enemies.len(), 59);
    assert!(game.projectiles.is_empty());
    assert_eq!(game.score, 10);
}

#[test]
fn projectile_outside_half_extents_misses() {
    let mut game = new_game();
    // Lands at (105, 50): one unit beyond the first enemy's right edge at
    // 74 + 30 = 104, and short of the next enemy's left edge at 112.
    game.projectiles
        .push(Entity::new(Vec2::new(105.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    assert_eq!(game.enemies.len(), 60);
    assert_eq!(game.projectiles.len(), 1);
    assert_eq!(game.score, 0);
}

#[test]
fn projectile_exactly_on_half_extent_misses() {
    let mut game = new_game();
    // Lands at (104, 50), exactly on the right edge; the overlap test is a
    // strict inequality on all four sides.
    game.projectiles
        .push(Entity::new(Vec2::new(104.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    assert_eq!(game.enemies.len(), 60);
    assert_eq!(game.projectiles.len(), 1);
    assert_eq!(game.score, 0);
}

#[test]
fn enemy_hit_by_two_projectiles_scores_once() {
    let mut game = new_game();
    game.projectiles
        .push(Entity::new(Vec2::new(74.0, 55.0), PROJECTILE_SIZE));
    game.projectiles
        .push(Entity::new(Vec2::new(74.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    // One enemy destroyed, one kill scored, both projectiles consumed.
    assert_eq!(game.enemies.len(), 59);
    assert!(game.projectiles.is_empty());
    assert_eq!(game.score, 10);
}

#[test]
fn projectile_overlapping_two_enemies_removes_both() {
    let mut game = new_game();
    // A second enemy stacked on the first one.
    game.enemies
        .push(Entity::new(Vec2::new(64.0, 50.0), Vec2::new(60.0, 50.0)));
    game.projectiles
        .push(Entity::new(Vec2::new(74.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    assert_eq!(game.enemies.len(), 59);
    assert!(game.projectiles.is_empty());
    assert_eq!(game.score, 20);
}

#[test]
fn game_ends_when_formation_reaches_the_invasion_line() {
    let mut game = new_game();
    game.enemies[0].position.y = 700.0;

    game.tick();
    assert!(game.is_over());

    // Further ticks must not disturb the final state.
    let enemies = game.enemies.clone();
    let score = game.score;
    game.tick();
    assert_eq!(game.enemies, enemies);
    assert_eq!(game.score, score);
}

#[test]
fn game_ends_when_the_last_enemy_dies() {
    let mut game = new_game();
    game.enemies.truncate(1);
    game.projectiles
        .push(Entity::new(Vec2::new(74.0, 55.0), PROJECTILE_SIZE));

    game.tick();

    assert!(game.enemies.is_empty());
    assert!(game.is_over());
    assert_eq!(game.score, 10);
}

#[test]
fn player_movement_is_clamped_to_margins() {
    let mut game = new_game();

    game.move_player(-10_000.0);
    assert_eq!(game.player.position.x, 30.0);

    game.move_player(10_000.0);
    assert_eq!(game.player.position.x, 770.0);

    // Horizontal only.
    assert_eq!(game.player.position.y, 710.0);
}

#[test]
fn viewport_change_repositions_player() {
    let mut game = new_game();
    game.move_player(200.0);

    game.set_viewport(Vec2::new(400.0, 800.0));

    assert_eq!(game.player.position, Vec2::new(200.0, 710.0));
    assert_eq!(game.viewport(), Vec2::new(400.0, 800.0));
}
