use color_eyre::Result;
use glam::Vec2;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::game::{Game, TICK_INTERVAL};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// Fixed logical world size; the renderer scales it onto the terminal.
const WORLD_SIZE: Vec2 = Vec2::new(800.0, 800.0);
/// Horizontal world distance the player covers per frame of held movement.
const PLAYER_SPEED: f32 = 8.0;

/// Which screen the shell is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// The application shell: owns the simulation, relays input into it and
/// feeds its state to the renderer and the audio manager.
pub struct App {
    running: bool,
    screen: Screen,
    game: Game,
    /// Backstory popup visibility on the menu screen.
    show_story: bool,
    /// Frame counter, drives background animation only.
    frame_count: u64,
    /// Wall-clock time not yet converted into simulation ticks.
    tick_budget: Duration,
    last_update: Instant,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Menu,
            game: Game::new(WORLD_SIZE),
            show_story: false,
            frame_count: 0,
            tick_budget: Duration::ZERO,
            last_update: Instant::now(),
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        self.audio_manager.play_menu_music();

        while self.running {
            self.frame_count += 1;

            terminal.draw(|frame| {
                let view = RenderView {
                    screen: self.screen,
                    player: &self.game.player,
                    enemies: &self.game.enemies,
                    projectiles: &self.game.projectiles,
                    score: self.game.score,
                    muted: self.audio_manager.is_muted(),
                    show_story: self.show_story,
                    world: self.game.viewport(),
                    frame_count: self.frame_count,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(&self.screen)?;
            let actions = self.input_manager.actions(&self.screen);
            self.process_actions(&actions);

            self.advance_simulation();

            // Cap CPU usage; the tick accumulator keeps simulation speed
            // independent of the render rate.
            std::thread::sleep(Duration::from_millis(4));
        }
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start | InputAction::Restart => {
                    self.audio_manager.play_click();
                    self.show_story = false;
                    self.start_round();
                }
                InputAction::ToggleStory => {
                    self.audio_manager.play_click();
                    self.show_story = !self.show_story;
                }
                InputAction::ToggleMute => {
                    self.audio_manager.toggle_mute();
                }
                InputAction::Pause => {
                    self.screen = Screen::Paused;
                    self.audio_manager.pause_music();
                }
                InputAction::Resume => {
                    self.screen = Screen::Playing;
                    self.audio_manager.resume_music();
                }
                InputAction::MoveLeft => {
                    self.game.move_player(-PLAYER_SPEED);
                }
                InputAction::MoveRight => {
                    self.game.move_player(PLAYER_SPEED);
                }
                InputAction::Fire => {
                    // TODO: add a fire cooldown; a held key currently spawns
                    // one projectile per frame.
                    self.game.fire();
                }
                InputAction::ToMenu => {
                    self.audio_manager.play_click();
                    self.screen = Screen::Menu;
                    self.audio_manager.play_menu_music();
                }
                InputAction::Suspend => {
                    // Backgrounding pauses the music only; the simulation
                    // keeps its own pace.
                    self.audio_manager.pause_music();
                }
                InputAction::FocusBack => {
                    if self.screen != Screen::GameOver {
                        self.audio_manager.resume_music();
                    }
                }
            }
        }
    }

    fn start_round(&mut self) {
        self.game.reset(WORLD_SIZE);
        self.screen = Screen::Playing;
        self.audio_manager.play_game_music();
        self.tick_budget = Duration::ZERO;
        self.last_update = Instant::now();
    }

    /// Convert elapsed wall-clock time into whole simulation ticks. Ticks
    /// only run on the playing screen; elsewhere the budget is discarded so
    /// no burst of stale ticks fires after a pause or a reset.
    fn advance_simulation(&mut self) {
        let now = Instant::now();
        let elapsed = now - self.last_update;
        self.last_update = now;

        if self.screen != Screen::Playing {
            self.tick_budget = Duration::ZERO;
            return;
        }

        self.tick_budget += elapsed;
        while self.tick_budget >= TICK_INTERVAL {
            self.tick_budget -= TICK_INTERVAL;
            self.game.tick();

            if self.game.is_over() {
                self.audio_manager.stop_music();
                self.screen = Screen::GameOver;
                self.tick_budget = Duration::ZERO;
                break;
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
