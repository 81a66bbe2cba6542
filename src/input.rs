use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::Screen;

/// Semantic game actions produced from raw terminal events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    /// Leave the menu and start a round.
    Start,
    /// Show or hide the backstory popup on the menu.
    ToggleStory,
    ToggleMute,
    Pause,
    Resume,
    /// Start a fresh round from the game-over screen.
    Restart,
    /// Return to the start menu from the game-over screen.
    ToMenu,
    /// Terminal lost focus (the app went to the background).
    Suspend,
    /// Terminal regained focus.
    FocusBack,
    Quit,
}

/// Keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Polls terminal events and translates them into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Drain all pending terminal events and record one-shot actions.
    /// Call once per frame before `actions`.
    pub fn poll_events(&mut self, screen: &Screen) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, screen),
                Event::FocusLost => self.oneshot_actions.push(InputAction::Suspend),
                Event::FocusGained => self.oneshot_actions.push(InputAction::FocusBack),
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every draw.
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// All actions for this frame: one-shots first, then continuous actions
    /// derived from held keys. Must be called after `poll_events`.
    pub fn actions(&self, screen: &Screen) -> Vec<InputAction> {
        let mut actions = Vec::new();
        actions.extend_from_slice(&self.oneshot_actions);

        if *screen == Screen::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, screen: &Screen) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, screen),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, screen: &Screen) {
        // Ctrl-C quits from any screen.
        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Mute is available everywhere except the game-over screen, which
        // has no music playing.
        if matches!(key_event.code, KeyCode::Char('m') | KeyCode::Char('M'))
            && *screen != Screen::GameOver
        {
            self.oneshot_actions.push(InputAction::ToggleMute);
            return;
        }

        match screen {
            Screen::Menu => match key_event.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.oneshot_actions.push(InputAction::Start);
                }
                KeyCode::Char('b') | KeyCode::Char('B') => {
                    self.oneshot_actions.push(InputAction::ToggleStory);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::Quit);
                }
                _ => {}
            },
            Screen::Playing => match key_event.code {
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.oneshot_actions.push(InputAction::Pause);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::Quit);
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.key_state.left = true;
                    self.key_state.right = false;
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.key_state.right = true;
                    self.key_state.left = false;
                }
                KeyCode::Char(' ') => {
                    self.key_state.fire = true;
                }
                _ => {}
            },
            Screen::Paused => match key_event.code {
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.oneshot_actions.push(InputAction::Resume);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::Quit);
                }
                _ => {}
            },
            Screen::GameOver => match key_event.code {
                KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.oneshot_actions.push(InputAction::Restart);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.oneshot_actions.push(InputAction::ToMenu);
                }
                _ => {}
            },
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.key_state.left = false;
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }
}
