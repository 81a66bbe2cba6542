use glam::Vec2;
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::Screen;
use crate::entities::Entity;

/// The erosion poison flower, petals up.
const PLAYER_SPRITE: [&str; 3] = [" \\|/ ", "-(@)-", " | | "];
/// The swamp python, seen head-on.
const ENEMY_SPRITE: [&str; 2] = ["/~o~\\", "\\_v_/"];
const PROJECTILE_CHAR: char = '*';

/// Scores at or above this earn the better game-over banner.
const EXCELLENT_SCORE: u32 = 500;

const STORY: &str = "In the foggy and gloomy swamp, the ferocious swamp python \
threatens the fragile ecosystem. The Erosion Poison Flower is the last line of \
defense. When the python nears, its petals shoot out with corrosive mucus and \
hallucinogenic toxins. As the player, you'll manipulate the power of the flower \
to repel the python and safeguard the swamp.";

/// Snapshot of everything the renderer needs for one frame
pub struct RenderView<'a> {
    pub screen: Screen,
    pub player: &'a Entity,
    pub enemies: &'a [Entity],
    pub projectiles: &'a [Entity],
    pub score: u32,
    pub muted: bool,
    pub show_story: bool,
    /// Logical world size the entity coordinates live in.
    pub world: Vec2,
    pub frame_count: u64,
    pub area: Rect,
}

impl RenderView<'_> {
    /// Map a world position to a terminal cell, relative to the frame area.
    /// Returns signed coordinates; callers clip against the area themselves.
    fn project(&self, position: Vec2) -> (i32, i32) {
        let x = position.x / self.world.x * f32::from(self.area.width);
        let y = position.y / self.world.y * f32::from(self.area.height);
        (x as i32, y as i32)
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method, dispatches on the current screen.
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.screen {
            Screen::Menu => self.render_menu(frame, view),
            Screen::Playing => self.render_game(frame, view),
            Screen::Paused => self.render_paused(frame, view),
            Screen::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        self.render_fireflies(frame, view);

        // Player sprite, centered on the projected position
        self.render_sprite(frame, view, view.player, &PLAYER_SPRITE, Color::Green);

        // Enemy sprites
        for enemy in view.enemies {
            self.render_sprite(frame, view, enemy, &ENEMY_SPRITE, Color::Red);
        }

        // Projectiles as single cells, written straight into the buffer
        let buffer = frame.buffer_mut();
        for projectile in view.projectiles {
            let (x, y) = view.project(projectile.position);
            if x >= 0 && y >= 0 && (x as u16) < area.width && (y as u16) < area.height {
                buffer.set_string(
                    area.x + x as u16,
                    area.y + y as u16,
                    PROJECTILE_CHAR.to_string(),
                    Style::default().fg(Color::LightMagenta),
                );
            }
        }

        // Stats overlay at the top
        let sound_label = if view.muted { "muted" } else { "sound on" };
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Pythons: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.enemies.len()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Audio: ", Style::default().fg(Color::DarkGray)),
            Span::styled(sound_label, Style::default().fg(Color::White)),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [M: Mute] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the start menu, with the optional backstory popup
    fn render_menu(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        self.render_fireflies(frame, view);

        let sound_label = if view.muted { "[M] Unmute" } else { "[M] Mute" };
        let menu_text = vec![
            Line::from(""),
            Line::from(""),
            Line::from("SWAMP PROTECTOR").centered().green().bold(),
            Line::from(""),
            Line::from("Are you ready to battle the swamp python?")
                .centered()
                .white(),
            Line::from(""),
            Line::from(""),
            Line::from("[Enter] Let's go!").centered().yellow().bold(),
            Line::from(""),
            Line::from("[B] Game background").centered().white(),
            Line::from(sound_label).centered().white(),
            Line::from("[Q] Quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(menu_text).alignment(Alignment::Center),
            area,
        );

        if view.show_story {
            self.render_story(frame, area);
        }
    }

    /// Backstory popup over the menu
    fn render_story(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(10).min(60).max(20);
        let height = 12.min(area.height);
        let story_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let story = Paragraph::new(STORY)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Green))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" The Swamp ")
                    .title_bottom(" [B] Close ")
                    .border_style(Style::default().fg(Color::Green)),
            );

        frame.render_widget(ratatui::widgets::Clear, story_area);
        frame.render_widget(story, story_area);
    }

    /// Renders the pause overlay on top of the frozen game screen
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: area.width.saturating_sub(30) / 2,
            y: area.height.saturating_sub(6) / 2,
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(ratatui::widgets::Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let banner = if view.score >= EXCELLENT_SCORE {
            Line::from("EXCELLENT!").centered().green().bold()
        } else {
            Line::from("KEEP IT UP!").centered().yellow().bold()
        };

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME  OVER         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            banner,
            Line::from(""),
            Line::from(format!("Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("[Enter] Continue").centered().white(),
            Line::from("[Q] Back to the swamp gate").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }

    /// Blinking firefly backdrop, the swampy take on a starfield
    fn render_fireflies(&self, frame: &mut Frame, view: &RenderView) {
        if view.frame_count % 10 < 5 {
            let field = (0..view.area.height)
                .map(|_| {
                    let mut rng = rand::rng();
                    if rng.random_bool(0.04) { "." } else { " " }
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(field).style(Style::default().fg(Color::DarkGray)),
                view.area,
            );
        }
    }

    /// Draw a multi-line sprite centered on the entity's projected position.
    /// Sprites that would cross the area edge are skipped whole.
    fn render_sprite(
        &self,
        frame: &mut Frame,
        view: &RenderView,
        entity: &Entity,
        sprite: &[&str],
        color: Color,
    ) {
        let area = view.area;
        let width = sprite.iter().map(|line| line.len()).max().unwrap_or(0) as i32;
        let height = sprite.len() as i32;

        let (cx, cy) = view.project(entity.position);
        let left = cx - width / 2;
        let top = cy - height / 2;

        if left < 0
            || top < 0
            || left + width > i32::from(area.width)
            || top + height > i32::from(area.height)
        {
            return;
        }

        let text: Vec<Line> = sprite
            .iter()
            .map(|line| {
                Line::from(*line).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            })
            .collect();

        let sprite_area = Rect {
            x: area.x + left as u16,
            y: area.y + top as u16,
            width: width as u16,
            height: height as u16,
        };
        frame.render_widget(Paragraph::new(text), sprite_area);
    }
}
