use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::GameState;
use crate::config::EngineConfig;
use crate::entities::{Body, Enemy, EnemyKind, Pickup, PickupKind, Player, Projectile, ProjectileOwner};
use crate::run_state::RunState;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub arena: &'a EngineConfig,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub pickups: &'a [Pickup],
    pub run_state: &'a RunState,
    pub transition_remaining: Option<Duration>,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Maps arena units onto the cells of the playfield.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub field: Rect,
    pub arena_width: i32,
    pub arena_height: i32,
}

impl Viewport {
    /// Cell rectangle covering `body`, at least one cell in each direction.
    /// `None` when the body lies outside the playfield.
    pub fn project(&self, body: &Body) -> Option<Rect> {
        if body.x < 0 || body.y < 0 || body.x >= self.arena_width || body.y >= self.arena_height {
            return None;
        }
        let scale_x = |v: i32| (v as i64 * self.field.width as i64 / self.arena_width as i64) as u16;
        let scale_y = |v: i32| (v as i64 * self.field.height as i64 / self.arena_height as i64) as u16;

        let x = scale_x(body.x);
        let y = scale_y(body.y);
        let width = scale_x(body.width).max(1).min(self.field.width - x);
        let height = scale_y(body.height).max(1).min(self.field.height - y);
        Some(Rect {
            x: self.field.x + x,
            y: self.field.y + y,
            width,
            height,
        })
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

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        // Playfield sits between the header and the controls line
        let bordered = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(bordered);
        frame.render_widget(block, bordered);

        if field.width == 0 || field.height == 0 {
            return;
        }
        let viewport = Viewport {
            field,
            arena_width: view.arena.arena_width,
            arena_height: view.arena.arena_height,
        };

        let buffer = frame.buffer_mut();

        for enemy in view.enemies {
            if let Some(cells) = viewport.project(&enemy.body) {
                let (glyph, color) = match enemy.kind {
                    EnemyKind::Fast => ('W', Color::Red),
                    EnemyKind::Medium => ('M', Color::Yellow),
                    EnemyKind::Basic => ('A', Color::Green),
                };
                let row = glyph.to_string().repeat(cells.width as usize);
                buffer.set_string(
                    cells.x,
                    cells.y,
                    row,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        for projectile in view.projectiles {
            if let Some(cells) = viewport.project(&projectile.body) {
                let (glyph, color) = match projectile.owner {
                    ProjectileOwner::Player => ('|', Color::Cyan),
                    ProjectileOwner::Enemy => ('!', Color::Magenta),
                };
                buffer.set_string(cells.x, cells.y, glyph.to_string(), Style::default().fg(color));
            }
        }

        for pickup in view.pickups {
            if let Some(cells) = viewport.project(&pickup.body) {
                let (glyph, color) = match pickup.kind {
                    PickupKind::Health => ('+', Color::Green),
                    PickupKind::FireRateBoost => ('F', Color::LightRed),
                    PickupKind::ExtraScore => ('$', Color::Magenta),
                };
                buffer.set_string(
                    cells.x,
                    cells.y,
                    glyph.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        let ship = view
            .player
            .body
            .active
            .then(|| viewport.project(&view.player.body))
            .flatten();
        if let Some(cells) = ship {
            let mut hull = "=".repeat(cells.width as usize);
            if cells.width >= 3 {
                hull = format!("/{}\\", "^".repeat(cells.width as usize - 2));
            }
            buffer.set_string(
                cells.x,
                cells.y,
                hull,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            );
        }

        self.render_header(frame, view);

        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);

        if let Some(remaining) = view.transition_remaining {
            self.render_level_complete(frame, view, remaining);
        }
    }

    fn render_header(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let health = view.player.health;
        let health_style = if health > 50 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if health > 25 {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(Color::DarkGray);

        let stats = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format!("{}", view.run_state.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", label),
            Span::styled(format!("{}", view.run_state.lives), value),
            Span::styled("  Level: ", label),
            Span::styled(format!("{}", view.run_state.level), value),
            Span::styled("  HP: ", label),
            Span::styled(format!("{health}%"), health_style),
            Span::styled("  Fire: ", label),
            Span::styled(
                format!("{}ms", view.player.fire_interval.as_millis()),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Invaders: ", label),
            Span::styled(
                format!("{}", view.enemies.len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", label),
            Span::styled(format!("{}", view.fps), value),
        ]);
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer = Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(format!("{minutes:02}:{seconds:02}"), value),
        ]);
        frame.render_widget(Paragraph::new(timer).right_aligned(), stats_area);
    }

    fn render_level_complete(&self, frame: &mut Frame, view: &RenderView, remaining: Duration) {
        let area = view.area;
        let text = vec![
            Line::from(""),
            Line::from("LEVEL COMPLETE!").centered().bold().green(),
            Line::from(""),
            Line::from(format!(
                "Preparing Level {} in {:.1}s...",
                view.run_state.level,
                remaining.as_secs_f32()
            ))
            .centered()
            .white(),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Green)),
                )
                .alignment(Alignment::Center),
            centered(area, 40, 6),
        );
    }

    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            centered(view.area, 30, 6),
        );
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER          ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.run_state.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Reached Level: {}", view.run_state.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(format!("Time Survived: {minutes:02}:{seconds:02}"))
                .centered()
                .cyan(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

/// Box of at most `width` x `height` in the middle of `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            field: Rect {
                x: 1,
                y: 2,
                width: 80,
                height: 30,
            },
            arena_width: 800,
            arena_height: 600,
        }
    }

    #[test]
    fn test_project_scales_to_cells() {
        let cells = viewport().project(&Body::new(400, 300, 40, 30)).unwrap();
        assert_eq!(cells, Rect { x: 41, y: 17, width: 4, height: 1 });
    }

    #[test]
    fn test_project_keeps_small_bodies_visible() {
        let cells = viewport().project(&Body::new(0, 0, 4, 10)).unwrap();
        assert_eq!(cells.width, 1);
        assert_eq!(cells.height, 1);
    }

    #[test]
    fn test_project_clips_to_field() {
        let cells = viewport().project(&Body::new(790, 595, 40, 30)).unwrap();
        assert_eq!(cells.x + cells.width, 81);
        assert!(viewport().project(&Body::new(100, 600, 4, 10)).is_none());
        assert!(viewport().project(&Body::new(100, -4, 4, 10)).is_none());
    }

    #[test]
    fn test_centered_box() {
        let area = Rect { x: 0, y: 0, width: 100, height: 40 };
        assert_eq!(centered(area, 30, 6), Rect { x: 35, y: 17, width: 30, height: 6 });
        assert_eq!(centered(area, 200, 6).width, 100);
    }
}
