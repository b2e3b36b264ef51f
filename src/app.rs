use color_eyre::Result;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::EngineConfig;
use crate::engine::{Engine, GameEvent};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// What the terminal front end is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Drives the engine at a fixed cadence and draws it to the terminal.
pub struct App {
    running: bool,
    paused: bool,
    engine: Engine,
    config: EngineConfig,
    /// Seed of the current run; restarts move on to the next one
    seed: u64,
    tick_interval: Duration,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new(config: EngineConfig, seed: u64, tick_interval: Duration, audio_manager: AudioManager) -> Self {
        info!("Starting run with seed {seed}");
        let now = Instant::now();
        Self {
            running: true,
            paused: false,
            engine: Engine::seeded(config, seed),
            config,
            seed,
            tick_interval,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    pub fn game_state(&self) -> GameState {
        if !self.engine.run_state().running {
            GameState::GameOver
        } else if self.paused {
            GameState::Paused
        } else {
            GameState::Playing
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            let game_state = self.game_state();
            terminal.draw(|frame| {
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    game_state,
                    arena: self.engine.config(),
                    player: self.engine.player(),
                    enemies: self.engine.enemies(),
                    projectiles: self.engine.projectiles(),
                    pickups: self.engine.pickups(),
                    run_state: self.engine.run_state(),
                    transition_remaining: self.engine.transition_remaining(),
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(game_state)?;
            let actions = self.input_manager.get_actions(game_state);
            self.process_actions(&actions);

            if self.game_state() == GameState::Playing {
                self.engine.update();
            }
            self.process_events();

            std::thread::sleep(self.tick_interval);
        }
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Pause => self.paused = true,
                InputAction::Resume => self.paused = false,
                InputAction::Restart => self.restart(),
                InputAction::Play(command) => self.engine.handle_input(*command),
            }
        }
    }

    fn process_events(&mut self) {
        for event in self.engine.drain_events() {
            self.audio_manager.on_event(&event);
            if let GameEvent::GameOver { score } = event {
                info!("Run with seed {} ended with score {score}", self.seed);
                self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
            }
        }
    }

    fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        info!("Restarting with seed {}", self.seed);
        self.engine = Engine::seeded(self.config, self.seed);
        self.paused = false;
        self.game_start_time = Instant::now();
        self.final_time_secs = None;
    }
}
