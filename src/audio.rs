use log::warn;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::GameEvent;

type Sound = Buffered<Decoder<BufReader<File>>>;

const FIRE_SOUND: &str = "assets/sounds/fire.wav";
const EXPLOSION_SOUND: &str = "assets/sounds/explosion.wav";

/// Open output device; dropping the stream stops all playback.
struct Output {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

/// Plays short cues for engine events. Silently does nothing when muted or
/// when the device or the sound files are unavailable.
pub struct AudioManager {
    output: Option<Output>,
    fire_sound: Option<Sound>,
    explosion_sound: Option<Sound>,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        if muted {
            return Self::silent();
        }
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                warn!("Failed to initialize audio, continuing without sound: {err}");
                return Self::silent();
            }
        };

        Self {
            output: Some(Output {
                _stream: stream,
                stream_handle,
            }),
            fire_sound: load(FIRE_SOUND),
            explosion_sound: load(EXPLOSION_SOUND),
        }
    }

    pub fn silent() -> Self {
        Self {
            output: None,
            fire_sound: None,
            explosion_sound: None,
        }
    }

    pub fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::PlayerFired => self.play(self.fire_sound.as_ref(), 0.3),
            GameEvent::EnemyFired => self.play(self.fire_sound.as_ref(), 0.05),
            GameEvent::EnemyDestroyed { .. } | GameEvent::EnemyRammed { .. } => {
                self.play(self.explosion_sound.as_ref(), 0.4)
            }
            GameEvent::LifeLost { .. } => self.play(self.explosion_sound.as_ref(), 0.8),
            _ => {}
        }
    }

    fn play(&self, sound: Option<&Sound>, volume: f32) {
        let (Some(output), Some(sound)) = (&self.output, sound) else {
            return;
        };
        // Playback errors never interrupt the game
        if let Ok(sink) = Sink::try_new(&output.stream_handle) {
            sink.set_volume(volume);
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn load(path: &str) -> Option<Sound> {
    if !Path::new(path).exists() {
        return None;
    }
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));
    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            warn!("Could not load {path}: {err}");
            None
        }
    }
}
