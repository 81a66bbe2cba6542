use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type Sound = Buffered<Decoder<BufReader<File>>>;

const SOUND_DIR: &str = "assets/sounds";
/// Looping track for the start menu.
const MENU_MUSIC: &str = "startSound";
/// Looping track during play.
const GAME_MUSIC: &str = "playSound";
/// One-shot click for menu and game-over buttons.
const CLICK_SOUND: &str = "bubbleSound";

const MENU_MUSIC_VOLUME: f32 = 0.3;
const GAME_MUSIC_VOLUME: f32 = 0.5;

/// Audio manager for background music and UI sounds.
///
/// Every failure path here is non-fatal: a missing output device or a missing
/// sound file is logged once at startup and playback calls become no-ops.
pub struct AudioManager {
    /// Output device; `None` when no device could be opened.
    output: Option<(OutputStream, OutputStreamHandle)>,
    menu_music: Option<Sound>,
    game_music: Option<Sound>,
    click: Option<Sound>,
    /// Sink of the currently looping background track, if any.
    music: Option<Sink>,
    muted: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                log::warn!("audio output unavailable, continuing without sound: {err}");
                None
            }
        };

        let (menu_music, game_music, click) = if output.is_some() {
            (
                load_sound(MENU_MUSIC),
                load_sound(GAME_MUSIC),
                load_sound(CLICK_SOUND),
            )
        } else {
            (None, None, None)
        };

        Self {
            output,
            menu_music,
            game_music,
            click,
            music: None,
            muted: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag. Muting pauses the background track in place;
    /// unmuting resumes it from where it stopped.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if let Some(sink) = &self.music {
            if self.muted {
                sink.pause();
            } else {
                sink.play();
            }
        }
    }

    /// Start the menu track as the looping background music.
    pub fn play_menu_music(&mut self) {
        let sound = self.menu_music.clone();
        self.play_music(sound, MENU_MUSIC_VOLUME);
    }

    /// Start the gameplay track as the looping background music.
    pub fn play_game_music(&mut self) {
        let sound = self.game_music.clone();
        self.play_music(sound, GAME_MUSIC_VOLUME);
    }

    /// Stop and discard the background track.
    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    /// Pause the background track without losing its position.
    pub fn pause_music(&self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    /// Resume a paused background track. Stays silent while muted.
    pub fn resume_music(&self) {
        if self.muted {
            return;
        }
        if let Some(sink) = &self.music {
            sink.play();
        }
    }

    /// Play the UI click as a detached one-shot. Clicks are outside the mute
    /// scope, which only covers the background track.
    pub fn play_click(&self) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(click) = &self.click else {
            return;
        };
        if let Ok(sink) = Sink::try_new(handle) {
            sink.append(click.clone());
            sink.detach();
        }
    }

    fn play_music(&mut self, sound: Option<Sound>, volume: f32) {
        self.stop_music();
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(sound) = sound else {
            return;
        };
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            sink.append(sound.repeat_infinite());
            if self.muted {
                sink.pause();
            }
            self.music = Some(sink);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and buffer a sound by logical name. Returns `None` (and logs) when
/// the file is missing or cannot be decoded.
fn load_sound(name: &str) -> Option<Sound> {
    let path = Path::new(SOUND_DIR).join(format!("{name}.mp3"));
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("sound '{name}' not found at {}: {err}", path.display());
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            log::warn!("sound '{name}' could not be decoded: {err}");
            None
        }
    }
}
