//! Audio: simulation events in, sound effects and music out
//!
//! [`AudioManager`] decides *what* to play from game events and the player's
//! toggles; an [`AudioSink`] backend does the playing. Backends swallow their
//! own failures, so a missing or blocked audio device never reaches the game.

use crate::consts::MUSIC_RATE_STEP;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall or a paddle
    Hit,
}

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Game,
}

/// Audio output backend
pub trait AudioSink {
    fn play_sfx(&mut self, effect: SoundEffect);
    /// Start or continue a track from its current position
    fn play_music(&mut self, track: MusicTrack);
    fn pause_music(&mut self, track: MusicTrack);
    /// Pause and rewind to the start
    fn stop_music(&mut self, track: MusicTrack);
    fn set_playback_rate(&mut self, track: MusicTrack, rate: f64);
    /// Output levels in [0, 1] for music tracks and sound effects
    fn set_volume(&mut self, music: f32, sfx: f32);
}

/// Backend that plays nothing (native builds, tests, no audio device)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_sfx(&mut self, effect: SoundEffect) {
        log::debug!("sfx {:?}", effect);
    }

    fn play_music(&mut self, track: MusicTrack) {
        log::debug!("music {:?} play", track);
    }

    fn pause_music(&mut self, track: MusicTrack) {
        log::debug!("music {:?} pause", track);
    }

    fn stop_music(&mut self, track: MusicTrack) {
        log::debug!("music {:?} stop", track);
    }

    fn set_playback_rate(&mut self, track: MusicTrack, rate: f64) {
        log::debug!("music {:?} rate {:.3}", track, rate);
    }

    fn set_volume(&mut self, music: f32, sfx: f32) {
        log::debug!("volume music {:.2} sfx {:.2}", music, sfx);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    music_enabled: bool,
    sfx_enabled: bool,
    /// Game music playback rate
    tempo: f64,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, music_enabled: bool, sfx_enabled: bool) -> Self {
        Self {
            sink,
            music_enabled,
            sfx_enabled,
            tempo: 1.0,
        }
    }

    /// Apply the saved music/SFX levels to the backend
    pub fn set_volume(&mut self, music: f32, sfx: f32) {
        self.sink.set_volume(music, sfx);
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    fn set_tempo(&mut self, tempo: f64) {
        self.tempo = tempo;
        self.sink.set_playback_rate(MusicTrack::Game, tempo);
    }

    /// React to a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Hit(_) => {
                if self.sfx_enabled {
                    self.sink.play_sfx(SoundEffect::Hit);
                }
            }
            GameEvent::RallyMilestone(_) => {
                if self.music_enabled {
                    self.set_tempo(self.tempo + MUSIC_RATE_STEP);
                }
            }
            GameEvent::Score(_) => {
                if self.music_enabled {
                    self.set_tempo(1.0);
                }
            }
            GameEvent::GameOver(_) => {
                if self.music_enabled {
                    self.sink.pause_music(MusicTrack::Game);
                }
            }
        }
    }

    /// Menu is showing (boot, exit, after game over)
    pub fn enter_menu(&mut self) {
        if self.music_enabled {
            self.sink.play_music(MusicTrack::Menu);
        }
    }

    /// A new match starts: game music from the top at normal speed
    pub fn start_game(&mut self) {
        if self.music_enabled {
            self.sink.pause_music(MusicTrack::Menu);
            self.sink.stop_music(MusicTrack::Game);
            self.set_tempo(1.0);
            self.sink.play_music(MusicTrack::Game);
        }
    }

    pub fn pause_game(&mut self) {
        if self.music_enabled {
            self.sink.pause_music(MusicTrack::Game);
        }
    }

    pub fn resume_game(&mut self) {
        if self.music_enabled {
            self.sink.play_music(MusicTrack::Game);
        }
    }

    /// Leaving a match for the menu: rewind the game track
    pub fn exit_game(&mut self) {
        self.sink.stop_music(MusicTrack::Game);
        self.enter_menu();
    }

    /// Turn music on/off. When turning on, `resume` is the track to restart
    /// for the current screen (None while paused or on the game-over screen).
    pub fn set_music_enabled(&mut self, enabled: bool, resume: Option<MusicTrack>) {
        self.music_enabled = enabled;
        if enabled {
            if let Some(track) = resume {
                self.sink.play_music(track);
            }
        } else {
            self.sink.pause_music(MusicTrack::Menu);
            self.sink.pause_music(MusicTrack::Game);
        }
    }

    pub fn set_sfx_enabled(&mut self, enabled: bool) {
        self.sfx_enabled = enabled;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

/// Browser backend: Web Audio oscillator for hits, `<audio>` elements for music
#[cfg(target_arch = "wasm32")]
mod web_audio {
    use wasm_bindgen::JsCast;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioSink, MusicTrack, SoundEffect};

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        menu_music: Option<HtmlAudioElement>,
        game_music: Option<HtmlAudioElement>,
        sfx_volume: f32,
    }

    impl WebAudio {
        /// Look up the music elements by id; anything missing is skipped.
        /// Levels start at full and are set through [`AudioSink::set_volume`].
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            let menu_music = Self::music_element("menu-music");
            let game_music = Self::music_element("game-music");
            Self {
                ctx,
                menu_music,
                game_music,
                sfx_volume: 1.0,
            }
        }

        fn music_element(id: &str) -> Option<HtmlAudioElement> {
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
            if element.is_none() {
                log::warn!("No <audio id=\"{}\"> element - track disabled", id);
            }
            element
        }

        fn track(&self, track: MusicTrack) -> Option<&HtmlAudioElement> {
            match track {
                MusicTrack::Menu => self.menu_music.as_ref(),
                MusicTrack::Game => self.game_music.as_ref(),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Hit - solid thump
        fn play_hit(&self, ctx: &AudioContext) {
            let Some((osc, gain)) = Self::create_osc(ctx, 150.0, OscillatorType::Sine) else {
                log::warn!("SFX error: could not build oscillator");
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(self.sfx_volume * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioSink for WebAudio {
        fn play_sfx(&mut self, effect: SoundEffect) {
            if self.sfx_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Hit => self.play_hit(ctx),
            }
        }

        fn play_music(&mut self, track: MusicTrack) {
            if let Some(el) = self.track(track) {
                // Autoplay may be blocked until the user interacts with the page
                if let Err(e) = el.play() {
                    log::warn!("Music {:?} could not start: {:?}", track, e);
                }
            }
        }

        fn pause_music(&mut self, track: MusicTrack) {
            if let Some(el) = self.track(track) {
                if let Err(e) = el.pause() {
                    log::warn!("Music {:?} could not pause: {:?}", track, e);
                }
            }
        }

        fn stop_music(&mut self, track: MusicTrack) {
            self.pause_music(track);
            if let Some(el) = self.track(track) {
                el.set_current_time(0.0);
            }
        }

        fn set_playback_rate(&mut self, track: MusicTrack, rate: f64) {
            if let Some(el) = self.track(track) {
                el.set_playback_rate(rate);
            }
        }

        fn set_volume(&mut self, music: f32, sfx: f32) {
            for el in [&self.menu_music, &self.game_music].into_iter().flatten() {
                el.set_volume(music as f64);
            }
            self.sfx_volume = sfx;
        }
    }
}
