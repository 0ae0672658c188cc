//! Audio system
//!
//! Sound is fire-and-forget: the simulation asks for an effect and never
//! learns whether it played. In the browser the shot sound is a sampled
//! asset loaded once before the game loop starts.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires a bullet
    Shoot,
}

/// Anything that can be asked to play an effect
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that drops every request (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl SoundSink for SilentSound {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Sink that remembers what was requested
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSound {
    pub played: Vec<SoundEffect>,
}

#[cfg(test)]
impl SoundSink for RecordingSound {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

/// Master/SFX volume with mute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeControl {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl VolumeControl {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        let mut volume = Self::default();
        volume.set_master_volume(settings.master_volume);
        volume.set_sfx_volume(settings.sfx_volume);
        volume.set_muted(settings.muted);
        volume
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::{Function, Promise};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{SoundEffect, SoundSink, VolumeControl};
    use crate::error::GameError;

    /// Audio manager backed by an `<audio>` element per effect
    pub struct AudioManager {
        shoot: HtmlAudioElement,
        pub volume: VolumeControl,
    }

    impl AudioManager {
        /// Load the shot sample and wait until it can play through.
        ///
        /// Fails if the element cannot be created or the browser reports a
        /// media error; the game loop must not start in that case.
        pub async fn load(url: &str, volume: VolumeControl) -> Result<Self, GameError> {
            let load_error = |reason: String| GameError::SoundLoad {
                url: url.to_string(),
                reason,
            };

            let shoot = HtmlAudioElement::new_with_src(url)
                .map_err(|e| load_error(format!("{:?}", e)))?;

            let mut handlers: Option<(Function, Function)> = None;
            let ready = Promise::new(&mut |resolve: Function, reject: Function| {
                let _ = shoot.add_event_listener_with_callback("canplaythrough", &resolve);
                let _ = shoot.add_event_listener_with_callback("error", &reject);
                handlers = Some((resolve, reject));
            });
            shoot.load();

            let result = JsFuture::from(ready).await;

            if let Some((resolve, reject)) = handlers {
                let _ = shoot.remove_event_listener_with_callback("canplaythrough", &resolve);
                let _ = shoot.remove_event_listener_with_callback("error", &reject);
            }

            result.map_err(|_| load_error("media element reported an error".to_string()))?;
            log::info!("Loaded sound {}", url);

            Ok(Self { shoot, volume })
        }

        fn element(&self, effect: SoundEffect) -> &HtmlAudioElement {
            match effect {
                SoundEffect::Shoot => &self.shoot,
            }
        }
    }

    impl SoundSink for AudioManager {
        /// Rewind and play; rapid repeats restart the same sample
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return;
            }

            let element = self.element(effect);
            element.set_volume(vol as f64);
            element.set_current_time(0.0);
            // Autoplay rejections and decode errors are ignored
            let _ = element.play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_effective_volume() {
        let mut volume = VolumeControl::default();
        assert!((volume.effective() - 0.8).abs() < 1e-6);

        volume.set_sfx_volume(0.5);
        assert!((volume.effective() - 0.4).abs() < 1e-6);

        volume.set_muted(true);
        assert_eq!(volume.effective(), 0.0);
    }

    #[test]
    fn test_volume_clamps() {
        let mut volume = VolumeControl::default();
        volume.set_master_volume(3.0);
        volume.set_sfx_volume(-1.0);
        assert_eq!(volume.effective(), 0.0);
        volume.set_sfx_volume(1.0);
        assert_eq!(volume.effective(), 1.0);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            muted: false,
            ..Settings::default()
        };
        let volume = VolumeControl::from_settings(&settings);
        assert!((volume.effective() - 0.25).abs() < 1e-6);
        assert!(!volume.is_muted());
    }

    #[test]
    fn test_silent_sound_accepts_requests() {
        let mut sink = SilentSound;
        sink.play(SoundEffect::Shoot);
    }
}
