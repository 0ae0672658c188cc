//! One running game: world, input, randomness and sound wired together
//!
//! The platform driver calls [`Game::frame`] once per display frame; that is
//! the whole update-then-draw contract.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::SoundSink;
use crate::input::{Key, KeyState};
use crate::renderer::DrawSurface;
use crate::settings::Settings;
use crate::sim::World;

/// Environment variable capping the headless driver's frame count
pub const FRAME_LIMIT_ENV: &str = "INVADERS_FRAMES";

/// Parse a frame cap; `None` means run until the process is stopped
pub fn frame_limit(value: Option<&str>) -> Option<u64> {
    value.and_then(|s| s.trim().parse().ok())
}

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Rolling FPS estimate from frame timestamps (milliseconds)
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest sample
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Game instance holding all state
pub struct Game<S: SoundSink> {
    pub world: World,
    pub keys: KeyState,
    pub sound: S,
    pub settings: Settings,
    pub stats: FrameStats,
    rng: Pcg32,
    frames: u64,
}

impl<S: SoundSink> Game<S> {
    pub fn new(game_size: DVec2, settings: Settings, sound: S, seed: u64) -> Self {
        let mut world = World::new(game_size);
        world.cull_offscreen_bullets = settings.cull_offscreen_bullets;
        Self {
            world,
            keys: KeyState::default(),
            sound,
            settings,
            stats: FrameStats::default(),
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    /// Run one simulation step
    pub fn update(&mut self) {
        self.world.update(&self.keys, &mut self.sound, &mut self.rng);
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        self.world.draw(surface);
    }

    /// Update then draw
    pub fn frame(&mut self, surface: &mut dyn DrawSurface) {
        self.update();
        self.draw(surface);
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True once `limit` frames have run; never true without a limit
    pub fn finished(&self, limit: Option<u64>) -> bool {
        limit.is_some_and(|n| self.frames >= n)
    }

    /// Feed a key press; returns true if the key is one the game uses
    pub fn key_down(&mut self, name: &str, key_code: u32) -> bool {
        match Key::from_event(name, key_code) {
            Some(key) => {
                self.keys.press(key);
                true
            }
            None => false,
        }
    }

    /// Feed a key release; returns true if the key is one the game uses
    pub fn key_up(&mut self, name: &str, key_code: u32) -> bool {
        match Key::from_event(name, key_code) {
            Some(key) => {
                self.keys.release(key);
                true
            }
            None => false,
        }
    }

    /// Window lost focus; release events will not arrive
    pub fn focus_lost(&mut self) {
        if self.settings.release_keys_on_blur {
            self.keys.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordingSound, SoundEffect};
    use crate::input::KeyQuery;
    use crate::renderer::RectBatch;

    const GAME_SIZE: DVec2 = DVec2::new(310.0, 300.0);

    fn game() -> Game<RecordingSound> {
        Game::new(GAME_SIZE, Settings::default(), RecordingSound::default(), 1234)
    }

    #[test]
    fn test_frame_draws_every_body() {
        let mut game = game();
        let mut batch = RectBatch::default();
        game.frame(&mut batch);
        assert_eq!(batch.rect_count(), game.world.len());
        assert_eq!(game.frames(), 1);
        assert_eq!(game.world.time_ticks, 1);
    }

    #[test]
    fn test_keys_drive_player() {
        let mut game = game();
        let start = game.world.player().unwrap().center;

        assert!(game.key_down("ArrowLeft", 37));
        game.update();
        assert_eq!(game.world.player().unwrap().center.x, start.x - 2.0);

        assert!(game.key_up("ArrowLeft", 37));
        assert!(game.key_down(" ", 32));
        game.update();
        assert_eq!(game.sound.played, vec![SoundEffect::Shoot]);
        assert!(game.world.bullet_count() >= 1);

        assert!(!game.key_down("Enter", 13));
    }

    #[test]
    fn test_focus_lost_releases_keys() {
        let mut game = game();
        game.key_down("ArrowRight", 39);
        game.focus_lost();
        assert!(!game.keys.is_down(Key::Right));

        let mut game = Game::new(
            GAME_SIZE,
            Settings {
                release_keys_on_blur: false,
                ..Settings::default()
            },
            RecordingSound::default(),
            1,
        );
        game.key_down("ArrowRight", 39);
        game.focus_lost();
        assert!(game.keys.is_down(Key::Right));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = game();
        let mut b = game();
        for _ in 0..500 {
            a.update();
            b.update();
        }
        assert_eq!(a.world.bodies(), b.world.bodies());
    }

    #[test]
    fn test_settings_enable_culling() {
        let game = Game::new(
            GAME_SIZE,
            Settings {
                cull_offscreen_bullets: true,
                ..Settings::default()
            },
            RecordingSound::default(),
            1,
        );
        assert!(game.world.cull_offscreen_bullets);
    }

    #[test]
    fn test_frame_limit_parsing() {
        assert_eq!(frame_limit(None), None);
        assert_eq!(frame_limit(Some("120")), Some(120));
        assert_eq!(frame_limit(Some(" 5 ")), Some(5));
        assert_eq!(frame_limit(Some("lots")), None);
    }

    #[test]
    fn test_unlimited_game_never_finishes() {
        let mut game = game();
        let mut batch = RectBatch::default();
        for _ in 0..1000 {
            game.frame(&mut batch);
        }
        assert!(!game.finished(None));
    }

    #[test]
    fn test_limited_game_finishes() {
        let mut game = game();
        let mut batch = RectBatch::default();
        assert!(!game.finished(Some(3)));
        for _ in 0..3 {
            game.frame(&mut batch);
        }
        assert!(game.finished(Some(3)));
        assert!(game.finished(Some(0)));
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::default();
        for i in 1..=120 {
            stats.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(stats.fps(), 60);
    }
}
