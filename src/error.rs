//! Startup errors
//!
//! Only startup can fail. Once the frame loop runs, every per-tick operation
//! is infallible and render errors are logged and recovered in place.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load sound {url}: {reason}")]
    SoundLoad { url: String, reason: String },
    #[error("missing or invalid DOM element: {0}")]
    Dom(String),
    #[error("graphics initialisation failed: {0}")]
    Graphics(String),
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_load_message() {
        let err = GameError::SoundLoad {
            url: "shoot.wav".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(err.to_string(), "failed to load sound shoot.wav: 404");
    }

    #[test]
    fn test_from_serde() {
        let err: GameError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GameError::Settings(_)));
    }
}
