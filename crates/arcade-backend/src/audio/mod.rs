//! Sound effects.
//!
//! Sounds are loaded into memory under string ids and decoded when played.
//! Volumes use the 0..=128 mixer scale; the effective gain of a playing sound is
//! `master / 128 * sound / 128`.

mod output;
mod repeat;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::AudioConfig;

pub use output::MIX_CHANNELS;

use output::Output;

/// Full volume on the mixer scale.
pub const MAX_VOLUME: u8 = 128;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio support was not compiled in (enable the `audio` feature)")]
    Unavailable,

    #[error("failed to open audio device: {0}")]
    Device(String),

    #[error("sound id is empty")]
    EmptyId,

    #[error("failed to read sound {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode sound: {0}")]
    Decode(String),

    #[error("playback failed: {0}")]
    Playback(String),
}

struct Sound {
    data: Arc<[u8]>,
    volume: u8,
}

pub struct Audio {
    sounds: HashMap<String, Sound>,
    master_volume: u8,
    output: Option<Output>,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    pub fn new() -> Self {
        Self {
            sounds: HashMap::new(),
            master_volume: MAX_VOLUME,
            output: None,
        }
    }

    /// Opens the output device. Does nothing when already open.
    pub fn init(&mut self, config: &AudioConfig) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let mut output = Output::open(config)?;
        output.set_master_volume(gain(self.master_volume));
        self.output = Some(output);

        log::info!("audio initialized");
        Ok(())
    }

    /// Stops everything, forgets loaded sounds and closes the device.
    pub fn shutdown(&mut self) {
        let Some(mut output) = self.output.take() else {
            return;
        };
        output.stop_all();
        self.sounds.clear();
        log::debug!("audio shut down");
    }

    pub fn initialized(&self) -> bool {
        self.output.is_some()
    }

    /// Reads `path` into memory under `id`, replacing any sound already there.
    ///
    /// The file is not decoded until it is played.
    pub fn load_sound(&mut self, id: &str, path: impl AsRef<Path>) -> Result<(), AudioError> {
        if id.is_empty() {
            return Err(AudioError::EmptyId);
        }

        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("load_sound: {id:?} <- {} ({} bytes)", path.display(), bytes.len());
        self.sounds.insert(
            id.to_owned(),
            Sound {
                data: Arc::from(bytes),
                volume: MAX_VOLUME,
            },
        );
        Ok(())
    }

    pub fn has_sound(&self, id: &str) -> bool {
        self.sounds.contains_key(id)
    }

    /// Plays sound `id` `loops + 1` times; a negative `loops` repeats forever.
    ///
    /// Unknown ids are ignored. Opens the device with default settings if needed.
    pub fn play_sound(&mut self, id: &str, loops: i32) -> Result<(), AudioError> {
        let Some(sound) = self.sounds.get(id) else {
            return Ok(());
        };
        let data = Arc::clone(&sound.data);
        let volume = gain(sound.volume);

        if self.output.is_none() {
            self.init(&AudioConfig::default())?;
        }
        match self.output.as_mut() {
            Some(output) => output.play(&data, loops, volume, gain(self.master_volume)),
            None => Ok(()),
        }
    }

    /// Sets the master volume, clamped to 0..=128.
    pub fn set_master_volume(&mut self, volume: i32) {
        self.master_volume = clamp_volume(volume);
        if let Some(output) = self.output.as_mut() {
            output.set_master_volume(gain(self.master_volume));
        }
    }

    pub fn master_volume(&self) -> u8 {
        self.master_volume
    }

    /// Sets the volume of one sound for future plays, clamped to 0..=128.
    ///
    /// Unknown ids are ignored.
    pub fn set_sound_volume(&mut self, id: &str, volume: i32) {
        if let Some(sound) = self.sounds.get_mut(id) {
            sound.volume = clamp_volume(volume);
        }
    }

    pub fn sound_volume(&self, id: &str) -> Option<u8> {
        self.sounds.get(id).map(|s| s.volume)
    }

    pub fn stop_all(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.stop_all();
        }
    }
}

impl Drop for Audio {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, i32::from(MAX_VOLUME)) as u8
}

#[inline]
fn gain(volume: u8) -> f32 {
    f32::from(volume) / f32::from(MAX_VOLUME)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sound_file() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"RIFF\0\0\0\0WAVE").unwrap();
        f
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut audio = Audio::new();
        let f = sound_file();
        assert!(matches!(audio.load_sound("", f.path()), Err(AudioError::EmptyId)));
    }

    #[test]
    fn missing_file_reports_path() {
        let mut audio = Audio::new();
        match audio.load_sound("boom", "no/such/boom.wav") {
            Err(AudioError::Io { path, .. }) => assert_eq!(path, PathBuf::from("no/such/boom.wav")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!audio.has_sound("boom"));
    }

    #[test]
    fn reload_replaces_and_resets_volume() {
        let mut audio = Audio::new();
        let f = sound_file();
        audio.load_sound("blip", f.path()).unwrap();
        audio.set_sound_volume("blip", 10);
        assert_eq!(audio.sound_volume("blip"), Some(10));

        audio.load_sound("blip", f.path()).unwrap();
        assert_eq!(audio.sound_volume("blip"), Some(MAX_VOLUME));
    }

    #[test]
    fn volumes_are_clamped() {
        let mut audio = Audio::new();
        audio.set_master_volume(500);
        assert_eq!(audio.master_volume(), 128);
        audio.set_master_volume(-4);
        assert_eq!(audio.master_volume(), 0);

        let f = sound_file();
        audio.load_sound("s", f.path()).unwrap();
        audio.set_sound_volume("s", 200);
        assert_eq!(audio.sound_volume("s"), Some(128));
        audio.set_sound_volume("missing", 5);
        assert_eq!(audio.sound_volume("missing"), None);
    }

    #[test]
    fn unknown_sound_is_a_noop_without_init() {
        let mut audio = Audio::new();
        assert!(audio.play_sound("nothing", 0).is_ok());
        assert!(!audio.initialized());
    }

    #[test]
    fn stop_and_shutdown_before_init_are_harmless() {
        let mut audio = Audio::new();
        audio.stop_all();
        audio.shutdown();
        audio.shutdown();
        assert!(!audio.initialized());
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn init_without_feature_is_unavailable() {
        let mut audio = Audio::new();
        assert!(matches!(
            audio.init(&AudioConfig::default()),
            Err(AudioError::Unavailable)
        ));

        let f = sound_file();
        audio.load_sound("s", f.path()).unwrap();
        assert!(matches!(audio.play_sound("s", 0), Err(AudioError::Unavailable)));
    }

    #[test]
    fn mixer_has_sixteen_channels() {
        assert_eq!(MIX_CHANNELS, 16);
    }

    #[test]
    fn gain_scale() {
        assert_eq!(gain(128), 1.0);
        assert_eq!(gain(64), 0.5);
        assert_eq!(gain(0), 0.0);
    }
}
