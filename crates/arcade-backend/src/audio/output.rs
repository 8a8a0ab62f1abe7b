//! Audio output device.
//!
//! Built on rodio when the `audio` feature is enabled; otherwise opening the
//! device always fails with [`AudioError::Unavailable`].

use std::sync::Arc;

use crate::config::AudioConfig;

use super::AudioError;

/// Maximum number of sounds playing at once. Further plays are dropped.
pub const MIX_CHANNELS: usize = 16;

#[cfg(feature = "audio")]
pub(crate) use rodio_output::Output;

#[cfg(not(feature = "audio"))]
pub(crate) use null_output::Output;

#[cfg(feature = "audio")]
mod rodio_output {
    use std::io::Cursor;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::*;
    use crate::audio::repeat::Repeat;

    pub(crate) struct Output {
        /// Active channels and the per-sound volume each was started with.
        channels: Vec<(Sink, f32)>,
        handle: OutputStreamHandle,
        // Must outlive every sink.
        _stream: OutputStream,
    }

    impl Output {
        pub(crate) fn open(config: &AudioConfig) -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
            log::debug!(
                "audio output opened (requested {} Hz, {} ch, chunk {})",
                config.frequency,
                config.channels,
                config.chunk_size
            );
            Ok(Self {
                channels: Vec::with_capacity(MIX_CHANNELS),
                handle,
                _stream: stream,
            })
        }

        /// Starts `data` on a free channel. `loops < 0` repeats forever;
        /// otherwise the sound is decoded once and played `loops + 1` times.
        pub(crate) fn play(
            &mut self,
            data: &Arc<[u8]>,
            loops: i32,
            sound_volume: f32,
            master_volume: f32,
        ) -> Result<(), AudioError> {
            self.channels.retain(|(sink, _)| !sink.empty());
            if self.channels.len() >= MIX_CHANNELS {
                log::debug!("audio: all {MIX_CHANNELS} channels busy, sound dropped");
                return Ok(());
            }

            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
            let decode = || {
                Decoder::new(Cursor::new(Arc::clone(data))).map_err(|e| AudioError::Decode(e.to_string()))
            };

            if loops < 0 {
                sink.append(decode()?.repeat_infinite());
            } else {
                sink.append(Repeat::new(decode()?.buffered(), loops.unsigned_abs()));
            }

            sink.set_volume(sound_volume * master_volume);
            self.channels.push((sink, sound_volume));
            Ok(())
        }

        pub(crate) fn set_master_volume(&mut self, master_volume: f32) {
            for (sink, sound_volume) in &self.channels {
                sink.set_volume(sound_volume * master_volume);
            }
        }

        pub(crate) fn stop_all(&mut self) {
            for (sink, _) in self.channels.drain(..) {
                sink.stop();
            }
        }
    }
}

#[cfg(not(feature = "audio"))]
mod null_output {
    use super::*;

    pub(crate) struct Output;

    impl Output {
        pub(crate) fn open(_config: &AudioConfig) -> Result<Self, AudioError> {
            Err(AudioError::Unavailable)
        }

        pub(crate) fn play(
            &mut self,
            _data: &Arc<[u8]>,
            _loops: i32,
            _sound_volume: f32,
            _master_volume: f32,
        ) -> Result<(), AudioError> {
            Ok(())
        }

        pub(crate) fn set_master_volume(&mut self, _master_volume: f32) {}

        pub(crate) fn stop_all(&mut self) {}
    }
}
