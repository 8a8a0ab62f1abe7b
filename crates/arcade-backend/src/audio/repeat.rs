//! Bounded repetition of a decoded sound.

/// Plays `source` once, then `extra` more times.
///
/// Every pass replays a clone of the same source, so memory does not grow with
/// the repeat count. A source that yields nothing ends the whole sequence.
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub(crate) struct Repeat<S> {
    template: S,
    current: S,
    extra: u32,
    // The current pass produced at least one sample.
    produced: bool,
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
impl<S: Iterator + Clone> Repeat<S> {
    pub(crate) fn new(source: S, extra: u32) -> Self {
        Self {
            current: source.clone(),
            template: source,
            extra,
            produced: false,
        }
    }
}

impl<S: Iterator + Clone> Iterator for Repeat<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            if let Some(sample) = self.current.next() {
                self.produced = true;
                return Some(sample);
            }
            if self.extra == 0 || !self.produced {
                return None;
            }
            self.extra -= 1;
            self.produced = false;
            self.current = self.template.clone();
        }
    }
}

#[cfg(feature = "audio")]
impl<S> rodio::Source for Repeat<S>
where
    S: rodio::Source + Clone,
    S::Item: rodio::Sample,
{
    fn current_frame_len(&self) -> Option<usize> {
        match self.current.current_frame_len() {
            Some(0) if self.extra > 0 => self.template.current_frame_len(),
            len => len,
        }
    }

    fn channels(&self) -> u16 {
        self.current.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.current.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        let once = self.template.total_duration()?;
        once.checked_mul(self.extra.checked_add(1)?)
    }
}
