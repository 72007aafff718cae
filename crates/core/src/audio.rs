//! Audio playback seam.
//!
//! Actual sound playback lives in an external collaborator behind the
//! [`AudioSink`] trait. [`SoundToggle`] is the only state the sketches keep:
//! a play/stop flag flipped by a click. A sink that has not finished loading
//! makes the toggle a no-op rather than an error; the toy never surfaces
//! asset-loading failures to the user.

/// External audio playback collaborator.
pub trait AudioSink {
    /// Whether the underlying asset has finished loading.
    fn is_loaded(&self) -> bool;
    /// Starts playback.
    fn play(&mut self);
    /// Stops playback.
    fn stop(&mut self);
}

/// Play/stop toggle state driven by pointer clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundToggle {
    playing: bool,
}

impl SoundToggle {
    /// Creates a toggle in the stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last honored toggle left the sink playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flips play/stop against the sink.
    ///
    /// Ignored entirely while `sink.is_loaded()` is false: the state does
    /// not change and the sink is not called. Returns the state after the
    /// toggle attempt.
    pub fn toggle(&mut self, sink: &mut dyn AudioSink) -> bool {
        if !sink.is_loaded() {
            return self.playing;
        }
        if self.playing {
            sink.stop();
        } else {
            sink.play();
        }
        self.playing = !self.playing;
        self.playing
    }
}

/// Test double that records calls without producing sound.
#[derive(Debug, Default)]
pub struct NullAudio {
    pub loaded: bool,
    pub play_calls: usize,
    pub stop_calls: usize,
}

impl NullAudio {
    /// A sink that reports itself loaded.
    pub fn loaded() -> Self {
        Self {
            loaded: true,
            ..Self::default()
        }
    }
}

impl AudioSink for NullAudio {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn play(&mut self) {
        self.play_calls += 1;
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
    }
}
