//! Media element seam and seek bookkeeping.

use crate::format::{format_time, progress_fraction};

/// The subset of an HTML media element the player drives.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// True once playback has run off the end; `play()` restarts from 0.
    fn has_ended(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    /// Raw duration; `NaN` or infinite until metadata has loaded.
    fn duration(&self) -> f64;
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
    fn set_source(&mut self, src: &str);
}

/// Known, finite, positive duration or `None`.
pub fn known_duration<M: MediaElement + ?Sized>(media: &M) -> Option<f64> {
    let d = media.duration();
    (d.is_finite() && d > 0.0).then_some(d)
}

/// `(current, total)` labels for the time readout.
pub fn time_labels<M: MediaElement + ?Sized>(media: &M) -> (String, String) {
    (
        format_time(media.current_time()),
        format_time(media.duration()),
    )
}

/// Deferred seeks and scrubber drag ownership.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeekState {
    pending: Option<f32>,
    drag: Option<f32>,
}

impl SeekState {
    /// Seek now if the duration is known, otherwise remember the fraction.
    pub fn seek<M: MediaElement + ?Sized>(&mut self, media: &mut M, fraction: f32) {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match known_duration(media) {
            Some(d) => {
                media.set_current_time(fraction as f64 * d);
                self.pending = None;
            }
            None => {
                log::debug!("[seek] duration unknown, deferring {:.3}", fraction);
                self.pending = Some(fraction);
            }
        }
    }

    /// Apply a deferred seek once metadata arrives.
    pub fn on_metadata<M: MediaElement + ?Sized>(&mut self, media: &mut M) {
        if let Some(fraction) = self.pending {
            if let Some(d) = known_duration(media) {
                media.set_current_time(fraction as f64 * d);
                self.pending = None;
            }
        }
    }

    /// Drop any deferred seek, e.g. after the source changes.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn begin_drag(&mut self, fraction: f32) {
        self.drag = Some(fraction.clamp(0.0, 1.0));
    }

    pub fn update_drag(&mut self, fraction: f32) {
        if self.drag.is_some() {
            self.drag = Some(fraction.clamp(0.0, 1.0));
        }
    }

    /// Finish the drag; the caller seeks to the returned fraction.
    pub fn end_drag(&mut self, fraction: f32) -> Option<f32> {
        self.drag.take().map(|_| fraction.clamp(0.0, 1.0))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Progress to display: the drag position wins over the media feed.
    pub fn displayed_progress<M: MediaElement + ?Sized>(&self, media: &M) -> f32 {
        if let Some(f) = self.drag {
            return f;
        }
        if let Some(f) = self.pending {
            return f;
        }
        progress_fraction(media.current_time(), known_duration(media))
    }
}
