// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media engine abstraction.
//!
//! The player never talks to a decoder directly. It drives anything that
//! implements [`MediaElement`]: play, pause, seek, read the clock, and
//! drain the engine's notifications.

use std::collections::VecDeque;
use std::fmt;

/// A fault reported by the media engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    LoadFailed(String),
    Decode(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::LoadFailed(reason) => write!(f, "media failed to load: {}", reason),
            MediaError::Decode(reason) => write!(f, "media decode error: {}", reason),
        }
    }
}

impl std::error::Error for MediaError {}

/// Notifications pushed by the media engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough data is buffered to start playback.
    Ready,
    /// A seek requested through [`MediaElement::seek`] has completed.
    Seeked,
    /// Playback reached the natural end of the stream.
    Ended,
    Error(MediaError),
}

/// The host's media element.
pub trait MediaElement {
    fn is_ready(&self) -> bool;
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Request a seek. Completion is signalled by [`MediaEvent::Seeked`].
    fn seek(&mut self, time: f64);
    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// A deterministic media engine whose clock only moves when told to.
///
/// Used by the host shell when no decoder is attached, and by tests.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    duration: f64,
    time: f64,
    paused: bool,
    ready: bool,
    ended: bool,
    events: VecDeque<MediaEvent>,
}

impl SimulatedMedia {
    /// A media element that has not finished loading yet.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            time: 0.0,
            paused: true,
            ready: false,
            ended: false,
            events: VecDeque::new(),
        }
    }

    /// A media element that is already loaded.
    pub fn loaded(duration: f64) -> Self {
        let mut media = Self::new(duration);
        media.finish_loading();
        media
    }

    pub fn finish_loading(&mut self) {
        if !self.ready {
            self.ready = true;
            self.events.push_back(MediaEvent::Ready);
        }
    }

    /// Simulate an engine fault.
    pub fn fail(&mut self, error: MediaError) {
        self.paused = true;
        self.events.push_back(MediaEvent::Error(error));
    }

    /// Move the clock forward by `dt` seconds if playing.
    pub fn advance(&mut self, dt: f64) {
        if !self.ready || self.paused || self.ended {
            return;
        }
        self.time += dt.max(0.0);
        if self.time >= self.duration {
            self.time = self.duration;
            self.paused = true;
            self.ended = true;
            self.events.push_back(MediaEvent::Ended);
        }
    }
}

impl MediaElement for SimulatedMedia {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if self.ready && !self.ended {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn seek(&mut self, time: f64) {
        self.time = time.clamp(0.0, self.duration);
        self.ended = self.time >= self.duration;
        self.events.push_back(MediaEvent::Seeked);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_until_loaded() {
        let mut media = SimulatedMedia::new(5.0);
        media.play();
        media.advance(1.0);
        assert_eq!(media.current_time(), 0.0);
        media.finish_loading();
        assert_eq!(media.poll_event(), Some(MediaEvent::Ready));
    }

    #[test]
    fn test_runs_to_end() {
        let mut media = SimulatedMedia::loaded(2.0);
        media.poll_event();
        media.play();
        media.advance(1.5);
        media.advance(1.5);
        assert_eq!(media.current_time(), 2.0);
        assert!(media.is_paused());
        assert_eq!(media.poll_event(), Some(MediaEvent::Ended));
        media.play();
        assert!(media.is_paused());
    }

    #[test]
    fn test_seek_signals_completion() {
        let mut media = SimulatedMedia::loaded(10.0);
        media.poll_event();
        media.seek(42.0);
        assert_eq!(media.current_time(), 10.0);
        assert_eq!(media.poll_event(), Some(MediaEvent::Seeked));
        media.seek(3.0);
        media.play();
        assert!(!media.is_paused());
    }
}
