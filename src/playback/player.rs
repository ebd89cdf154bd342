// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback gating state machine.
//!
//! The player walks the click points in order. While `Playing` it samples
//! the media clock every frame; as soon as the clock reaches the next
//! unconsumed point it pauses, snaps the media back to the point's exact
//! timestamp and waits. A click inside the point's hit region (or the
//! advance control) consumes the point and resumes. Consuming the last
//! point moves the step index past the end, so the video then runs to its
//! natural end without stopping again.
//!
//! ```text
//! Init --start--> Playing --reach point--> Waiting --click--> Playing
//!                    |                                           |
//!                    +------------------ended---------------> Complete
//! any --seek--> Waiting (or Playing/Complete past the last point)
//! any --restart--> Playing
//! ```
//!
//! The player only reads the project. It never edits click points.

use super::clock::PollLoop;
use super::media::{MediaElement, MediaError, MediaEvent};
use super::timeline::{self, SeekGuard, TickMark};
use crate::io::store::{UsageEvent, UsageLogger};
use crate::models::{ClickPoint, DemoProject};
use crate::util::geometry::{area_contains, denormalize_coordinates, get_scale, Size};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// Media not started yet.
    Init,
    Playing,
    /// Paused on a click point, awaiting interaction.
    Waiting,
    /// Media reached its natural end.
    Complete,
    /// The media engine reported a fault. The host decides whether to reload.
    Error(MediaError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    MediaNotReady,
    MediaFault(MediaError),
    /// Advance was requested while not stopped on a click point.
    NotWaiting,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::MediaNotReady => write!(f, "media is not ready"),
            PlaybackError::MediaFault(err) => write!(f, "{}", err),
            PlaybackError::NotWaiting => write!(f, "not waiting on a click point"),
        }
    }
}

impl std::error::Error for PlaybackError {}

pub struct Player<M: MediaElement> {
    project: DemoProject,
    /// Click points sorted by `order`, which is also timestamp order.
    points: Vec<Arc<ClickPoint>>,
    media: M,
    state: PlaybackState,
    step_index: usize,
    completed: bool,
    seek: SeekGuard,
    poll: PollLoop,
    usage: Option<Box<dyn UsageLogger>>,
}

impl<M: MediaElement> Player<M> {
    pub fn new(project: DemoProject, media: M) -> Self {
        let mut points = project.click_points.clone();
        points.sort_by_key(|p| p.order);
        let mut poll = PollLoop::default();
        poll.start();
        log::info!(
            "Player loaded project {} with {} click points",
            project.id,
            points.len()
        );
        Self {
            project,
            points,
            media,
            state: PlaybackState::Init,
            step_index: 0,
            completed: false,
            seek: SeekGuard::default(),
            poll,
            usage: None,
        }
    }

    pub fn with_usage_logger(mut self, logger: Box<dyn UsageLogger>) -> Self {
        self.usage = Some(logger);
        self
    }

    pub fn with_poll_rate(mut self, hz: u32) -> Self {
        self.poll = PollLoop::new(hz);
        self.poll.start();
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Index into the ordered click points of the next point to consume.
    /// Equal to the point count once every point is consumed.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_seeking(&self) -> bool {
        self.seek.is_seeking()
    }

    pub fn project(&self) -> &DemoProject {
        &self.project
    }

    pub fn points(&self) -> &[Arc<ClickPoint>] {
        &self.points
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn current_time(&self) -> f64 {
        self.media.current_time()
    }

    pub fn duration(&self) -> f64 {
        self.media.duration()
    }

    pub fn poll_loop(&self) -> &PollLoop {
        &self.poll
    }

    /// The point whose hit region is live. Only exists while `Waiting`.
    pub fn active_point(&self) -> Option<&ClickPoint> {
        match self.state {
            PlaybackState::Waiting => self.points.get(self.step_index).map(|p| p.as_ref()),
            _ => None,
        }
    }

    /// "Step i of N", if the project shows a step counter.
    pub fn step_label(&self) -> Option<String> {
        let total = self.points.len();
        if !self.project.settings.show_step_counter || total == 0 {
            return None;
        }
        let current = (self.step_index + 1).min(total);
        Some(format!("Step {} of {}", current, total))
    }

    pub fn tick_marks(&self) -> Vec<TickMark> {
        timeline::tick_marks(&self.points, self.duration())
    }

    fn check_usable(&self) -> Result<(), PlaybackError> {
        if let PlaybackState::Error(err) = &self.state {
            return Err(PlaybackError::MediaFault(err.clone()));
        }
        if !self.media.is_ready() {
            return Err(PlaybackError::MediaNotReady);
        }
        Ok(())
    }

    fn log_usage(&self, event: UsageEvent) {
        if let Some(logger) = &self.usage {
            if let Err(e) = logger.log_usage_event(&self.project.id, event) {
                log::warn!("Dropped usage event {}: {:#}", event.as_str(), e);
            }
        }
    }

    /// User pressed play. There is no autoplay.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        self.check_usable()?;
        if self.state != PlaybackState::Init {
            return Ok(());
        }
        self.media.play();
        self.state = PlaybackState::Playing;
        self.poll.start();
        self.log_usage(UsageEvent::Start);
        log::info!("Playback started at {:.2}s", self.current_time());
        // Cued past every point at the very end: nothing left to play.
        if self.step_index >= self.points.len() && self.current_time() >= self.duration() {
            self.media.pause();
            self.complete();
        }
        Ok(())
    }

    /// Run one poll if the frame loop says one is due.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        if self.poll.due(now) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Drain media notifications, then compare the clock against the next
    /// click point.
    pub fn tick(&mut self) -> &PlaybackState {
        while let Some(event) = self.media.poll_event() {
            self.handle_media_event(event);
        }
        if self.state == PlaybackState::Playing && !self.seek.is_seeking() && self.next_point_due() {
            self.gate();
        }
        &self.state
    }

    fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Ready => log::debug!("Media ready"),
            MediaEvent::Seeked => self.seek.complete(),
            MediaEvent::Ended => {
                if self.state != PlaybackState::Playing {
                    return;
                }
                // A point sitting at the very end still has to be clicked.
                if self.next_point_due() {
                    self.gate();
                } else {
                    self.complete();
                }
            }
            MediaEvent::Error(err) => {
                log::error!("Media fault: {}", err);
                self.media.pause();
                self.seek.complete();
                self.state = PlaybackState::Error(err);
            }
        }
    }

    fn next_point_due(&self) -> bool {
        self.points
            .get(self.step_index)
            .map_or(false, |p| self.media.current_time() >= p.timestamp)
    }

    /// Pause on the next point and snap the media to its exact timestamp.
    fn gate(&mut self) {
        let Some(point) = self.points.get(self.step_index) else {
            return;
        };
        let timestamp = point.timestamp;
        let overshoot = self.media.current_time() - timestamp;
        self.media.pause();
        self.media.seek(timestamp);
        self.seek.begin();
        self.state = PlaybackState::Waiting;
        log::info!(
            "Waiting on click point {} at {:.2}s (overshoot {:.3}s)",
            point.order,
            timestamp,
            overshoot
        );
    }

    fn complete(&mut self) {
        self.state = PlaybackState::Complete;
        if !self.completed {
            self.completed = true;
            self.log_usage(UsageEvent::Complete);
        }
        log::info!("Playback complete");
    }

    /// Pointer press on the video at container-relative pixels.
    ///
    /// Returns whether it landed in the active point's hit region. Outside
    /// `Waiting` there is no hit region and this always returns `false`.
    pub fn click(&mut self, pointer: (f64, f64), display: Size) -> Result<bool, PlaybackError> {
        let Some(point) = self.active_point() else {
            return Ok(false);
        };
        let center = denormalize_coordinates(&point.position, display);
        let scale = get_scale(display.width, self.project.video.width as f64);
        if !area_contains(&point.area, center, pointer, scale) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Consume the current point and resume.
    pub fn advance(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Waiting {
            return Err(PlaybackError::NotWaiting);
        }
        self.step_index += 1;
        self.media.play();
        self.state = PlaybackState::Playing;
        if self.step_index >= self.points.len() {
            log::info!("Final click point consumed, playing to the end");
            // A last point pinned to the final frame leaves nothing to play.
            if self.current_time() >= self.duration() {
                self.complete();
            }
        }
        Ok(())
    }

    /// Jump to `target` seconds and re-derive the next click point.
    ///
    /// If a point lies at or after the target the player pauses there in
    /// `Waiting` with that point active. Past the last point it resumes,
    /// or completes if the target is the end of the video.
    ///
    /// Before `start` this only cues the media: the player stays in `Init`
    /// and playback begins from the target once the user presses play.
    pub fn seek(&mut self, target: f64) -> Result<(), PlaybackError> {
        self.check_usable()?;
        let duration = self.duration();
        let time = timeline::scrub_to_time(target, duration);

        self.media.pause();
        self.media.seek(time);
        self.seek.begin();
        self.step_index = timeline::step_index_for_time(&self.points, time);
        self.completed = false;

        if self.state == PlaybackState::Init {
            log::info!("Cued to {:.2}s, step {} of {}", time, self.step_index, self.points.len());
        } else if self.step_index < self.points.len() {
            self.state = PlaybackState::Waiting;
        } else if time >= duration {
            self.state = PlaybackState::Complete;
            self.completed = true;
        } else {
            self.media.play();
            self.state = PlaybackState::Playing;
        }
        log::info!(
            "Seeked to {:.2}s, step {} of {}, state {:?}",
            time,
            self.step_index,
            self.points.len(),
            self.state
        );
        Ok(())
    }

    /// Handler for the scrub control's value-changed notification.
    ///
    /// Ignored while a seek is still in flight so that programmatic seeks
    /// cannot trigger further seeks. Returns whether a seek was issued.
    pub fn on_scrub(&mut self, value: f64) -> Result<bool, PlaybackError> {
        if self.seek.is_seeking() {
            return Ok(false);
        }
        let target = timeline::scrub_to_time(value, self.duration());
        self.seek(target)?;
        Ok(true)
    }

    /// Back to the first point, playing from zero.
    pub fn restart(&mut self) -> Result<(), PlaybackError> {
        self.check_usable()?;
        self.media.seek(0.0);
        self.seek.begin();
        self.step_index = 0;
        self.completed = false;
        self.media.play();
        self.state = PlaybackState::Playing;
        self.poll.start();
        self.log_usage(UsageEvent::Start);
        log::info!("Playback restarted");
        Ok(())
    }

    /// Swap in a fresh media element after a fault and return to `Init`.
    pub fn reload(&mut self, media: M) {
        self.media = media;
        self.state = PlaybackState::Init;
        self.step_index = 0;
        self.completed = false;
        self.seek = SeekGuard::default();
        self.poll.start();
        log::info!("Media reloaded");
    }

    /// Stop polling and pause. Called when the player is torn down.
    pub fn teardown(&mut self) {
        self.poll.cancel();
        self.media.pause();
    }
}

impl<M: MediaElement> Drop for Player<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClickArea, Point, VideoInfo};
    use crate::playback::media::SimulatedMedia;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: f64 = 1.0 / 60.0;

    fn project(timestamps: &[f64]) -> DemoProject {
        let video = VideoInfo {
            id: "vid".to_string(),
            duration: 10.0,
            width: 1000,
            height: 500,
            thumbnail: None,
        };
        let mut project = DemoProject::new_for_video("demo".to_string(), "Tour".to_string(), video);
        for (i, &t) in timestamps.iter().enumerate() {
            project
                .click_points
                .push(Arc::new(ClickPoint::new(t, Point::new(50.0, 50.0), i as u32 + 1)));
        }
        project
    }

    fn player(timestamps: &[f64]) -> Player<SimulatedMedia> {
        let mut player = Player::new(project(timestamps), SimulatedMedia::loaded(10.0));
        player.tick();
        player
    }

    /// Advance frame by frame until the state leaves `Playing`.
    fn run_until_stop(player: &mut Player<SimulatedMedia>) {
        for _ in 0..2000 {
            player.media_mut().advance(FRAME);
            player.tick();
            if *player.state() != PlaybackState::Playing {
                break;
            }
        }
        // Deliver the snap seek's completion.
        player.tick();
    }

    const DISPLAY: Size = Size {
        width: 500.0,
        height: 250.0,
    };
    const CENTER: (f64, f64) = (250.0, 125.0);

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl UsageLogger for Recorder {
        fn log_usage_event(&self, _project_id: &str, event: UsageEvent) -> anyhow::Result<()> {
            self.0.borrow_mut().push(event.as_str());
            Ok(())
        }
    }

    struct Failing;

    impl UsageLogger for Failing {
        fn log_usage_event(&self, _project_id: &str, _event: UsageEvent) -> anyhow::Result<()> {
            anyhow::bail!("analytics offline")
        }
    }

    #[test]
    fn test_gating_scenario() {
        let mut player = player(&[2.0, 5.0, 9.0]);
        assert_eq!(*player.state(), PlaybackState::Init);
        assert!(player.active_point().is_none());

        player.start().unwrap();
        assert_eq!(*player.state(), PlaybackState::Playing);

        for (step, expected) in [(0usize, 2.0), (1, 5.0), (2, 9.0)] {
            run_until_stop(&mut player);
            assert_eq!(*player.state(), PlaybackState::Waiting);
            assert_eq!(player.current_time(), expected);
            assert_eq!(player.step_index(), step);
            assert!(player.media().is_paused());
            assert_eq!(player.active_point().unwrap().timestamp, expected);

            assert_eq!(player.click(CENTER, DISPLAY), Ok(true));
            assert_eq!(*player.state(), PlaybackState::Playing);
            assert_eq!(player.step_index(), step + 1);
        }

        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);
        assert_eq!(player.current_time(), 10.0);
        assert_eq!(player.step_index(), 3);
        assert!(player.is_complete());
    }

    #[test]
    fn test_snap_corrects_overshoot() {
        let mut player = player(&[2.0]);
        player.start().unwrap();
        // One coarse frame lands well past the point.
        player.media_mut().advance(2.4);
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Waiting);
        assert_eq!(player.current_time(), 2.0);
        assert!(player.is_seeking());
        player.tick();
        assert!(!player.is_seeking());
    }

    #[test]
    fn test_click_outside_region_is_ignored() {
        let mut player = player(&[2.0]);
        player.start().unwrap();
        run_until_stop(&mut player);

        // Radius 30 native px at half scale is 15 display px.
        assert_eq!(player.click((250.0 + 16.0, 125.0), DISPLAY), Ok(false));
        assert_eq!(*player.state(), PlaybackState::Waiting);
        assert_eq!(player.click((250.0 + 14.0, 125.0), DISPLAY), Ok(true));
    }

    #[test]
    fn test_rectangle_region() {
        let mut project = project(&[1.0]);
        Arc::make_mut(&mut project.click_points[0]).area = ClickArea::Rectangle {
            width: 200.0,
            height: 40.0,
        };
        let mut player = Player::new(project, SimulatedMedia::loaded(10.0));
        player.start().unwrap();
        run_until_stop(&mut player);
        assert_eq!(player.click((250.0 + 49.0, 125.0 + 9.0), DISPLAY), Ok(true));
    }

    #[test]
    fn test_no_hit_region_while_playing() {
        let mut player = player(&[5.0]);
        player.start().unwrap();
        player.media_mut().advance(1.0);
        player.tick();
        assert_eq!(player.click(CENTER, DISPLAY), Ok(false));
        assert_eq!(player.advance(), Err(PlaybackError::NotWaiting));
        assert_eq!(player.step_index(), 0);
    }

    #[test]
    fn test_start_requires_ready_media() {
        let mut player = Player::new(project(&[1.0]), SimulatedMedia::new(10.0));
        assert_eq!(player.start(), Err(PlaybackError::MediaNotReady));
        player.media_mut().finish_loading();
        player.tick();
        assert!(player.start().is_ok());
    }

    #[test]
    fn test_manual_rewind_from_complete() {
        let mut player = player(&[2.0, 5.0, 9.0]);
        player.start().unwrap();
        for _ in 0..3 {
            run_until_stop(&mut player);
            player.advance().unwrap();
        }
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);

        player.seek(3.0).unwrap();
        assert_eq!(*player.state(), PlaybackState::Waiting);
        assert_eq!(player.step_index(), 1);
        assert_eq!(player.active_point().unwrap().timestamp, 5.0);
        assert!(!player.is_complete());
        assert_eq!(player.current_time(), 3.0);
    }

    #[test]
    fn test_seek_past_last_point_resumes() {
        let mut player = player(&[2.0, 5.0]);
        player.start().unwrap();
        player.seek(7.0).unwrap();
        assert_eq!(*player.state(), PlaybackState::Playing);
        assert_eq!(player.step_index(), 2);
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);

        player.seek(10.0).unwrap();
        assert_eq!(*player.state(), PlaybackState::Complete);
    }

    #[test]
    fn test_seek_before_start_only_cues() {
        let recorder = Recorder::default();
        let mut player = player(&[2.0, 5.0]).with_usage_logger(Box::new(recorder.clone()));
        player.seek(7.0).unwrap();
        assert_eq!(*player.state(), PlaybackState::Init);
        assert!(player.media().is_paused());
        assert_eq!(player.step_index(), 2);
        assert_eq!(player.current_time(), 7.0);
        assert!(player.active_point().is_none());

        player.media_mut().advance(1.0);
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Init);
        assert_eq!(player.current_time(), 7.0);

        player.start().unwrap();
        assert_eq!(*player.state(), PlaybackState::Playing);
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);
        assert_eq!(*recorder.0.borrow(), vec!["start", "complete"]);
    }

    #[test]
    fn test_seek_before_start_gates_on_next_point() {
        let mut player = player(&[2.0, 5.0]);
        player.seek(3.0).unwrap();
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Init);
        assert_eq!(player.step_index(), 1);

        player.start().unwrap();
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Waiting);
        assert_eq!(player.current_time(), 5.0);
        assert_eq!(player.active_point().unwrap().order, 2);
    }

    #[test]
    fn test_start_cued_at_end_completes() {
        let recorder = Recorder::default();
        let mut player = player(&[2.0]).with_usage_logger(Box::new(recorder.clone()));
        player.seek(10.0).unwrap();
        assert_eq!(*player.state(), PlaybackState::Init);
        player.start().unwrap();
        assert_eq!(*player.state(), PlaybackState::Complete);
        assert_eq!(*recorder.0.borrow(), vec!["start", "complete"]);
    }

    #[test]
    fn test_scrub_ignored_while_seeking() {
        let mut player = player(&[2.0, 5.0]);
        player.start().unwrap();
        assert_eq!(player.on_scrub(6.0), Ok(true));
        assert!(player.is_seeking());
        assert_eq!(player.on_scrub(1.0), Ok(false));
        assert_eq!(player.current_time(), 6.0);

        player.tick();
        assert!(!player.is_seeking());
        assert_eq!(player.on_scrub(1.0), Ok(true));
        assert_eq!(player.step_index(), 0);
    }

    #[test]
    fn test_restart() {
        let mut player = player(&[2.0]);
        player.start().unwrap();
        run_until_stop(&mut player);
        player.advance().unwrap();
        run_until_stop(&mut player);
        assert!(player.is_complete());

        player.restart().unwrap();
        assert_eq!(*player.state(), PlaybackState::Playing);
        assert_eq!(player.step_index(), 0);
        assert_eq!(player.current_time(), 0.0);
        assert!(!player.is_complete());
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Waiting);
    }

    #[test]
    fn test_point_at_end_of_video_still_gates() {
        let mut player = player(&[10.0]);
        player.start().unwrap();
        player.media_mut().advance(11.0);
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Waiting);
        player.tick();
        player.advance().unwrap();
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Complete);
    }

    #[test]
    fn test_media_fault() {
        let mut player = player(&[2.0]);
        player.start().unwrap();
        player
            .media_mut()
            .fail(MediaError::Decode("corrupt frame".to_string()));
        player.tick();
        assert!(matches!(player.state(), PlaybackState::Error(_)));
        assert!(matches!(player.restart(), Err(PlaybackError::MediaFault(_))));
        assert!(matches!(player.seek(1.0), Err(PlaybackError::MediaFault(_))));

        player.reload(SimulatedMedia::loaded(10.0));
        player.tick();
        assert_eq!(*player.state(), PlaybackState::Init);
        assert!(player.start().is_ok());
    }

    #[test]
    fn test_usage_events() {
        let recorder = Recorder::default();
        let mut player = player(&[]).with_usage_logger(Box::new(recorder.clone()));
        player.start().unwrap();
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);
        assert_eq!(*recorder.0.borrow(), vec!["start", "complete"]);
    }

    #[test]
    fn test_usage_failure_does_not_affect_playback() {
        let mut player = player(&[]).with_usage_logger(Box::new(Failing));
        assert!(player.start().is_ok());
        run_until_stop(&mut player);
        assert_eq!(*player.state(), PlaybackState::Complete);
    }

    #[test]
    fn test_step_label_and_ticks() {
        let mut player = player(&[2.0, 5.0]);
        assert_eq!(player.step_label().as_deref(), Some("Step 1 of 2"));
        player.seek(9.0).unwrap();
        assert_eq!(player.step_label().as_deref(), Some("Step 2 of 2"));
        let ticks = player.tick_marks();
        assert_eq!(ticks[0].percent, 20.0);
        assert_eq!(ticks[1].percent, 50.0);
    }

    #[test]
    fn test_frame_loop_and_teardown() {
        let mut player = player(&[2.0]);
        let now = Instant::now();
        assert!(player.on_frame(now));
        assert!(!player.on_frame(now));
        player.teardown();
        assert!(!player.poll_loop().is_running());
        assert!(!player.on_frame(now + std::time::Duration::from_secs(1)));
    }
}
