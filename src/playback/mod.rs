// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback mode: the gating state machine and its media/timeline seams.

pub mod clock;
pub mod media;
pub mod player;
pub mod timeline;

pub use clock::PollLoop;
pub use media::{MediaElement, MediaError, MediaEvent, SimulatedMedia};
pub use player::{PlaybackError, PlaybackState, Player};
pub use timeline::{SeekGuard, TickMark};
