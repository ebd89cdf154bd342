// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Click-through demos: a recorded video with an ordered set of hotspots
//! that pause playback until the viewer clicks them.
//!
//! The crate is the engine behind a host UI. Authoring goes through
//! [`editor::Editor`], which keeps every edit undoable; playback goes
//! through [`playback::Player`], which gates a media element on each click
//! point. Both share the percent-space coordinate model in
//! [`util::geometry`].

pub mod config;
pub mod editor;
pub mod io;
pub mod models;
pub mod playback;
pub mod util;
