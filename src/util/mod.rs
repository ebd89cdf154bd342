// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Stateless helpers shared by authoring, playback and rendering.

pub mod geometry;
pub mod time;
