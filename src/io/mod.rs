// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: persistence collaborators, autosave, serialization and
//! thumbnails.

pub mod autosave;
pub mod media;
pub mod serialization;
pub mod store;
