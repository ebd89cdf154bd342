// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Authoring mode: undoable edits over a loaded project.

pub mod authoring;
pub mod drag;
pub mod error;
pub mod history;

pub use authoring::Editor;
pub use drag::{DragSession, DragTarget, PointerCapture};
pub use error::EditError;
pub use history::History;
