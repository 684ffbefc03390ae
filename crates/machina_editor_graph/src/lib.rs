// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph interaction and layout core for Machina Editor.
//!
//! This crate owns everything about an interactive finite-state machine
//! diagram except drawing it:
//! - The graph store (nodes, edges, structural invariants)
//! - The selection model (at most one selected node or edge)
//! - The gesture state machine (pointer/keyboard events into mutations)
//! - The force-directed layout engine (springs, repulsion, centering)
//!
//! ## Architecture
//!
//! A host (the render adapter) feeds classified pointer and keyboard
//! events into [`EditorState`] and calls [`EditorState::tick`] once per
//! animation frame. The host reads nodes, edges (with arrow-padded path
//! endpoints), the selection, and the tentative edge line back out to
//! draw. All state lives on the one `EditorState` instance; there are no
//! globals and no locks, the host drives everything from a single thread.

pub mod edge;
pub mod editor;
pub mod gesture;
pub mod graph;
pub mod layout;
pub mod node;
pub mod selection;

pub use edge::{Edge, EdgeKey, EdgePath};
pub use editor::{EditorConfig, EditorState};
pub use gesture::{Gesture, PointerTarget};
pub use graph::{EdgeError, Graph};
pub use layout::{LayoutEngine, LayoutParams};
pub use node::{Node, NodeId};
pub use selection::{Selected, Selection};
