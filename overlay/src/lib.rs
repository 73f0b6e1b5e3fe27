//! Icon overlay for the banker's note
//!
//! Rendering is done into a `tiny_skia::Pixmap` supplied by the host's render
//! pass. The overlay never resolves targets itself; it reads the
//! [`TargetSlot`](notemark_core::TargetSlot) published by the resolver.

pub mod icon;
pub mod outline;
pub mod renderer;
pub mod utils;

pub use icon::{IconDirectory, IconError, IconImage, IconSource};
pub use outline::{draw_outline, outline_pixels};
pub use renderer::{ICON_MARGIN, ICON_SIZE, NoteLocator, OverlayRenderer, PaintedIcon, SlotBounds};
