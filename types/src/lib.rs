//! Shared configuration types for notemark.
//!
//! These are the values the host persists on behalf of the add-on and pushes
//! into the overlay. Every field has a serde default so partially written
//! config files still load.

use serde::{Deserialize, Serialize};

/// Item-type identifier as used by the game client.
///
/// Only positive values name real items; anything `<= 0` is treated as "none".
pub type ItemId = i32;

/// Default outline color (opaque yellow).
pub const DEFAULT_OUTLINE_COLOR: [u8; 4] = [255, 255, 0, 255];

/// Appearance settings for the note overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteOverlayConfig {
    /// Color (RGBA) used for the icon outline
    pub outline_color: [u8; 4],
    /// Whether to draw the 1px outline around the icon
    pub enable_outline: bool,
}

impl Default for NoteOverlayConfig {
    fn default() -> Self {
        Self {
            outline_color: DEFAULT_OUTLINE_COLOR,
            enable_outline: true,
        }
    }
}
