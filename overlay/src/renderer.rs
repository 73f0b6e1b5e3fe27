//! Banker's note overlay
//!
//! Paints the icon of the note's current target in the bottom-right corner of
//! the note's inventory slot, with an optional 1px outline. Resolution happens
//! elsewhere; this only reads the published [`TargetSlot`].

use notemark_core::{BANKERS_NOTE, TargetSlot};
use notemark_types::{ItemId, NoteOverlayConfig};
use tiny_skia::{Pixmap, PixmapPaint, Transform};

use crate::icon::IconSource;
use crate::outline::draw_outline;
use crate::utils::color_from_rgba;

/// Side length of the drawn icon in pixels
pub const ICON_SIZE: u32 = 20;

/// Gap between the icon and the slot's bottom-right corner
pub const ICON_MARGIN: i32 = 2;

/// On-screen rectangle of an inventory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SlotBounds {
    /// Top-left of a `size` icon tucked into the bottom-right corner
    pub fn icon_anchor(&self, size: u32) -> (i32, i32) {
        (
            self.x + self.width as i32 - size as i32 - ICON_MARGIN,
            self.y + self.height as i32 - size as i32 - ICON_MARGIN,
        )
    }
}

/// Locates widgets in the host's current UI layout
pub trait NoteLocator {
    /// Bounds of the first inventory slot holding `note_item`.
    ///
    /// `None` if the inventory is hidden or the note is not there.
    fn note_bounds(&self, note_item: ItemId) -> Option<SlotBounds>;
}

impl<T: NoteLocator + ?Sized> NoteLocator for &T {
    fn note_bounds(&self, note_item: ItemId) -> Option<SlotBounds> {
        (**self).note_bounds(note_item)
    }
}

/// What a successful [`OverlayRenderer::paint`] drew
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedIcon {
    pub item: ItemId,
    pub x: i32,
    pub y: i32,
    pub size: u32,
    /// Outline pixels painted (0 when the outline is disabled)
    pub outline_pixels: usize,
}

/// Draws the target icon over the banker's note
pub struct OverlayRenderer<L, I> {
    locator: L,
    icons: I,
    target: TargetSlot,
    config: NoteOverlayConfig,
}

impl<L: NoteLocator, I: IconSource> OverlayRenderer<L, I> {
    /// Create a renderer reading from `target`
    pub fn new(locator: L, icons: I, target: TargetSlot, config: NoteOverlayConfig) -> Self {
        Self {
            locator,
            icons,
            target,
            config,
        }
    }

    /// Replace the stored target
    pub fn set_target(&self, item: Option<ItemId>) {
        if self.target.set(item) {
            tracing::info!(target_id = ?item, "Overlay target item set");
        }
    }

    pub fn target(&self) -> Option<ItemId> {
        self.target.get()
    }

    /// Update the config
    pub fn set_config(&mut self, config: NoteOverlayConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &NoteOverlayConfig {
        &self.config
    }

    /// Paint one frame. Returns `None` when nothing was drawn.
    pub fn paint(&self, canvas: &mut Pixmap) -> Option<PaintedIcon> {
        let Some(item) = self.target.get() else {
            tracing::trace!("No target item set, skipping overlay");
            return None;
        };

        let Some(bounds) = self.locator.note_bounds(BANKERS_NOTE) else {
            tracing::trace!("Banker's note not visible, skipping overlay");
            return None;
        };

        let Some(icon) = self.icons.icon(item) else {
            tracing::warn!(target_id = item, "No image found for target item");
            return None;
        };

        let Some(scaled) = icon.scaled_square(ICON_SIZE) else {
            tracing::warn!(target_id = item, "Failed to scale target icon");
            return None;
        };

        let (x, y) = bounds.icon_anchor(ICON_SIZE);
        canvas.draw_pixmap(
            x,
            y,
            scaled.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        let outline_pixels = if self.config.enable_outline {
            draw_outline(canvas, &scaled, x, y, color_from_rgba(self.config.outline_color))
        } else {
            0
        };

        Some(PaintedIcon {
            item,
            x,
            y,
            size: ICON_SIZE,
            outline_pixels,
        })
    }
}
