//! Well-known client identifiers.

use notemark_types::ItemId;

/// Item-type id of the banker's note, the tracked note item.
pub const BANKERS_NOTE: ItemId = 28767;

/// Item container id of the player's inventory.
pub const INVENTORY_CONTAINER_ID: i32 = 93;
