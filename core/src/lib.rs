pub mod config;
pub mod error;
pub mod events;
pub mod game_ids;
pub mod host;
pub mod resolver;
pub mod state;
pub mod text;

// Re-exports for convenience
pub use error::{ConfigError, ResolveError};
pub use events::{ClientEvent, ClientEventHandler, GameState, MenuAction, MenuInteraction};
pub use game_ids::*;
pub use host::{CatalogItem, ClientHost, ItemCatalog};
pub use notemark_types::{ItemId, NoteOverlayConfig};
pub use resolver::{LOGIN_RETRY_BUDGET, ResolveTask, TargetResolver, TaskOutcome};
pub use state::TargetSlot;
