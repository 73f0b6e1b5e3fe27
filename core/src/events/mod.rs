pub mod handler;
pub mod signal;

pub use handler::ClientEventHandler;
pub use signal::{ClientEvent, GameState, MenuAction, MenuInteraction};
