use crate::game_ids::{BANKERS_NOTE, INVENTORY_CONTAINER_ID};

use super::signal::{ClientEvent, GameState, MenuAction, MenuInteraction};

/// Subscriber for client notifications.
///
/// Hosts either call the per-kind methods directly or feed raw events through
/// [`ClientEventHandler::handle_event`], which filters out everything that does
/// not concern the tracked note.
pub trait ClientEventHandler {
    /// The client finished logging in (initial login or reconnect)
    fn on_login_completed(&mut self);

    /// The player's inventory contents changed
    fn on_inventory_changed(&mut self);

    /// The tracked note was used on something
    fn on_interaction(&mut self, interaction: &MenuInteraction);

    fn handle_event(&mut self, event: &ClientEvent) {
        match event {
            ClientEvent::GameStateChanged(GameState::LoggedIn) => self.on_login_completed(),
            ClientEvent::ItemContainerChanged { container_id }
                if *container_id == INVENTORY_CONTAINER_ID =>
            {
                self.on_inventory_changed();
            }
            ClientEvent::MenuOptionClicked(interaction)
                if interaction.action == MenuAction::WidgetTargetOnWidget
                    && interaction.item_id == BANKERS_NOTE =>
            {
                self.on_interaction(interaction);
            }
            _ => {}
        }
    }
}
