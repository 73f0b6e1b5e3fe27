use notemark_types::ItemId;

/// Login state reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    LoginScreen,
    LoggingIn,
    Loading,
    LoggedIn,
    ConnectionLost,
    Hopping,
}

/// Kind of menu entry the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// "Use X -> Y": one inventory item used on another
    WidgetTargetOnWidget,
    /// Any action the add-on does not care about
    Other,
}

/// A clicked menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuInteraction {
    pub action: MenuAction,
    /// Item the action was performed with
    pub item_id: ItemId,
    /// Raw target text of the menu entry, may contain color tags
    pub target: String,
}

/// Notifications delivered by the client on its UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    GameStateChanged(GameState),
    ItemContainerChanged { container_id: i32 },
    MenuOptionClicked(MenuInteraction),
}
