use thiserror::Error;

/// Why a single resolution attempt did not produce a target.
///
/// None of these are fatal; they feed the retry budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("inventory is not loaded yet")]
    NotReady,
    #[error("no banker's note in the inventory")]
    NoteAbsent,
    #[error("no display text for inventory slot {slot}")]
    TextMissing { slot: usize },
    #[error("no item named {name:?}")]
    NoNameMatch { name: String },
}

/// Errors from persisting the overlay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[source] confy::ConfyError),
    #[error("failed to save config: {0}")]
    Save(#[source] confy::ConfyError),
    #[error("failed to locate config file: {0}")]
    Path(#[source] confy::ConfyError),
}
