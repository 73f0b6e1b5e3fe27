use notemark_types::ItemId;

use crate::error::ResolveError;
use crate::events::{ClientEventHandler, MenuAction, MenuInteraction};
use crate::game_ids::BANKERS_NOTE;
use crate::host::{ClientHost, ItemCatalog};
use crate::state::TargetSlot;
use crate::text::{item_id_from_text, lookup_exact, sanitize};

use super::task::ResolveTask;

/// Result of running one queued [`ResolveTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The attempt found a target
    Resolved(ItemId),
    /// The attempt failed and a follow-up task was queued
    Rescheduled(ResolveTask),
    /// The attempt failed with no retries left; target is none
    Settled,
    /// The resolver is shut down; the task was dropped
    Skipped,
}

/// Owns resolution of the banker's note target.
///
/// All methods must be called on the host's UI thread. The only state shared
/// with the render pass is the [`TargetSlot`].
pub struct TargetResolver<H, C> {
    host: H,
    catalog: C,
    target: TargetSlot,
    active: bool,
}

impl<H: ClientHost, C: ItemCatalog> TargetResolver<H, C> {
    /// Create a resolver publishing into `target`. Inactive until [`Self::on_startup`].
    pub fn new(host: H, catalog: C, target: TargetSlot) -> Self {
        Self {
            host,
            catalog,
            target,
            active: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Currently published target
    pub fn target(&self) -> Option<ItemId> {
        self.target.get()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Add-on activated. Starts a sequence right away if already logged in.
    pub fn on_startup(&mut self) {
        tracing::info!("Starting banker's note resolver");
        self.active = true;
        self.publish(None);

        if self.host.is_logged_in() {
            self.host.defer(ResolveTask::sequence());
        }
    }

    /// Add-on deactivated. Queued tasks that fire afterwards are dropped.
    pub fn on_shutdown(&mut self) {
        tracing::info!("Banker's note resolver stopped");
        self.active = false;
        self.publish(None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Task execution
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a task previously handed to [`ClientHost::defer`].
    pub fn run_task(&mut self, task: ResolveTask) -> TaskOutcome {
        if !self.active {
            tracing::debug!(?task, "Resolver inactive, dropping task");
            return TaskOutcome::Skipped;
        }

        if task.has_attempt() {
            if let Ok(id) = self.resolve_once() {
                if matches!(task, ResolveTask::Sequence { .. }) {
                    tracing::info!(target_id = id, "Note target initialized");
                }
                return TaskOutcome::Resolved(id);
            }
        }

        match task.after_failure() {
            Some(next) => {
                self.host.defer(next);
                TaskOutcome::Rescheduled(next)
            }
            None => {
                if matches!(task, ResolveTask::Sequence { .. }) {
                    tracing::warn!("Note target unresolved after retry budget, giving up");
                }
                self.publish(None);
                TaskOutcome::Settled
            }
        }
    }

    /// One resolution pass over the current inventory and UI text.
    ///
    /// Publishes the result: the resolved id on success, none on any failure.
    /// Repeated calls against unchanged client state publish the same value.
    pub fn resolve_once(&self) -> Result<ItemId, ResolveError> {
        let result = self.find_target();
        match &result {
            Ok(id) => self.publish(Some(*id)),
            Err(e) => {
                tracing::debug!(reason = %e, "Resolution attempt failed");
                self.publish(None);
            }
        }
        result
    }

    fn find_target(&self) -> Result<ItemId, ResolveError> {
        let items = self.host.inventory_items().ok_or(ResolveError::NotReady)?;

        // Only the first note in slot order is considered
        let slot = items
            .iter()
            .position(|id| *id == BANKERS_NOTE)
            .ok_or(ResolveError::NoteAbsent)?;

        let raw = self
            .host
            .slot_text(slot)
            .ok_or(ResolveError::TextMissing { slot })?;

        let name = sanitize(&raw);
        lookup_exact(&self.catalog, &name).ok_or(ResolveError::NoNameMatch { name })
    }

    fn publish(&self, target: Option<ItemId>) {
        if self.target.set(target) {
            tracing::info!(target_id = ?self.target.get(), "Note target changed");
        }
    }
}

impl<H: ClientHost, C: ItemCatalog> ClientEventHandler for TargetResolver<H, C> {
    fn on_login_completed(&mut self) {
        if !self.active {
            return;
        }
        self.host.defer(ResolveTask::sequence());
    }

    fn on_inventory_changed(&mut self) {
        if !self.active {
            return;
        }
        self.host.defer(ResolveTask::debounced());
    }

    fn on_interaction(&mut self, interaction: &MenuInteraction) {
        if !self.active
            || interaction.action != MenuAction::WidgetTargetOnWidget
            || interaction.item_id != BANKERS_NOTE
        {
            return;
        }

        match item_id_from_text(&self.catalog, &interaction.target) {
            Some(id) => self.publish(Some(id)),
            None => {
                tracing::debug!(
                    target_text = %interaction.target,
                    "Menu target did not name an item, rechecking inventory"
                );
                self.host.defer(ResolveTask::debounced());
            }
        }
    }
}
