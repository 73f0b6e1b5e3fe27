//! Tests for the target resolver
//!
//! Drives the resolver through a mock client whose task queue is pumped by hand.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use notemark_types::ItemId;

use super::{LOGIN_RETRY_BUDGET, ResolveTask, TargetResolver, TaskOutcome};
use crate::error::ResolveError;
use crate::events::{ClientEvent, ClientEventHandler, GameState, MenuAction, MenuInteraction};
use crate::game_ids::{BANKERS_NOTE, INVENTORY_CONTAINER_ID};
use crate::host::{CatalogItem, ClientHost, ItemCatalog};
use crate::state::TargetSlot;

const SHARK: ItemId = 385;
const BONES: ItemId = 532;
const DRAGON_BONES: ItemId = 536;
const COINS: ItemId = 995;

#[derive(Default)]
struct MockClient {
    logged_in: Cell<bool>,
    inventory: RefCell<Option<Vec<ItemId>>>,
    texts: RefCell<HashMap<usize, String>>,
    /// Inventory reads that report "not ready" before the real contents show up
    not_ready_reads: Cell<u32>,
    inventory_reads: Cell<u32>,
    queue: RefCell<VecDeque<ResolveTask>>,
}

impl MockClient {
    fn with_note(slot_items: Vec<ItemId>, note_slot: usize, text: &str) -> Self {
        let client = Self::default();
        client.logged_in.set(true);
        *client.inventory.borrow_mut() = Some(slot_items);
        client.texts.borrow_mut().insert(note_slot, text.to_string());
        client
    }

    fn not_ready() -> Self {
        let client = Self::default();
        client.logged_in.set(true);
        client
    }

    fn pop_task(&self) -> Option<ResolveTask> {
        self.queue.borrow_mut().pop_front()
    }

    fn queued(&self) -> Vec<ResolveTask> {
        self.queue.borrow().iter().copied().collect()
    }
}

impl ClientHost for MockClient {
    fn is_logged_in(&self) -> bool {
        self.logged_in.get()
    }

    fn inventory_items(&self) -> Option<Vec<ItemId>> {
        self.inventory_reads.set(self.inventory_reads.get() + 1);
        let pending = self.not_ready_reads.get();
        if pending > 0 {
            self.not_ready_reads.set(pending - 1);
            return None;
        }
        self.inventory.borrow().clone()
    }

    fn slot_text(&self, slot: usize) -> Option<String> {
        self.texts.borrow().get(&slot).cloned()
    }

    fn defer(&self, task: ResolveTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

/// Substring search, like the client's fuzzy item search
struct MockCatalog(Vec<CatalogItem>);

impl MockCatalog {
    fn standard() -> Self {
        Self(vec![
            CatalogItem::new(SHARK, "Shark"),
            CatalogItem::new(DRAGON_BONES, "Dragon bones"),
            CatalogItem::new(BONES, "Bones"),
            CatalogItem::new(COINS, "Coins"),
        ])
    }
}

impl ItemCatalog for MockCatalog {
    fn search(&self, query: &str) -> Vec<CatalogItem> {
        let query = query.to_lowercase();
        self.0
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

type Resolver = TargetResolver<MockClient, MockCatalog>;

fn make_resolver(client: MockClient) -> Resolver {
    TargetResolver::new(client, MockCatalog::standard(), TargetSlot::new())
}

/// Run queued tasks until the queue is empty
fn pump(resolver: &mut Resolver) -> Vec<TaskOutcome> {
    let mut outcomes = Vec::new();
    while let Some(task) = resolver.host().pop_task() {
        outcomes.push(resolver.run_task(task));
    }
    outcomes
}

/// Activate without queueing a login sequence
fn activate_logged_out(resolver: &mut Resolver) {
    let logged_in = resolver.host().logged_in.replace(false);
    resolver.on_startup();
    resolver.host().logged_in.set(logged_in);
}

fn use_note_on(target: &str) -> MenuInteraction {
    MenuInteraction {
        action: MenuAction::WidgetTargetOnWidget,
        item_id: BANKERS_NOTE,
        target: target.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_startup_logged_out_schedules_nothing() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Shark");
    client.logged_in.set(false);
    let mut resolver = make_resolver(client);

    resolver.on_startup();

    assert!(resolver.is_active());
    assert_eq!(resolver.target(), None);
    assert!(resolver.host().queued().is_empty());
}

#[test]
fn test_startup_logged_in_resolves() {
    let client = MockClient::with_note(vec![COINS, BANKERS_NOTE], 1, "<col=ff9040>Shark</col>");
    let mut resolver = make_resolver(client);

    resolver.on_startup();
    assert_eq!(resolver.host().queued(), vec![ResolveTask::sequence()]);

    let outcomes = pump(&mut resolver);
    assert_eq!(outcomes, vec![TaskOutcome::Resolved(SHARK)]);
    assert_eq!(resolver.target(), Some(SHARK));
}

#[test]
fn test_startup_resets_previous_target() {
    let target = TargetSlot::new();
    target.set(Some(COINS));
    let client = MockClient::not_ready();
    client.logged_in.set(false);
    let mut resolver = TargetResolver::new(client, MockCatalog::standard(), target.clone());

    resolver.on_startup();
    assert_eq!(target.get(), None);
}

#[test]
fn test_shutdown_clears_and_drops_stale_tasks() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Shark");
    let mut resolver = make_resolver(client);
    resolver.on_startup();
    pump(&mut resolver);
    assert_eq!(resolver.target(), Some(SHARK));

    resolver.on_inventory_changed();
    resolver.on_shutdown();
    assert_eq!(resolver.target(), None);

    let outcomes = pump(&mut resolver);
    assert_eq!(outcomes, vec![TaskOutcome::Skipped]);
    assert_eq!(resolver.target(), None);
}

#[test]
fn test_events_ignored_while_inactive() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Shark");
    let mut resolver = make_resolver(client);

    resolver.on_login_completed();
    resolver.on_inventory_changed();
    resolver.on_interaction(&use_note_on("Shark"));

    assert!(resolver.host().queued().is_empty());
    assert_eq!(resolver.target(), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Login retry sequence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_login_sequence_gives_up_after_budget() {
    let client = MockClient::not_ready();
    client.logged_in.set(false);
    let mut resolver = make_resolver(client);
    resolver.on_startup();

    resolver.on_login_completed();
    let outcomes = pump(&mut resolver);

    assert_eq!(
        resolver.host().inventory_reads.get(),
        LOGIN_RETRY_BUDGET as u32
    );
    assert_eq!(outcomes.len(), LOGIN_RETRY_BUDGET as usize);
    assert_eq!(outcomes.last(), Some(&TaskOutcome::Settled));
    assert_eq!(resolver.target(), None);
    assert!(resolver.host().queued().is_empty());
}

#[test]
fn test_login_sequence_tolerates_slow_inventory() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Dragon bones");
    client.logged_in.set(false);
    client.not_ready_reads.set(3);
    let mut resolver = make_resolver(client);
    resolver.on_startup();

    resolver.on_login_completed();
    let outcomes = pump(&mut resolver);

    assert_eq!(
        outcomes,
        vec![
            TaskOutcome::Rescheduled(ResolveTask::Sequence {
                attempts_remaining: 4
            }),
            TaskOutcome::Rescheduled(ResolveTask::Sequence {
                attempts_remaining: 3
            }),
            TaskOutcome::Rescheduled(ResolveTask::Sequence {
                attempts_remaining: 2
            }),
            TaskOutcome::Resolved(DRAGON_BONES),
        ]
    );
    assert_eq!(resolver.target(), Some(DRAGON_BONES));
}

#[test]
fn test_missing_note_counts_against_sequence() {
    let client = MockClient::with_note(vec![COINS, SHARK], 0, "Coins");
    let mut resolver = make_resolver(client);
    resolver.on_startup();

    let outcomes = pump(&mut resolver);
    assert_eq!(outcomes.len(), LOGIN_RETRY_BUDGET as usize);
    assert_eq!(resolver.target(), None);
}

#[test]
fn test_relogin_restarts_full_budget() {
    let client = MockClient::not_ready();
    let mut resolver = make_resolver(client);
    resolver.on_startup();
    pump(&mut resolver);

    resolver.handle_event(&ClientEvent::GameStateChanged(GameState::ConnectionLost));
    resolver.handle_event(&ClientEvent::GameStateChanged(GameState::LoggedIn));
    pump(&mut resolver);

    assert_eq!(
        resolver.host().inventory_reads.get(),
        2 * LOGIN_RETRY_BUDGET as u32
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Debounced inventory checks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_inventory_change_retries_exactly_once() {
    let client = MockClient::not_ready();
    let mut resolver = make_resolver(client);
    activate_logged_out(&mut resolver);

    resolver.on_inventory_changed();
    let outcomes = pump(&mut resolver);

    assert_eq!(
        outcomes,
        vec![
            TaskOutcome::Rescheduled(ResolveTask::Debounced { retry: false }),
            TaskOutcome::Settled,
        ]
    );
    assert_eq!(resolver.host().inventory_reads.get(), 2);
}

#[test]
fn test_inventory_change_resolves_on_retry() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Bones");
    client.not_ready_reads.set(1);
    let mut resolver = make_resolver(client);
    activate_logged_out(&mut resolver);

    resolver.on_inventory_changed();
    let outcomes = pump(&mut resolver);

    assert_eq!(outcomes.last(), Some(&TaskOutcome::Resolved(BONES)));
    assert_eq!(resolver.target(), Some(BONES));
}

#[test]
fn test_note_removed_clears_target() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Shark");
    let mut resolver = make_resolver(client);
    resolver.on_startup();
    pump(&mut resolver);
    assert_eq!(resolver.target(), Some(SHARK));

    *resolver.host().inventory.borrow_mut() = Some(vec![SHARK]);
    resolver.handle_event(&ClientEvent::ItemContainerChanged {
        container_id: INVENTORY_CONTAINER_ID,
    });
    pump(&mut resolver);

    assert_eq!(resolver.target(), None);
}

#[test]
fn test_sequence_and_debounce_budgets_are_independent() {
    let client = MockClient::not_ready();
    client.logged_in.set(false);
    let mut resolver = make_resolver(client);
    resolver.on_startup();

    resolver.on_login_completed();
    resolver.on_inventory_changed();
    pump(&mut resolver);

    assert_eq!(
        resolver.host().inventory_reads.get(),
        LOGIN_RETRY_BUDGET as u32 + 2
    );
    assert!(resolver.host().queued().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Menu interactions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_interaction_fast_path() {
    let client = MockClient::not_ready();
    let mut resolver = make_resolver(client);
    activate_logged_out(&mut resolver);

    resolver.on_interaction(&use_note_on("<col=ffff00>Shark</col>"));

    assert_eq!(resolver.target(), Some(SHARK));
    assert!(resolver.host().queued().is_empty());
    assert_eq!(resolver.host().inventory_reads.get(), 0);
}

#[test]
fn test_interaction_without_item_name_falls_back() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Coins");
    let mut resolver = make_resolver(client);
    activate_logged_out(&mut resolver);

    resolver.on_interaction(&use_note_on("<col=ff9040>Something odd</col>"));
    assert_eq!(resolver.host().queued(), vec![ResolveTask::debounced()]);

    pump(&mut resolver);
    assert_eq!(resolver.target(), Some(COINS));
}

#[test]
fn test_interaction_with_other_item_ignored() {
    let client = MockClient::not_ready();
    let mut resolver = make_resolver(client);
    activate_logged_out(&mut resolver);

    resolver.handle_event(&ClientEvent::MenuOptionClicked(MenuInteraction {
        action: MenuAction::WidgetTargetOnWidget,
        item_id: COINS,
        target: "Shark".to_string(),
    }));
    resolver.on_interaction(&MenuInteraction {
        action: MenuAction::Other,
        item_id: BANKERS_NOTE,
        target: "Shark".to_string(),
    });

    assert_eq!(resolver.target(), None);
    assert!(resolver.host().queued().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Single attempts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_resolve_once_is_idempotent() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "<col=ff9040>Bones</col>");
    let resolver = make_resolver(client);

    let first = resolver.resolve_once();
    let second = resolver.resolve_once();
    assert_eq!(first, Ok(BONES));
    assert_eq!(first, second);
    assert_eq!(resolver.target(), Some(BONES));
}

#[test]
fn test_resolve_once_failures() {
    let resolver = make_resolver(MockClient::not_ready());
    assert_eq!(resolver.resolve_once(), Err(ResolveError::NotReady));

    let client = MockClient::with_note(vec![COINS], 0, "Coins");
    let resolver = make_resolver(client);
    assert_eq!(resolver.resolve_once(), Err(ResolveError::NoteAbsent));

    let client = MockClient::with_note(vec![COINS, BANKERS_NOTE], 0, "Coins");
    let resolver = make_resolver(client);
    assert_eq!(
        resolver.resolve_once(),
        Err(ResolveError::TextMissing { slot: 1 })
    );

    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "<col=ff9040>Banker's note</col>");
    let resolver = make_resolver(client);
    assert_eq!(
        resolver.resolve_once(),
        Err(ResolveError::NoNameMatch {
            name: "Banker's note".to_string()
        })
    );
}

#[test]
fn test_failed_attempt_resets_target() {
    let target = TargetSlot::new();
    target.set(Some(SHARK));
    let resolver = TargetResolver::new(MockClient::not_ready(), MockCatalog::standard(), target);

    assert!(resolver.resolve_once().is_err());
    assert_eq!(resolver.target(), None);
}

#[test]
fn test_only_first_note_is_considered() {
    let client = MockClient::with_note(
        vec![COINS, BANKERS_NOTE, BANKERS_NOTE],
        1,
        "Shark",
    );
    client.texts.borrow_mut().insert(2, "Bones".to_string());
    let resolver = make_resolver(client);

    assert_eq!(resolver.resolve_once(), Ok(SHARK));
}

#[test]
fn test_exact_name_preferred_over_substring_match() {
    let client = MockClient::with_note(vec![BANKERS_NOTE], 0, "Bones");
    let resolver = make_resolver(client);
    assert_eq!(resolver.resolve_once(), Ok(BONES));
}
