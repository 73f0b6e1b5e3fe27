//! Demo host driving the banker's note overlay end to end
//!
//! Run with: cargo run -p notemark-overlay -- [output.png] [--icons DIR]
//!
//! Simulates a client that is still loading when the add-on starts, then logs
//! in, shuffles the inventory and uses the note on another item. The final
//! inventory frame is written to `output.png` (default `notemark-demo.png`).
//! With `--icons`, item icons are read from `DIR/<item_id>.png`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::env;
use std::path::PathBuf;

use notemark_core::config::{config_path, load_config_or_default};
use notemark_core::{
    BANKERS_NOTE, CatalogItem, ClientEvent, ClientEventHandler, ClientHost, GameState,
    INVENTORY_CONTAINER_ID, ItemCatalog, ItemId, MenuAction, MenuInteraction, ResolveTask,
    TargetResolver, TargetSlot,
};
use notemark_overlay::{
    IconDirectory, IconImage, IconSource, NoteLocator, OverlayRenderer, SlotBounds,
};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};
use tracing_subscriber::filter::EnvFilter;

const SHARK: ItemId = 385;
const DRAGON_BONES: ItemId = 536;
const BONES: ItemId = 532;
const COINS: ItemId = 995;

/// Inventory grid geometry (4 columns x 7 rows)
const COLUMNS: usize = 4;
const SLOT_WIDTH: u32 = 36;
const SLOT_HEIGHT: u32 = 32;
const SLOT_GAP: u32 = 6;
const PADDING: u32 = 8;

mod client {
    use super::*;

    /// Simulated game client
    pub struct DemoClient {
        pub logged_in: Cell<bool>,
        /// Reads that report "not loaded" before the inventory appears
        pub loading_reads: Cell<u32>,
        pub inventory: RefCell<Vec<ItemId>>,
        /// Item the note currently holds, shown in its tooltip
        pub note_target: RefCell<String>,
        queue: RefCell<VecDeque<ResolveTask>>,
    }

    impl DemoClient {
        pub fn new() -> Self {
            Self {
                logged_in: Cell::new(false),
                loading_reads: Cell::new(2),
                inventory: RefCell::new(vec![COINS, BANKERS_NOTE, SHARK, DRAGON_BONES]),
                note_target: RefCell::new("Dragon bones".to_string()),
                queue: RefCell::new(VecDeque::new()),
            }
        }

        pub fn pop_task(&self) -> Option<ResolveTask> {
            self.queue.borrow_mut().pop_front()
        }

        pub fn slot_bounds(slot: usize) -> SlotBounds {
            let col = (slot % COLUMNS) as u32;
            let row = (slot / COLUMNS) as u32;
            SlotBounds {
                x: (PADDING + col * (SLOT_WIDTH + SLOT_GAP)) as i32,
                y: (PADDING + row * (SLOT_HEIGHT + SLOT_GAP)) as i32,
                width: SLOT_WIDTH,
                height: SLOT_HEIGHT,
            }
        }
    }

    impl ClientHost for DemoClient {
        fn is_logged_in(&self) -> bool {
            self.logged_in.get()
        }

        fn inventory_items(&self) -> Option<Vec<ItemId>> {
            let loading = self.loading_reads.get();
            if loading > 0 {
                self.loading_reads.set(loading - 1);
                return None;
            }
            Some(self.inventory.borrow().clone())
        }

        fn slot_text(&self, slot: usize) -> Option<String> {
            let inventory = self.inventory.borrow();
            match inventory.get(slot) {
                Some(&BANKERS_NOTE) => {
                    Some(format!("<col=ff9040>{}</col>", self.note_target.borrow()))
                }
                Some(_) => Some("<col=ff9040>Item</col>".to_string()),
                None => None,
            }
        }

        fn defer(&self, task: ResolveTask) {
            self.queue.borrow_mut().push_back(task);
        }
    }

    impl NoteLocator for DemoClient {
        fn note_bounds(&self, note_item: ItemId) -> Option<SlotBounds> {
            let inventory = self.inventory.borrow();
            let slot = inventory.iter().position(|id| *id == note_item)?;
            Some(DemoClient::slot_bounds(slot))
        }
    }

    /// Item database with substring search
    pub struct DemoCatalog(pub Vec<CatalogItem>);

    impl ItemCatalog for DemoCatalog {
        fn search(&self, query: &str) -> Vec<CatalogItem> {
            let query = query.to_lowercase();
            self.0
                .iter()
                .filter(|item| item.name.to_lowercase().contains(&query))
                .cloned()
                .collect()
        }
    }

    /// Generated round icons, one color per item
    pub struct GeneratedIcons;

    impl IconSource for GeneratedIcons {
        fn icon(&self, item: ItemId) -> Option<IconImage> {
            let color = match item {
                SHARK => [70, 130, 180],
                DRAGON_BONES => [220, 220, 200],
                BONES => [240, 240, 230],
                COINS => [230, 190, 40],
                _ => return None,
            };
            let size = 32u32;
            let radius = size as f32 / 2.0 - 3.0;
            let center = size as f32 / 2.0;
            let mut rgba = Vec::with_capacity((size * size * 4) as usize);
            for y in 0..size {
                for x in 0..size {
                    let dx = x as f32 + 0.5 - center;
                    let dy = y as f32 + 0.5 - center;
                    let alpha = if dx * dx + dy * dy <= radius * radius { 255 } else { 0 };
                    rgba.extend_from_slice(&[color[0], color[1], color[2], alpha]);
                }
            }
            IconImage::from_rgba(size, size, rgba).ok()
        }
    }

    /// Either a directory of PNGs or the generated icons
    pub enum Icons {
        Directory(IconDirectory),
        Generated(GeneratedIcons),
    }

    impl IconSource for Icons {
        fn icon(&self, item: ItemId) -> Option<IconImage> {
            match self {
                Self::Directory(dir) => dir.icon(item),
                Self::Generated(generated) => generated.icon(item),
            }
        }
    }
}

use client::{DemoCatalog, DemoClient, GeneratedIcons, Icons};

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If NOTEMARK_LOG_PATH is set, append to that file
    if let Ok(path) = env::var("NOTEMARK_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Run every queued resolver task, as the client does once per tick
fn pump(resolver: &mut TargetResolver<&DemoClient, DemoCatalog>) {
    while let Some(task) = resolver.host().pop_task() {
        let outcome = resolver.run_task(task);
        tracing::debug!(?task, ?outcome, "Ran resolver task");
    }
}

/// Draw the inventory background and item placeholders
fn draw_inventory(canvas: &mut Pixmap, client: &DemoClient) {
    canvas.fill(Color::from_rgba8(62, 53, 41, 255));

    let mut slot_paint = Paint::default();
    slot_paint.set_color(Color::from_rgba8(78, 68, 54, 255));
    let mut note_paint = Paint::default();
    note_paint.set_color(Color::from_rgba8(226, 214, 176, 255));

    for (slot, item) in client.inventory.borrow().iter().enumerate() {
        let bounds = DemoClient::slot_bounds(slot);
        let paint = if *item == BANKERS_NOTE {
            &note_paint
        } else {
            &slot_paint
        };
        if let Some(rect) = Rect::from_xywh(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
        ) {
            canvas.fill_rect(rect, paint, Transform::identity(), None);
        }
    }
}

fn main() {
    init_logging();

    let mut output = PathBuf::from("notemark-demo.png");
    let mut icon_dir = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--icons" => icon_dir = args.next().map(PathBuf::from),
            _ => output = PathBuf::from(arg),
        }
    }

    let config = load_config_or_default();
    if let Ok(path) = config_path() {
        tracing::info!(path = %path.display(), "Using overlay config");
    }

    let client = DemoClient::new();
    let catalog = DemoCatalog(vec![
        CatalogItem::new(SHARK, "Shark"),
        CatalogItem::new(DRAGON_BONES, "Dragon bones"),
        CatalogItem::new(BONES, "Bones"),
        CatalogItem::new(COINS, "Coins"),
    ]);
    let icons = match icon_dir {
        Some(dir) => Icons::Directory(IconDirectory::new(dir)),
        None => Icons::Generated(GeneratedIcons),
    };

    let target = TargetSlot::new();
    let mut resolver = TargetResolver::new(&client, catalog, target.clone());
    let renderer = OverlayRenderer::new(&client, icons, target, config);

    // Add-on enabled while the client is still on the login screen
    resolver.on_startup();
    pump(&mut resolver);

    client.logged_in.set(true);
    resolver.handle_event(&ClientEvent::GameStateChanged(GameState::LoggedIn));
    pump(&mut resolver);
    tracing::info!(target_id = ?resolver.target(), "After login");

    // Note moved to another slot
    client.inventory.borrow_mut().swap(1, 3);
    resolver.handle_event(&ClientEvent::ItemContainerChanged {
        container_id: INVENTORY_CONTAINER_ID,
    });
    pump(&mut resolver);

    // Use the note on a shark
    *client.note_target.borrow_mut() = "Shark".to_string();
    resolver.handle_event(&ClientEvent::MenuOptionClicked(MenuInteraction {
        action: MenuAction::WidgetTargetOnWidget,
        item_id: BANKERS_NOTE,
        target: "<col=ff9040>Shark</col>".to_string(),
    }));
    tracing::info!(target_id = ?resolver.target(), "After using note");

    let width = PADDING * 2 + COLUMNS as u32 * (SLOT_WIDTH + SLOT_GAP) - SLOT_GAP;
    let height = PADDING * 2 + 7 * (SLOT_HEIGHT + SLOT_GAP) - SLOT_GAP;
    let Some(mut canvas) = Pixmap::new(width, height) else {
        tracing::error!(width, height, "Failed to allocate canvas");
        return;
    };

    draw_inventory(&mut canvas, &client);
    match renderer.paint(&mut canvas) {
        Some(painted) => tracing::info!(?painted, "Overlay painted"),
        None => tracing::info!("Overlay drew nothing"),
    }

    if let Err(e) = canvas.save_png(&output) {
        tracing::error!(path = %output.display(), error = %e, "Failed to write frame");
        return;
    }
    tracing::info!(path = %output.display(), "Wrote frame");

    resolver.on_shutdown();
}
