//! Read-only memory panel showing the entry from some days before the page
//! date.
//!
//! Each selection supersedes the previous one: the in-flight fetch is
//! cancelled and a late result is dropped unless its generation is still the
//! current one.

use std::sync::{
    atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::gateway::{EntryGateway, FetchMode};
use crate::models::{saved_snapshot, CachedEntry};
use crate::page::date_minus_days;
use crate::settings::RecallOption;
use crate::view::{EditorView, MemoryPanel};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

pub const NO_ENTRY_PLACEHOLDER: &str = "No entry for this date.";

/// `Sunday, March 3, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn memory_panel(date: NaiveDate, entry: Option<&CachedEntry>) -> MemoryPanel {
    match saved_snapshot(entry) {
        Some(saved) => MemoryPanel {
            date_label: format_long_date(date),
            body: saved.body.clone(),
            has_entry: true,
        },
        None => placeholder_panel(format_long_date(date)),
    }
}

fn placeholder_panel(date_label: String) -> MemoryPanel {
    MemoryPanel {
        date_label,
        body: NO_ENTRY_PLACEHOLDER.to_string(),
        has_entry: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallOutcome {
    Rendered(MemoryPanel),
    /// A later selection took over before this one finished.
    Superseded,
}

pub struct RecallController<G: ?Sized, V: ?Sized> {
    page_date: NaiveDate,
    default_offset: i64,
    options: Vec<RecallOption>,
    gateway: Arc<G>,
    view: Arc<V>,
    selected: AtomicI64,
    generation: AtomicU64,
    in_flight: Mutex<Option<CancellationToken>>,
    panel_hidden: AtomicBool,
}

impl<G, V> RecallController<G, V>
where
    G: EntryGateway + ?Sized,
    V: EditorView + ?Sized,
{
    pub fn new(page_date: NaiveDate, default_offset: i64, gateway: Arc<G>, view: Arc<V>) -> Self {
        Self {
            page_date,
            default_offset,
            options: Vec::new(),
            gateway,
            view,
            selected: AtomicI64::new(default_offset),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
            panel_hidden: AtomicBool::new(false),
        }
    }

    /// Selector options. A default offset that is not one of them falls
    /// back to the first option.
    pub fn with_options(mut self, options: Vec<RecallOption>) -> Self {
        if let Some(first) = options.first() {
            if !options.iter().any(|option| option.days == self.default_offset) {
                log_warn!(
                    "default recall offset {} is not a selector option, using '{}'",
                    self.default_offset,
                    first.label
                );
                self.default_offset = first.days;
                self.selected.store(first.days, Ordering::SeqCst);
            }
        }
        self.options = options;
        self
    }

    pub fn options(&self) -> &[RecallOption] {
        &self.options
    }

    pub fn default_offset(&self) -> i64 {
        self.default_offset
    }

    pub fn selected_offset(&self) -> i64 {
        self.selected.load(Ordering::SeqCst)
    }

    /// Populates the panel with the default offset before any interaction.
    pub async fn mount(&self) -> RecallOutcome {
        self.select(self.default_offset).await
    }

    pub async fn select_option(&self, option: &RecallOption) -> RecallOutcome {
        self.select(option.days).await
    }

    pub async fn select(&self, offset_days: i64) -> RecallOutcome {
        let token = CancellationToken::new();
        let generation = {
            let mut in_flight = self.lock_in_flight();
            if let Some(previous) = in_flight.replace(token.clone()) {
                previous.cancel();
            }
            self.selected.store(offset_days, Ordering::SeqCst);
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let Some(date) = date_minus_days(self.page_date, offset_days) else {
            log_warn!("recall offset {offset_days} is out of range for {}", self.page_date);
            return self.commit(generation, || placeholder_panel(String::new()));
        };
        log_debug!("recall fetch for {date} (offset {offset_days}, generation {generation})");

        let fetched = tokio::select! {
            _ = token.cancelled() => return RecallOutcome::Superseded,
            result = self.gateway.get_entry(date, FetchMode::PreferCache) => result,
        };

        let entry = match fetched {
            Ok(entry) => entry,
            Err(err) => {
                log_warn!("recall fetch for {date} failed: {err:#}");
                None
            }
        };
        self.commit(generation, || memory_panel(date, entry.as_ref()))
    }

    /// Renders only while `generation` is the latest selection. The
    /// generation changes under the same lock, so a newer selection can
    /// neither render first nor lose its token here.
    fn commit(&self, generation: u64, panel: impl FnOnce() -> MemoryPanel) -> RecallOutcome {
        let mut in_flight = self.lock_in_flight();
        if self.generation.load(Ordering::SeqCst) != generation {
            return RecallOutcome::Superseded;
        }
        in_flight.take();

        let panel = panel();
        self.view.render_memory(panel.clone());
        RecallOutcome::Rendered(panel)
    }

    pub fn toggle_panel(&self) -> bool {
        let hidden = !self.panel_hidden.fetch_xor(true, Ordering::SeqCst);
        self.view.set_panel_hidden(hidden);
        hidden
    }

    pub fn panel_hidden(&self) -> bool {
        self.panel_hidden.load(Ordering::SeqCst)
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<G, V> RecallController<G, V>
where
    G: EntryGateway + ?Sized + 'static,
    V: EditorView + ?Sized + 'static,
{
    /// Handles a selector change on its own task.
    pub fn spawn_select(self: &Arc<Self>, offset_days: i64) -> JoinHandle<RecallOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.select(offset_days).await })
    }
}
