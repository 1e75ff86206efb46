#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use diary_editor_lib::{
    CachedEntry, Control, EditorView, EntryGateway, EntrySnapshot, FetchMode, GatewayResponse,
    MemoryPanel, RatingDimension, RatingSettings, Route,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dimensions() -> Vec<RatingDimension> {
    vec![
        RatingDimension::new("mood", 1, 5),
        RatingDimension::new("energy", 0, 10),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetEntry(NaiveDate, FetchMode),
    GetSettings,
    Add(NaiveDate, EntrySnapshot),
    Edit(NaiveDate, EntrySnapshot),
    Delete(NaiveDate),
}

/// Gateway double that records every call and can hold calls open.
pub struct RecordingGateway {
    entries: Mutex<HashMap<NaiveDate, CachedEntry>>,
    settings: RatingSettings,
    calls: Mutex<Vec<Call>>,
    response: Mutex<GatewayResponse>,
    unreachable: Mutex<bool>,
    entry_hold: Mutex<Option<(NaiveDate, Arc<Notify>)>>,
    mutation_hold: Mutex<Option<Arc<Notify>>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            settings: RatingSettings::new(dimensions()),
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(GatewayResponse::ok()),
            unreachable: Mutex::new(false),
            entry_hold: Mutex::new(None),
            mutation_hold: Mutex::new(None),
        }
    }

    pub fn with_entry(self, entry: CachedEntry) -> Self {
        self.entries.lock().unwrap().insert(entry.date, entry);
        self
    }

    pub fn respond_with(&self, response: GatewayResponse) {
        *self.response.lock().unwrap() = response;
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// `get_entry` for `date` waits until the returned handle is notified.
    pub fn hold_entry(&self, date: NaiveDate) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.entry_hold.lock().unwrap() = Some((date, Arc::clone(&notify)));
        notify
    }

    /// Every mutation waits until the returned handle is notified.
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.mutation_hold.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Add(..) | Call::Edit(..) | Call::Delete(..)))
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.unreachable.lock().unwrap() {
            bail!("connection refused");
        }
        Ok(())
    }

    async fn wait_for_mutation_release(&self) {
        let hold = self.mutation_hold.lock().unwrap().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }
}

#[async_trait]
impl EntryGateway for RecordingGateway {
    async fn get_entry(&self, date: NaiveDate, mode: FetchMode) -> Result<Option<CachedEntry>> {
        self.record(Call::GetEntry(date, mode))?;
        let hold = self
            .entry_hold
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(held, _)| *held == date)
            .map(|(_, notify)| Arc::clone(notify));
        if let Some(notify) = hold {
            notify.notified().await;
        }
        Ok(self.entries.lock().unwrap().get(&date).cloned())
    }

    async fn get_settings(&self) -> Result<RatingSettings> {
        self.record(Call::GetSettings)?;
        Ok(self.settings.clone())
    }

    async fn add_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse> {
        self.record(Call::Add(date, entry.clone()))?;
        self.wait_for_mutation_release().await;
        Ok(self.response.lock().unwrap().clone())
    }

    async fn edit_entry(&self, date: NaiveDate, entry: &EntrySnapshot) -> Result<GatewayResponse> {
        self.record(Call::Edit(date, entry.clone()))?;
        self.wait_for_mutation_release().await;
        Ok(self.response.lock().unwrap().clone())
    }

    async fn delete_entry(&self, date: NaiveDate) -> Result<GatewayResponse> {
        self.record(Call::Delete(date))?;
        self.wait_for_mutation_release().await;
        Ok(self.response.lock().unwrap().clone())
    }
}

/// View double with scripted confirm answers.
#[derive(Default)]
pub struct ScriptedView {
    answers: Mutex<VecDeque<bool>>,
    alert_hold: Mutex<Option<Arc<Notify>>>,
    prompt_hold: Mutex<Option<Arc<Notify>>>,
    pub prompts: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
    pub navigations: Mutex<Vec<Route>>,
    pub panels: Mutex<Vec<MemoryPanel>>,
    pub controls: Mutex<Vec<(Control, bool)>>,
    pub errors: Mutex<Vec<String>>,
}

impl ScriptedView {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Every alert stays open until the returned handle is notified.
    pub fn hold_alerts(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.alert_hold.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    /// Every confirm prompt stays open until the returned handle is notified.
    pub fn hold_prompts(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.prompt_hold.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn panels(&self) -> Vec<MemoryPanel> {
        self.panels.lock().unwrap().clone()
    }

    pub fn controls(&self) -> Vec<(Control, bool)> {
        self.controls.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl EditorView for ScriptedView {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        let hold = self.prompt_hold.lock().unwrap().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }

    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
        let hold = self.alert_hold.lock().unwrap().clone();
        if let Some(notify) = hold {
            notify.notified().await;
        }
    }

    fn navigate(&self, route: Route) {
        self.navigations.lock().unwrap().push(route);
    }

    fn render_memory(&self, panel: MemoryPanel) {
        self.panels.lock().unwrap().push(panel);
    }

    fn set_panel_hidden(&self, _hidden: bool) {}

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.controls.lock().unwrap().push((control, enabled));
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
