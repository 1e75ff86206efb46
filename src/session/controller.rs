use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::{
    comparator::{baseline_snapshot, Comparator, SavedState},
    form::FormStateReader,
    gateway::{EntryGateway, FetchMode, GatewayResponse},
    models::{saved_snapshot, EntrySnapshot},
    page::PageContext,
    settings::EditorSettings,
    view::{Control, EditorView, Route},
};

use super::{
    BackOutcome, BackStatus, DeleteOutcome, DeleteStatus, SubmitOutcome, SubmitStatus,
    TransitionState,
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this entry? This cannot be undone.";
pub const DISCARD_CONFIRMATION: &str =
    "You have unsaved changes. Do you want to discard them and go back to the dashboard?";

/// Disables a control until dropped.
struct ControlGuard<'a, V: EditorView + ?Sized> {
    view: &'a V,
    control: Control,
}

impl<'a, V: EditorView + ?Sized> ControlGuard<'a, V> {
    fn new(view: &'a V, control: Control) -> Self {
        view.set_control_enabled(control, false);
        Self { view, control }
    }
}

impl<V: EditorView + ?Sized> Drop for ControlGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_control_enabled(self.control, true);
    }
}

/// Submit, delete and back navigation for the entry of one page date.
pub struct SessionController<G: ?Sized, F: ?Sized, V: ?Sized> {
    page: PageContext,
    comparator: Comparator,
    surface_remote_failures: bool,
    state: Mutex<TransitionState>,
    gateway: Arc<G>,
    form: Arc<F>,
    view: Arc<V>,
}

impl<G, F, V> SessionController<G, F, V>
where
    G: EntryGateway + ?Sized,
    F: FormStateReader + ?Sized,
    V: EditorView + ?Sized,
{
    pub fn new(
        page: PageContext,
        settings: &EditorSettings,
        gateway: Arc<G>,
        form: Arc<F>,
        view: Arc<V>,
    ) -> Self {
        let comparator = Comparator::new(page.dimensions().to_vec(), settings.rating_comparison);
        Self {
            page,
            comparator,
            surface_remote_failures: settings.surface_remote_failures,
            state: Mutex::new(TransitionState::new()),
            gateway,
            form,
            view,
        }
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub async fn state(&self) -> TransitionState {
        *self.state.lock().await
    }

    fn page_date(&self) -> NaiveDate {
        self.page.page_date()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if !self.state.lock().await.begin_submit() {
            log_warn!("submit ignored: a submit is already in flight");
            return SubmitOutcome::Busy;
        }
        let _guard = ControlGuard::new(&*self.view, Control::Submit);

        let snapshot = self.form.read_form_state();
        if let Err(err) = snapshot.validate_for_submit() {
            // Stays in `Validating` while the alert blocks.
            self.view.alert(err.user_message()).await;
            self.state.lock().await.submit = SubmitStatus::Idle;
            return SubmitOutcome::Invalid(err);
        }

        self.state.lock().await.submit = SubmitStatus::Submitting;

        match self.save(&snapshot).await {
            Ok((created, response)) if response.ok => {
                self.state.lock().await.submit = SubmitStatus::Succeeded;
                log_info!(
                    "{} entry for {}",
                    if created { "created" } else { "updated" },
                    self.page_date()
                );
                self.view.navigate(Route::Dashboard);
                SubmitOutcome::Submitted { created }
            }
            Ok((_, response)) => {
                let reason = response.status_text;
                self.state.lock().await.submit = SubmitStatus::Failed;
                self.report_failure(&format!("Failed to submit entry: {reason}"));
                SubmitOutcome::Failed { reason }
            }
            Err(err) => {
                let reason = format!("{err:#}");
                self.state.lock().await.submit = SubmitStatus::Failed;
                self.report_failure(&format!("Failed to submit entry: {reason}"));
                SubmitOutcome::Failed { reason }
            }
        }
    }

    /// Adds when nothing is saved for the page date, edits otherwise.
    async fn save(&self, snapshot: &EntrySnapshot) -> Result<(bool, GatewayResponse)> {
        let date = self.page_date();
        let existing = self.gateway.get_entry(date, FetchMode::Refresh).await?;
        let create = saved_snapshot(existing.as_ref()).is_none();
        let response = if create {
            self.gateway.add_entry(date, snapshot).await?
        } else {
            self.gateway.edit_entry(date, snapshot).await?
        };
        Ok((create, response))
    }

    pub async fn delete(&self) -> DeleteOutcome {
        if !self.state.lock().await.begin_delete() {
            log_warn!("delete ignored: a delete is already in flight");
            return DeleteOutcome::Busy;
        }
        let _guard = ControlGuard::new(&*self.view, Control::Delete);

        if !self.view.confirm(DELETE_CONFIRMATION).await {
            self.state.lock().await.delete = DeleteStatus::Idle;
            return DeleteOutcome::Declined;
        }

        self.state.lock().await.delete = DeleteStatus::Deleting;

        let reason = match self.gateway.delete_entry(self.page_date()).await {
            Ok(response) if response.ok => {
                self.state.lock().await.delete = DeleteStatus::Deleted;
                log_info!("deleted entry for {}", self.page_date());
                self.view.navigate(Route::Dashboard);
                return DeleteOutcome::Deleted;
            }
            Ok(response) => response.status_text,
            Err(err) => format!("{err:#}"),
        };

        self.state.lock().await.delete = DeleteStatus::Failed;
        self.report_failure(&format!("Failed to delete entry: {reason}"));
        DeleteOutcome::Failed { reason }
    }

    pub async fn back(&self) -> BackOutcome {
        if !self.state.lock().await.begin_back() {
            return BackOutcome::Busy;
        }
        let _guard = ControlGuard::new(&*self.view, Control::Back);

        let current = self.form.read_form_state();
        let dirty = match self.has_unsaved_changes(&current).await {
            Ok(dirty) => dirty,
            Err(err) => {
                log_warn!("could not compare with saved entry, asking before leaving: {err:#}");
                true
            }
        };

        if !dirty {
            self.state.lock().await.back = BackStatus::NavigateDirect;
            self.view.navigate(Route::Dashboard);
            return BackOutcome::NavigatedDirect;
        }

        self.state.lock().await.back = BackStatus::ConfirmDiscard;
        if self.view.confirm(DISCARD_CONFIRMATION).await {
            self.state.lock().await.back = BackStatus::Discarded;
            self.view.navigate(Route::Dashboard);
            BackOutcome::Discarded
        } else {
            self.state.lock().await.back = BackStatus::Idle;
            BackOutcome::Stayed
        }
    }

    /// Compares `current` with the cached entry, or with the settings
    /// defaults when nothing is saved for the page date.
    pub async fn has_unsaved_changes(&self, current: &EntrySnapshot) -> Result<bool> {
        let cached = self
            .gateway
            .get_entry(self.page_date(), FetchMode::PreferCache)
            .await?;

        let dirty = match saved_snapshot(cached.as_ref()) {
            Some(saved) => self.comparator.is_dirty(current, SavedState::Entry(saved)),
            None => {
                let settings = self.gateway.get_settings().await?;
                let baseline = baseline_snapshot(&settings.ratings);
                self.comparator
                    .is_dirty(current, SavedState::Entry(&baseline))
            }
        };
        dirty.map_err(|err| anyhow!(err))
    }

    fn report_failure(&self, message: &str) {
        log_error!("{message}");
        if self.surface_remote_failures {
            self.view.notify_error(message);
        }
    }
}

impl<G, F, V> SessionController<G, F, V>
where
    G: EntryGateway + ?Sized + 'static,
    F: FormStateReader + ?Sized + 'static,
    V: EditorView + ?Sized + 'static,
{
    pub fn spawn_submit(self: &Arc<Self>) -> tokio::task::JoinHandle<SubmitOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.submit().await })
    }

    pub fn spawn_delete(self: &Arc<Self>) -> tokio::task::JoinHandle<DeleteOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.delete().await })
    }

    pub fn spawn_back(self: &Arc<Self>) -> tokio::task::JoinHandle<BackOutcome> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.back().await })
    }
}
