//! Wiring for one editor page: context, form, recall panel and transitions.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    form::FormControls,
    gateway::{EntryGateway, FetchMode},
    page::PageContext,
    recall::RecallController,
    session::SessionController,
    settings::EditorSettings,
    view::EditorView,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub struct EditorPage<G: ?Sized, V: ?Sized> {
    pub form: Arc<FormControls>,
    pub recall: Arc<RecallController<G, V>>,
    pub session: Arc<SessionController<G, FormControls, V>>,
}

impl<G, V> EditorPage<G, V>
where
    G: EntryGateway + ?Sized,
    V: EditorView + ?Sized,
{
    /// Loads the page context, prefills the form from the saved entry and
    /// populates the memory panel once.
    pub async fn mount(
        location: &str,
        settings: &EditorSettings,
        gateway: Arc<G>,
        view: Arc<V>,
    ) -> Result<Self> {
        let page = PageContext::load(location, &*gateway).await?;
        let page_date = page.page_date();

        let existing = match gateway.get_entry(page_date, FetchMode::PreferCache).await {
            Ok(entry) => entry,
            Err(err) => {
                log_warn!("could not load entry for {page_date}, starting blank: {err:#}");
                None
            }
        };
        let form = Arc::new(FormControls::from_entry(page.dimensions(), existing.as_ref()));

        let recall = Arc::new(
            RecallController::new(
                page_date,
                settings.default_recall_offset,
                Arc::clone(&gateway),
                Arc::clone(&view),
            )
            .with_options(settings.recall_offsets.clone()),
        );
        recall.mount().await;

        let session = Arc::new(SessionController::new(
            page,
            settings,
            gateway,
            Arc::clone(&form),
            view,
        ));

        log_info!("editor mounted for {page_date}");
        Ok(Self {
            form,
            recall,
            session,
        })
    }
}
