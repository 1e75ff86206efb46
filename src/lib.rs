mod utils;

pub mod comparator;
pub mod db;
pub mod editor;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;
pub mod page;
pub mod recall;
pub mod remote;
pub mod session;
pub mod settings;
pub mod view;

pub use comparator::{baseline_snapshot, snapshots_differ, Comparator, RatingComparison, SavedState};
pub use db::EntryCache;
pub use editor::EditorPage;
pub use error::{SnapshotError, ValidationError};
pub use form::{FormControls, FormStateReader, Slider, TagKey};
pub use gateway::{CachedGateway, EntryGateway, FetchMode, GatewayResponse, RemoteStore};
pub use models::{CachedEntry, EntrySnapshot, RatingDimension, RatingSettings};
pub use page::{parse_page_date, PageContext};
pub use recall::{RecallController, RecallOutcome, NO_ENTRY_PLACEHOLDER};
pub use remote::MemoryRemote;
pub use session::{
    BackOutcome, DeleteOutcome, SessionController, SubmitOutcome, TransitionState,
};
pub use settings::{EditorSettings, RecallOption, SettingsStore};
pub use view::{Control, EditorView, MemoryPanel, Route};

/// Installs the `env_logger` backend. Reads `RUST_LOG`, defaults to info.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
