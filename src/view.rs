//! What the editing session needs from the page it drives.

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Submit,
    Delete,
    Back,
    RecallSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Dashboard,
}

/// Contents of the read-only memory panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPanel {
    pub date_label: String,
    pub body: String,
    /// False when `body` is the "no entry" placeholder.
    pub has_entry: bool,
}

#[async_trait]
pub trait EditorView: Send + Sync {
    /// Blocking yes/no prompt.
    async fn confirm(&self, message: &str) -> bool;
    /// Blocking notice with a single dismiss action.
    async fn alert(&self, message: &str);
    fn navigate(&self, route: Route);
    fn render_memory(&self, panel: MemoryPanel);
    fn set_panel_hidden(&self, hidden: bool);
    fn set_control_enabled(&self, control: Control, enabled: bool);
    /// Non-blocking error toast.
    fn notify_error(&self, message: &str);
}
