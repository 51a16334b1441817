use crate::render::RenderedList;
use tracing::info;

/// Logs the rendered list, one line per entry.
pub fn log_environment_list(list: &RenderedList) {
    info!("=== Environments ({} total) ===", list.len());
    for entry in list.entries() {
        info!("  {} -> {}", entry.label, entry.href);
    }
}
