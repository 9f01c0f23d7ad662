use std::sync::Arc;

use postertrack_events::EmailDelivery;

use crate::config::ServerConfig;
use crate::storage::EvidenceStore;

/// Shared state handed to every handler via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: postertrack_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// `None` when SMTP is not configured; notifications are skipped.
    pub email: Option<Arc<EmailDelivery>>,
    pub evidence: Arc<dyn EvidenceStore>,
}
