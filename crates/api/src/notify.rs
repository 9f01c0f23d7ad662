//! Fire-and-forget notification delivery.

use postertrack_events::Notification;

use crate::state::AppState;

/// Send `notification` in the background.
///
/// Delivery failures are logged, never surfaced: the request that triggered
/// the message has already succeeded. Without SMTP configured the message is
/// dropped.
pub fn dispatch(state: &AppState, recipients: Vec<String>, notification: Notification) {
    let Some(email) = state.email.clone() else {
        tracing::debug!(subject = %notification.subject, "Email disabled, notification skipped");
        return;
    };

    tokio::spawn(async move {
        let to: Vec<&str> = recipients.iter().map(String::as_str).collect();
        if let Err(e) = email.send(&to, &notification).await {
            tracing::error!(error = %e, subject = %notification.subject, "Failed to send email");
        }
    });
}
