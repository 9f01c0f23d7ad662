//! Outbound notifications for PosterTrack.
//!
//! - [`email`]: SMTP delivery through `lettre`, disabled when `SMTP_HOST`
//!   is unset.
//! - [`messages`]: the notification bodies the API sends.

pub mod email;
pub mod messages;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use messages::Notification;
