//! Domain Layer
//!
//! Pure data and transformation, no I/O:
//!
//! - `RawNotificationRecord`: input pushed by the OS notification bus
//! - `NotificationEvent`: normalized event (title or message always non-empty)
//! - `EventPayload`: the four-key mapping handed to the subscriber
//! - `Extractor`: record to event, with the big-text fallback and empty-drop

pub mod event;
pub mod extractor;
pub mod record;

pub use event::{EventPayload, NotificationEvent};
pub use extractor::Extractor;
pub use record::{NotificationContent, NotificationExtras, RawNotificationRecord};
