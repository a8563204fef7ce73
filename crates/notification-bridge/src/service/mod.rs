//! Service Layer
//!
//! - `DistributionSink`: single-subscriber delivery of normalized events

pub mod distribution_sink;

pub use distribution_sink::{DistributionSink, SubscriberSlot, SubscriptionId};
