//! # State Change Notifications
//!
//! After every operation that changes observable state the session sends a
//! [`StateChange`] on a broadcast channel. Front ends re-query what they
//! display; the event carries no payload.

use serde::Serialize;

/// Channel capacity. Slow subscribers see `Lagged` and should re-query all.
pub const EVENT_CAPACITY: usize = 64;

/// Which part of the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateChange {
    CartChanged,
    CatalogChanged,
    HistoryChanged,
    LocaleChanged,
    /// Customer name, date or status of the checkout form
    MetaChanged,
}
