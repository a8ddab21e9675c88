//! Append-only shipment timeline.
//!
//! Every status change, the initial creation, and every driver
//! (re)assignment appends exactly one [`TimelineEntry`]. Entries are
//! immutable once recorded: they carry a creation timestamp and nothing
//! that can be updated later.
//!
//! [`Timeline`] itself is an immutable value: [`Timeline::record`] returns
//! a new timeline rather than mutating in place.

use super::status::{ActorRole, ShipmentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// An already-resolved principal: role plus identifier.
///
/// The core never resolves identity itself; the surrounding request layer
/// supplies this from its session context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    pub id: i64,
}

impl Actor {
    pub fn new(role: ActorRole, id: i64) -> Self {
        Self { role, id }
    }

    pub fn admin(id: i64) -> Self {
        Self::new(ActorRole::Admin, id)
    }

    pub fn driver(id: i64) -> Self {
        Self::new(ActorRole::Driver, id)
    }
}

/// One immutable audit record on a shipment's timeline.
///
/// `status` is the shipment's status *at the time of the entry*. For
/// assignment entries that is the unchanged current status; for transition
/// entries it is the new status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// The shipment this entry belongs to.
    pub shipment_id: Uuid,
    /// Shipment status when the entry was recorded.
    pub status: ShipmentStatus,
    /// Who caused the entry.
    pub actor: Actor,
    /// Optional free-text note ("Shipment created", "left at door", ...).
    pub note: Option<String>,
    /// When the entry was recorded. There is no update timestamp; entries
    /// never change.
    pub recorded_at: DateTime<Utc>,
}

/// Ordered, append-only history of one shipment.
///
/// Entries are held oldest-first; [`Timeline::newest_first`] is the
/// presentation order. The denormalized `status` field on a shipment must
/// always equal the latest entry's status - [`Timeline::is_consistent_with`]
/// checks exactly that.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use uuid::Uuid;
/// use waybill::core::{Actor, ShipmentStatus, Timeline, TimelineEntry};
///
/// let shipment_id = Uuid::new_v4();
/// let timeline = Timeline::new().record(TimelineEntry {
///     shipment_id,
///     status: ShipmentStatus::Created,
///     actor: Actor::admin(1),
///     note: Some("Shipment created".to_string()),
///     recorded_at: Utc::now(),
/// });
///
/// assert_eq!(timeline.len(), 1);
/// assert!(timeline.is_consistent_with(ShipmentStatus::Created));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, returning a new timeline.
    ///
    /// Pure: the existing timeline is left untouched.
    pub fn record(&self, entry: TimelineEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// All entries in presentation order, newest first.
    pub fn newest_first(&self) -> Vec<TimelineEntry> {
        let mut entries = self.entries.clone();
        entries.reverse();
        entries
    }

    /// The most recent entry, if any.
    pub fn latest(&self) -> Option<&TimelineEntry> {
        self.entries.last()
    }

    /// Whether the latest entry agrees with a shipment's denormalized
    /// status field.
    pub fn is_consistent_with(&self, current: ShipmentStatus) -> bool {
        self.latest().map(|entry| entry.status) == Some(current)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Elapsed time between the first and last entry, if at least one
    /// entry exists.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.recorded_at
            .signed_duration_since(first.recorded_at)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: ShipmentStatus, note: &str) -> TimelineEntry {
        TimelineEntry {
            shipment_id: Uuid::nil(),
            status,
            actor: Actor::driver(7),
            note: Some(note.to_string()),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn new_timeline_is_empty() {
        let timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert!(timeline.latest().is_none());
        assert!(timeline.span().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let timeline = Timeline::new();
        let recorded = timeline.record(entry(ShipmentStatus::Created, "Shipment created"));

        assert_eq!(timeline.len(), 0);
        assert_eq!(recorded.len(), 1);
    }

    #[test]
    fn newest_first_reverses_recording_order() {
        let timeline = Timeline::new()
            .record(entry(ShipmentStatus::Created, "Shipment created"))
            .record(entry(ShipmentStatus::PickedUp, "picked up at depot"));

        let newest = timeline.newest_first();
        assert_eq!(newest[0].status, ShipmentStatus::PickedUp);
        assert_eq!(newest[1].status, ShipmentStatus::Created);

        // Oldest-first view is untouched.
        assert_eq!(timeline.entries()[0].status, ShipmentStatus::Created);
    }

    #[test]
    fn latest_tracks_the_last_recorded_entry() {
        let timeline = Timeline::new()
            .record(entry(ShipmentStatus::Created, "Shipment created"))
            .record(entry(ShipmentStatus::PickedUp, "picked up"));

        assert_eq!(timeline.latest().unwrap().status, ShipmentStatus::PickedUp);
    }

    #[test]
    fn consistency_check_compares_latest_status() {
        let timeline = Timeline::new().record(entry(ShipmentStatus::Created, "Shipment created"));

        assert!(timeline.is_consistent_with(ShipmentStatus::Created));
        assert!(!timeline.is_consistent_with(ShipmentStatus::PickedUp));
        assert!(!Timeline::new().is_consistent_with(ShipmentStatus::Created));
    }

    #[test]
    fn span_measures_first_to_last() {
        let start = Utc::now();
        let first = TimelineEntry {
            recorded_at: start,
            ..entry(ShipmentStatus::Created, "Shipment created")
        };
        let last = TimelineEntry {
            recorded_at: start + chrono::Duration::seconds(90),
            ..entry(ShipmentStatus::PickedUp, "picked up")
        };

        let timeline = Timeline::new().record(first).record(last);
        assert_eq!(timeline.span(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn timeline_serializes_round_trip() {
        let timeline = Timeline::new().record(entry(ShipmentStatus::Created, "Shipment created"));
        let json = serde_json::to_string(&timeline).unwrap();
        let back: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(timeline, back);
    }
}
