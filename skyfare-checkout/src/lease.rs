use chrono::{DateTime, Utc};
use skyfare_core::{EngineError, InventoryApi};
use skyfare_domain::{FlightQuery, Hold, PartyProfile, Passenger, SeatMap};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// User-facing notice shown when a protected party member blocks an
/// exit-row/extra-legroom seat.
pub const RESTRICTION_NOTICE: &str =
    "Exit-row (extra-legroom) seats cannot be selected for child or assisted passengers.";

/// Why a toggle was silently ignored (matching how the seat map treats
/// clicks on unavailable seats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SeatBooked,
    HeldByOther,
    SelectionFull,
    UnknownSeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Rejected with a user-facing notice; Selection untouched.
    Restricted { message: String },
    Ignored(IgnoreReason),
}

/// Owns the seat selection set and the hold lifecycle for one booking flow.
/// Selection order is significant: the passenger at index i is seated in the
/// seat at index i.
pub struct LeaseController {
    holder_id: String,
    max_selectable: usize,
    max_party: usize,
    selection: Vec<String>,
    hold: Option<Hold>,
    party: PartyProfile,
}

impl LeaseController {
    pub fn new(holder_id: impl Into<String>, party_size: usize, max_party: usize) -> Self {
        let max_party = max_party.max(1);
        LeaseController {
            holder_id: holder_id.into(),
            max_selectable: party_size.clamp(1, max_party),
            max_party,
            selection: Vec::new(),
            hold: None,
            party: PartyProfile::default(),
        }
    }

    pub fn holder_id(&self) -> &str {
        &self.holder_id
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn max_selectable(&self) -> usize {
        self.max_selectable
    }

    pub fn hold(&self) -> Option<&Hold> {
        self.hold.as_ref()
    }

    /// Change the party size. The passenger list is resized in step,
    /// preserving already-entered leading entries; surplus selected seats
    /// are dropped from the tail.
    pub fn resize_party(&mut self, size: usize, passengers: &mut Vec<Passenger>) {
        self.max_selectable = size.clamp(1, self.max_party);
        passengers.resize_with(self.max_selectable, Passenger::blank);
        if self.selection.len() > self.max_selectable {
            let dropped: Vec<String> = self.selection.split_off(self.max_selectable);
            tracing::info!(?dropped, "party shrank, dropping surplus selected seats");
        }
        self.party = PartyProfile::from_passengers(passengers);
    }

    /// Re-evaluate the party composition. Any already-selected restricted
    /// seat is dropped the moment the composition starts requiring
    /// protection, not just at selection time. Returns the dropped seats.
    pub fn update_party(&mut self, passengers: &[Passenger], map: &SeatMap) -> Vec<String> {
        self.party = PartyProfile::from_passengers(passengers);
        if !self.party.requires_protection() {
            return Vec::new();
        }
        let mut dropped = Vec::new();
        self.selection.retain(|seat_id| {
            let restricted = map
                .seat(seat_id)
                .map(|s| s.extra_legroom)
                .unwrap_or(false);
            if restricted {
                dropped.push(seat_id.clone());
            }
            !restricted
        });
        if !dropped.is_empty() {
            tracing::info!(?dropped, "party composition changed, dropping restricted seats");
        }
        dropped
    }

    /// Toggle a seat in or out of the selection against the current map.
    pub fn toggle(&mut self, seat_id: &str, map: &SeatMap) -> ToggleOutcome {
        if let Some(pos) = self.selection.iter().position(|s| s == seat_id) {
            self.selection.remove(pos);
            return ToggleOutcome::Deselected;
        }

        let Some(seat) = map.seat(seat_id) else {
            return ToggleOutcome::Ignored(IgnoreReason::UnknownSeat);
        };
        if seat.is_booked() {
            return ToggleOutcome::Ignored(IgnoreReason::SeatBooked);
        }
        if seat.held_by_other(&self.holder_id) {
            return ToggleOutcome::Ignored(IgnoreReason::HeldByOther);
        }
        if self.selection.len() >= self.max_selectable {
            return ToggleOutcome::Ignored(IgnoreReason::SelectionFull);
        }
        if seat.extra_legroom && self.party.requires_protection() {
            return ToggleOutcome::Restricted {
                message: RESTRICTION_NOTICE.to_string(),
            };
        }

        self.selection.push(seat_id.to_string());
        ToggleOutcome::Selected
    }

    /// Request a server-side hold on the full selection. Sent only when the
    /// selection is complete; on failure the remote message is surfaced
    /// verbatim and the selection is left unchanged.
    pub async fn request_hold(
        &mut self,
        api: &dyn InventoryApi,
        query: &FlightQuery,
        ttl_minutes: u32,
    ) -> Result<&Hold, EngineError> {
        if self.selection.len() != self.max_selectable {
            return Err(EngineError::PreconditionFailure(format!(
                "select exactly {} seat(s)",
                self.max_selectable
            )));
        }
        if let Some(hold) = &self.hold {
            if !hold.is_expired(Utc::now()) {
                return Err(EngineError::PreconditionFailure(
                    "a seat hold is already active".into(),
                ));
            }
        }

        let grant = api
            .request_hold(query, &self.selection, ttl_minutes, &self.holder_id)
            .await
            .map_err(|e| EngineError::HoldFailed(e.to_string()))?;

        tracing::info!(seats = ?self.selection, hold_until = %grant.hold_until, "seat hold confirmed");
        Ok(&*self
            .hold
            .insert(Hold::new(self.selection.clone(), grant.hold_until)))
    }

    /// Clear the hold and the selection once the TTL has lapsed. Returns
    /// true when an expiry was observed; the flow must fall back to seat
    /// selection even mid-form.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match &self.hold {
            Some(hold) if hold.is_expired(now) => {
                tracing::info!("seat hold expired, clearing selection");
                self.hold = None;
                self.selection.clear();
                true
            }
            _ => false,
        }
    }

    /// Drop selection and hold after a successful booking.
    pub fn complete(&mut self) {
        self.hold = None;
        self.selection.clear();
    }

    /// Teardown. There is no early-release call to the service; the local
    /// hold is dropped and the server-side TTL is left to lapse.
    pub fn release(&mut self) {
        self.hold = None;
        self.selection.clear();
    }
}

/// One-second countdown that projects `hold_until` to the UI. The remaining
/// time is re-derived from the deadline on every tick, never decremented, so
/// it tolerates clock drift and suspended timers. The zero tick expires the
/// lease, clearing hold and selection. Cancelled explicitly or on drop.
pub struct CountdownTask {
    handle: JoinHandle<()>,
}

impl CountdownTask {
    pub fn spawn(
        lease: Arc<Mutex<LeaseController>>,
        hold_until: DateTime<Utc>,
    ) -> (Self, watch::Receiver<i64>) {
        let initial = (hold_until - Utc::now()).num_milliseconds().max(0);
        let (tx, rx) = watch::channel(initial);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let remaining = (hold_until - Utc::now()).num_milliseconds().max(0);
                if tx.send(remaining).is_err() {
                    break;
                }
                if remaining == 0 {
                    lease.lock().await.expire_if_due(Utc::now());
                    break;
                }
            }
        });
        (CountdownTask { handle }, rx)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for CountdownTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
