use crate::normalize::normalize_snapshot;
use chrono::{DateTime, Utc};
use skyfare_core::{ApiError, EngineError, InventoryApi};
use skyfare_domain::{FlightQuery, Hold, SeatMap, SeatStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Result of one refresh pass. A transient failure keeps the previous
/// snapshot; the next scheduled tick retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    KeptStale { error: String },
}

/// In-memory seat map for one flight/date/route. The seat collection is
/// replaced wholesale on every successful refresh; nothing is patched
/// field-by-field.
#[derive(Debug)]
pub struct SeatInventoryModel {
    query: FlightQuery,
    holder_id: String,
    map: Option<SeatMap>,
    not_found: bool,
    last_refreshed: Option<DateTime<Utc>>,
}

impl SeatInventoryModel {
    /// Fails fast when the query is missing its flight, date context or
    /// route; a malformed query must never reach the remote service.
    pub fn new(query: FlightQuery, holder_id: impl Into<String>) -> Result<Self, EngineError> {
        if query.flight_id.trim().is_empty() {
            return Err(EngineError::PreconditionFailure(
                "flight id is required".into(),
            ));
        }
        if query.origin.trim().is_empty() || query.destination.trim().is_empty() {
            return Err(EngineError::PreconditionFailure(
                "origin and destination are required".into(),
            ));
        }
        Ok(SeatInventoryModel {
            query,
            holder_id: holder_id.into(),
            map: None,
            not_found: false,
            last_refreshed: None,
        })
    }

    pub fn query(&self) -> &FlightQuery {
        &self.query
    }

    pub fn seat_map(&self) -> Option<&SeatMap> {
        self.map.as_ref()
    }

    /// True once the service has said no seat map exists for this flight.
    /// Terminal: further refreshes are not attempted.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Fetch and apply a fresh snapshot. The active hold, if any, stays
    /// authoritative over the snapshot for the seats it covers: a stale
    /// snapshot listing just-held seats as available must not unwind them.
    pub async fn refresh(
        &mut self,
        api: &dyn InventoryApi,
        active_hold: Option<&Hold>,
    ) -> Result<RefreshOutcome, EngineError> {
        if self.not_found {
            return Err(EngineError::InventoryUnavailable(
                self.query.flight_id.clone(),
            ));
        }

        let snapshot = match api.fetch_seat_map(&self.query).await {
            Ok(snapshot) => snapshot,
            Err(ApiError::NotFound) => {
                tracing::info!(flight_id = %self.query.flight_id, "no seat map for flight, terminal");
                self.map = None;
                self.not_found = true;
                return Err(EngineError::InventoryUnavailable(
                    self.query.flight_id.clone(),
                ));
            }
            Err(err) => {
                tracing::warn!(%err, "seat map refresh failed, keeping previous snapshot");
                return Ok(RefreshOutcome::KeptStale {
                    error: err.to_string(),
                });
            }
        };

        let mut map = match normalize_snapshot(&self.query, &snapshot) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(%err, "snapshot failed to normalize, keeping previous snapshot");
                return Ok(RefreshOutcome::KeptStale {
                    error: err.to_string(),
                });
            }
        };

        let now = Utc::now();
        if let Some(hold) = active_hold {
            if !hold.is_expired(now) {
                overlay_hold(&mut map, hold, &self.holder_id);
            }
        }

        self.map = Some(map);
        self.last_refreshed = Some(now);
        tracing::debug!(flight_id = %self.query.flight_id, "seat map refreshed");
        Ok(RefreshOutcome::Refreshed)
    }
}

/// Force held-by-us status onto the seats a live hold covers. A server-side
/// `booked` still wins (the booking has landed).
fn overlay_hold(map: &mut SeatMap, hold: &Hold, holder_id: &str) {
    for seat_id in &hold.seats {
        if let Some(seat) = map.seat_mut(seat_id) {
            if seat.status != SeatStatus::Booked {
                seat.status = SeatStatus::Held;
                seat.held_by = Some(holder_id.to_string());
                seat.hold_expires_at = Some(hold.hold_until);
            }
        }
    }
}

/// Periodic refresh, owned as a cancellable task. Aborted explicitly via
/// `cancel` or implicitly on drop so no work leaks after the flow ends.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn(
        model: Arc<Mutex<SeatInventoryModel>>,
        api: Arc<dyn InventoryApi>,
        active_hold: Arc<Mutex<Option<Hold>>>,
        every: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let hold = active_hold.lock().await.clone();
                let mut model = model.lock().await;
                match model.refresh(api.as_ref(), hold.as_ref()).await {
                    Ok(RefreshOutcome::Refreshed) => {}
                    Ok(RefreshOutcome::KeptStale { error }) => {
                        tracing::debug!(%error, "refresh tick kept stale snapshot");
                    }
                    Err(_) => {
                        // terminal: no seat map for this flight
                        break;
                    }
                }
            }
        });
        RefreshTask { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use serde_json::json;
    use skyfare_core::HoldGrant;
    use skyfare_domain::{Addon, Coupon};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn query() -> FlightQuery {
        FlightQuery {
            flight_id: "SK-101".into(),
            travel_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            origin: "DEL".into(),
            destination: "BOM".into(),
        }
    }

    struct ScriptedApi {
        responses: std::sync::Mutex<Vec<Result<serde_json::Value, ApiError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(responses: Vec<Result<serde_json::Value, ApiError>>) -> Self {
            ScriptedApi {
                responses: std::sync::Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InventoryApi for ScriptedApi {
        async fn fetch_seat_map(
            &self,
            _query: &FlightQuery,
        ) -> Result<serde_json::Value, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(ApiError::Transport("script exhausted".into()));
            }
            responses.remove(0)
        }

        async fn request_hold(
            &self,
            _query: &FlightQuery,
            _seat_ids: &[String],
            _ttl_minutes: u32,
            _holder_id: &str,
        ) -> Result<HoldGrant, ApiError> {
            Err(ApiError::Transport("not part of this test".into()))
        }

        async fn fetch_addons(&self) -> Result<Vec<Addon>, ApiError> {
            Ok(vec![])
        }

        async fn fetch_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
            Ok(vec![])
        }
    }

    fn snapshot() -> serde_json::Value {
        json!({
            "basePrice": 5000,
            "rows": 1,
            "cols": 2,
            "seats": [
                { "seatId": "1A", "row": 1, "col": 1, "seatClass": "Economy" },
                { "seatId": "1B", "row": 1, "col": 2, "seatClass": "Economy" }
            ]
        })
    }

    #[test]
    fn missing_route_is_a_local_precondition_failure() {
        let mut q = query();
        q.origin = String::new();
        let err = SeatInventoryModel::new(q, "me").unwrap_err();
        assert!(matches!(err, EngineError::PreconditionFailure(_)));
    }

    #[tokio::test]
    async fn not_found_is_terminal_and_stops_calling_the_service() {
        let api = ScriptedApi::new(vec![Err(ApiError::NotFound)]);
        let mut model = SeatInventoryModel::new(query(), "me").unwrap();

        let err = model.refresh(&api, None).await.unwrap_err();
        assert!(matches!(err, EngineError::InventoryUnavailable(_)));
        assert!(model.is_not_found());
        assert!(model.seat_map().is_none());

        // second refresh short-circuits without a network call
        let err = model.refresh(&api, None).await.unwrap_err();
        assert!(matches!(err, EngineError::InventoryUnavailable(_)));
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn transient_failure_keeps_the_previous_snapshot() {
        let api = ScriptedApi::new(vec![
            Ok(snapshot()),
            Err(ApiError::Transport("connection reset".into())),
        ]);
        let mut model = SeatInventoryModel::new(query(), "me").unwrap();

        assert_eq!(
            model.refresh(&api, None).await.unwrap(),
            RefreshOutcome::Refreshed
        );
        assert_eq!(model.seat_map().unwrap().seats.len(), 2);

        let outcome = model.refresh(&api, None).await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::KeptStale { .. }));
        // previous snapshot survives for the next scheduled retry
        assert_eq!(model.seat_map().unwrap().seats.len(), 2);
        assert!(!model.is_not_found());
    }

    #[tokio::test]
    async fn live_hold_overrides_a_stale_snapshot() {
        // the stale snapshot claims 1A is still available
        let api = ScriptedApi::new(vec![Ok(snapshot())]);
        let mut model = SeatInventoryModel::new(query(), "me").unwrap();
        let hold = Hold::new(
            vec!["1A".into()],
            Utc::now() + ChronoDuration::minutes(10),
        );

        model.refresh(&api, Some(&hold)).await.unwrap();
        let seat = model.seat_map().unwrap().seat("1A").unwrap();
        assert_eq!(seat.status, SeatStatus::Held);
        assert_eq!(seat.held_by.as_deref(), Some("me"));
        assert_eq!(seat.hold_expires_at, Some(hold.hold_until));

        // uncovered seats keep their snapshot status
        let other = model.seat_map().unwrap().seat("1B").unwrap();
        assert_eq!(other.status, SeatStatus::Available);
    }

    #[tokio::test]
    async fn expired_hold_does_not_override_the_snapshot() {
        let api = ScriptedApi::new(vec![Ok(snapshot())]);
        let mut model = SeatInventoryModel::new(query(), "me").unwrap();
        let hold = Hold::new(
            vec!["1A".into()],
            Utc::now() - ChronoDuration::seconds(5),
        );

        model.refresh(&api, Some(&hold)).await.unwrap();
        let seat = model.seat_map().unwrap().seat("1A").unwrap();
        assert_eq!(seat.status, SeatStatus::Available);
    }

    #[tokio::test]
    async fn refresh_task_cancels_cleanly() {
        let api: Arc<dyn InventoryApi> = Arc::new(ScriptedApi::new(vec![Ok(snapshot())]));
        let model = Arc::new(Mutex::new(SeatInventoryModel::new(query(), "me").unwrap()));
        let hold = Arc::new(Mutex::new(None));

        let task = RefreshTask::spawn(
            model.clone(),
            api,
            hold,
            Duration::from_millis(10),
        );
        // first tick fires immediately
        tokio::time::sleep(Duration::from_millis(50)).await;
        task.cancel();

        assert!(model.lock().await.seat_map().is_some());
    }
}
