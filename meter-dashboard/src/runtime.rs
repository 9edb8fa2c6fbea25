use std::sync::Arc;

use meter_client::api::Backend;
use time::{Date, OffsetDateTime, UtcOffset};
use tokio::sync::mpsc;

use crate::controller::{Effect, Event};

/// Local calendar date, falling back to UTC when the local offset cannot be
/// determined (headless deployments without timezone data).
pub fn local_today() -> Date {
    let now = OffsetDateTime::now_utc();
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset).date(),
        Err(_) => now.date(),
    }
}

/// Execute one reducer effect on a spawned task; the outcome comes back to
/// the event loop through `tx`. Requests are never cancelled — superseded
/// responses are dropped by the reducer's sequence guard instead.
pub fn dispatch(effect: Effect, backend: Arc<dyn Backend>, tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        match effect {
            Effect::FetchDates => {
                metrics::counter!("billing_dates_fetches_total").increment(1);
                let result = backend.billing_dates().await.map_err(|e| e.to_string());
                if let Err(e) = &result {
                    metrics::counter!("billing_dates_fetch_errors_total").increment(1);
                    tracing::warn!(error = %e, "billing dates fetch failed");
                }
                let _ = tx.send(Event::DatesFetched(result)).await;
            }
            Effect::QueryRecords { seq, auto, query } => {
                metrics::counter!("meter_status_queries_total").increment(1);
                let result = backend
                    .meter_exceptions(&query)
                    .await
                    .map_err(|e| e.to_string());
                match &result {
                    Ok(records) => {
                        tracing::debug!(
                            seq,
                            auto,
                            billing_date = %query.billing_date,
                            records = records.len(),
                            "meter status query completed"
                        );
                    }
                    Err(e) => {
                        metrics::counter!("meter_status_query_errors_total").increment(1);
                        tracing::warn!(seq, auto, error = %e, "meter status query failed");
                    }
                }
                let _ = tx.send(Event::RecordsFetched { seq, auto, result }).await;
            }
        }
    });
}
