//! Soroban RPC client: polls `getEvents` and decodes launchpad and locker
//! events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.
//!
//! ## Encoding
//!
//! The RPC sends topics and event data as base64 `ScVal` XDR. Data is turned
//! into JSON through [`crate::xdr`] before fields are picked out of it.
//! JSON topics (`{"type":"symbol","value":"contrib"}`) and JSON data are
//! accepted as well.

use std::time::Duration;

use reqwest::Client;
use stellar_xdr::curr::ScVal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{normalize_sale_id, EventKind, LaunchpadEvent};
use crate::xdr;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    pub topic: Vec<String>,
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events for `contract_ids` from the RPC.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if is_hard_error(err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            continue;
        }

        let result = body
            .result
            .ok_or_else(|| IndexerError::EventParse("Empty result from getEvents".to_string()))?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok((result.events, result.cursor, result.latest_ledger));
    }
}

/// Invalid request and unknown method never succeed on retry.
fn is_hard_error(code: i64) -> bool {
    code == -32600 || code == -32601
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode raw RPC events. Events from failed contract calls and events
/// without a topic are skipped.
pub fn decode_events(raw: &[RawEvent], fallback_contract: &str) -> Vec<LaunchpadEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, fallback_contract))
        .collect()
}

fn decode_single(raw: &RawEvent, fallback_contract: &str) -> Option<LaunchpadEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let sale_id = if kind.is_sale_scoped() {
        raw.topic.get(1).and_then(|t| extract_sale_id(t))
    } else {
        None
    };

    let (actor, amount, status) = decode_data(&data_json(&raw.value), kind);

    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}-{}-{}-{}",
                raw.tx_hash.as_deref().unwrap_or(""),
                kind.as_str(),
                sale_id.as_deref().unwrap_or("")
            )
        });

    Some(LaunchpadEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        sale_id,
        actor,
        amount,
        status,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| fallback_contract.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Event data as JSON. Base64 `ScVal` strings are decoded, anything else
/// passes through.
fn data_json(value: &Value) -> Value {
    value
        .as_str()
        .and_then(xdr::decode_base64)
        .map(|v| xdr::to_json(&v))
        .unwrap_or_else(|| value.clone())
}

/// Pull `(actor, amount, status)` out of the event data.
fn decode_data(value: &Value, kind: EventKind) -> (Option<String>, Option<String>, Option<String>) {
    match kind {
        EventKind::SaleDeployed => (extract_field(value, &["creator", "deployer"]), None, None),
        EventKind::Contribution | EventKind::TokensClaimed | EventKind::RefundIssued => (
            extract_field(value, &["participant"]).or_else(|| find_nested(value, "participant")),
            extract_field(value, &["amount"]),
            None,
        ),
        EventKind::SaleFinalized => (
            None,
            extract_field(value, &["net_raised"]),
            value.get("status").and_then(enum_name),
        ),
        EventKind::LiquidityLocked => (
            extract_field(value, &["locker"]),
            extract_field(value, &["amount"]),
            None,
        ),
        EventKind::FeeSet => (None, scalar(value), None),
        EventKind::FeeReceiverSet => (scalar(value), None, None),
        EventKind::FeeOrderSet => (None, None, enum_name(value)),
        EventKind::OwnershipTransferred | EventKind::BeneficiarySet => {
            // Data is `(previous, new)`; the new holder is the actor.
            let actor = value
                .as_array()
                .and_then(|pair| pair.get(1))
                .and_then(scalar);
            (actor, None, None)
        }
        EventKind::Locked => (extract_field(value, &["beneficiary"]), None, None),
        EventKind::LockExtended => (None, extract_field(value, &["unlock_time"]), None),
        EventKind::Swept | EventKind::Withdrawn => (
            extract_field(value, &["to"]),
            extract_field(value, &["amount"]),
            None,
        ),
        EventKind::SaleStarted | EventKind::TemplateSet | EventKind::Unknown => {
            (None, None, None)
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unit enum variants decode as `"Name"` or `["Name"]`.
fn enum_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(|v| v.as_str()).map(String::from),
        _ => None,
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(scalar)
}

fn find_nested(value: &Value, key: &str) -> Option<String> {
    if let Value::Object(map) = value {
        for (k, v) in map {
            if k == key {
                return v.as_str().map(String::from);
            }
            if let Some(found) = find_nested(v, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Extract a Soroban Symbol from a topic entry.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    if let Some(ScVal::Symbol(symbol)) = xdr::decode_base64(raw) {
        return String::from_utf8_lossy(symbol.0.as_slice()).into_owned();
    }
    raw.to_string()
}

/// Extract a 32-byte sale id from a topic entry as lower-case hex.
fn extract_sale_id(raw: &str) -> Option<String> {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return normalize_sale_id(s);
        }
    }
    if let Some(ScVal::Bytes(bytes)) = xdr::decode_base64(raw) {
        return (bytes.0.len() == 32).then(|| hex::encode(bytes.0.as_slice()));
    }
    normalize_sale_id(raw)
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}
