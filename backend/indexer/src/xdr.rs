//! Conversion of Soroban `ScVal` XDR, as returned by `getEvents`, into plain
//! JSON.
//!
//! Maps become objects keyed by their symbol keys, 128-bit integers become
//! decimal strings, addresses become strkeys and byte strings become
//! lower-case hex.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Map, Value};
use stellar_xdr::curr::{Int128Parts, Limits, PublicKey, ReadXdr, ScAddress, ScVal, UInt128Parts};

/// Decode a base64 `ScVal`. `None` when `raw` is not one.
pub fn decode_base64(raw: &str) -> Option<ScVal> {
    let bytes = STANDARD.decode(raw.trim()).ok()?;
    ScVal::from_xdr(bytes, Limits::none()).ok()
}

pub fn to_json(value: &ScVal) -> Value {
    match value {
        ScVal::Bool(b) => Value::Bool(*b),
        ScVal::U32(n) => json!(n),
        ScVal::I32(n) => json!(n),
        ScVal::U64(n) => json!(n),
        ScVal::I64(n) => json!(n),
        ScVal::Timepoint(t) => json!(t.0),
        ScVal::Duration(d) => json!(d.0),
        ScVal::U128(parts) => Value::String(u128_from(parts).to_string()),
        ScVal::I128(parts) => Value::String(i128_from(parts).to_string()),
        ScVal::Bytes(bytes) => Value::String(hex::encode(bytes.0.as_slice())),
        ScVal::String(s) => Value::String(String::from_utf8_lossy(s.0.as_slice()).into_owned()),
        ScVal::Symbol(s) => Value::String(String::from_utf8_lossy(s.0.as_slice()).into_owned()),
        ScVal::Address(address) => Value::String(strkey(address)),
        ScVal::Vec(Some(items)) => Value::Array(items.0.iter().map(to_json).collect()),
        ScVal::Map(Some(entries)) => {
            let mut object = Map::new();
            for entry in entries.0.iter() {
                let key = match to_json(&entry.key) {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                object.insert(key, to_json(&entry.val));
            }
            Value::Object(object)
        }
        _ => Value::Null,
    }
}

fn u128_from(parts: &UInt128Parts) -> u128 {
    (u128::from(parts.hi) << 64) | u128::from(parts.lo)
}

fn i128_from(parts: &Int128Parts) -> i128 {
    (i128::from(parts.hi) << 64) | i128::from(parts.lo)
}

fn strkey(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(account) => {
            let PublicKey::PublicKeyTypeEd25519(key) = &account.0;
            stellar_strkey::ed25519::PublicKey(key.0).to_string()
        }
        ScAddress::Contract(hash) => stellar_strkey::Contract(hash.0).to_string(),
    }
}
