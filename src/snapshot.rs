//! Market snapshot model
//!
//! Wire types delivered by the snapshot endpoint and the push channel. Section
//! mappings keep the order they arrive in, since that order drives grid and
//! chart category ordering.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A string-keyed mapping that preserves wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value; a replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map keyed by label")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Open/closed state of one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeStatus {
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_open: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_close: Option<String>,
}

/// Exchange code to status. Entries that are not exchange objects (the
/// server also puts a `timestamp` string in this map) are dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MarketStatus(OrderedMap<ExchangeStatus>);

impl MarketStatus {
    pub fn exchange(&self, code: &str) -> Option<&ExchangeStatus> {
        self.0.get(code)
    }
}

impl FromIterator<(String, ExchangeStatus)> for MarketStatus {
    fn from_iter<I: IntoIterator<Item = (String, ExchangeStatus)>>(iter: I) -> Self {
        MarketStatus(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for MarketStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = OrderedMap::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .iter()
            .filter_map(|(code, value)| {
                serde_json::from_value::<ExchangeStatus>(value.clone())
                    .ok()
                    .map(|status| (code.to_string(), status))
            })
            .collect())
    }
}

/// Read an explicit `null` as the type's default, like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One currency pair quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// One stock index quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A complete set of market values for one point in time.
///
/// Every section is optional: an absent section degrades to a placeholder
/// when rendered and never fails the decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_status: Option<MarketStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cambio: Option<OrderedMap<CurrencyQuote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolsa: Option<OrderedMap<IndexQuote>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Envelope returned by the snapshot endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MarketSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT_JSON: &str = r#"{
        "timestamp": "2025-03-14T10:15:30.123456",
        "cambio": {
            "USD-JPY": {"rate": 148.1234, "change": -0.4, "change_percent": -0.27, "source": "Yahoo Finance"},
            "USD-BRL": {"rate": 5.7321, "change": 0.12, "change_percent": 2.01, "source": "Banco Central do Brasil"}
        },
        "bolsa": {
            "SP500": {"price": 5123.45, "change_percent": 0.5, "volume": 2300000},
            "IBOV": {"price": 128456.7, "change_percent": -3.5, "volume": 4100000000, "symbol": "^BVSP"}
        },
        "market_status": {
            "B3": {"is_open": true, "next_open": "Aberto", "next_close": "18:00"},
            "timestamp": "2025-03-14T10:15:30"
        }
    }"#;

    #[test]
    // Section mappings should keep the order they had on the wire.
    fn test_sections_preserve_wire_order() {
        let snapshot: MarketSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();

        let pairs: Vec<&str> = snapshot.cambio.as_ref().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(pairs, vec!["USD-JPY", "USD-BRL"]);

        let indices: Vec<&str> = snapshot.bolsa.as_ref().unwrap().iter().map(|(k, _)| k).collect();
        assert_eq!(indices, vec!["SP500", "IBOV"]);
    }

    #[test]
    // Non-exchange entries of market_status should be ignored, not rejected.
    fn test_market_status_skips_non_exchange_entries() {
        let snapshot: MarketSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        let status = snapshot.market_status.unwrap();

        assert!(status.exchange("B3").unwrap().is_open);
        assert!(status.exchange("timestamp").is_none());
    }

    #[test]
    // Absent sections decode to None rather than failing the snapshot.
    fn test_missing_sections_decode_as_none() {
        let snapshot: MarketSnapshot =
            serde_json::from_str(r#"{"cambio": {"USD-BRL": {"rate": 5.0}}}"#).unwrap();

        assert!(snapshot.bolsa.is_none());
        assert!(snapshot.market_status.is_none());
        let quote = snapshot.cambio.unwrap().get("USD-BRL").cloned().unwrap();
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.source, "");
    }

    #[test]
    // A null number in one quote reads as 0 and keeps the other sections.
    fn test_null_numbers_decode_as_zero() {
        let snapshot: MarketSnapshot = serde_json::from_str(
            r#"{
                "cambio": {"USD-BRL": {"rate": null, "change_percent": null, "source": null}},
                "bolsa": {"IBOV": {"price": 128456.7, "change_percent": null, "volume": null}}
            }"#,
        )
        .unwrap();

        let quote = snapshot.cambio.unwrap().get("USD-BRL").cloned().unwrap();
        assert_eq!(quote.rate, 0.0);
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.source, "");

        let index = snapshot.bolsa.unwrap().get("IBOV").cloned().unwrap();
        assert_eq!(index.price, 128456.7);
        assert_eq!(index.volume, 0.0);
    }

    #[test]
    fn test_failure_envelope_decodes() {
        let response: SnapshotResponse =
            serde_json::from_str(r#"{"success": false, "error": "upstream down"}"#).unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("upstream down"));
    }

    #[test]
    // Re-inserting a key replaces the value in place.
    fn test_insert_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);

        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, vec![("a", &3), ("b", &2)]);
    }
}
