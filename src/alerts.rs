//! Alert derivation
//!
//! Alerts are a pure function of one snapshot: nothing is remembered between
//! snapshots and nothing is deduplicated.

use crate::consts::dashboard_consts::market::{CURRENCY_ALERT_THRESHOLD, INDEX_ALERT_THRESHOLD};
use crate::format::format_percent;
use crate::snapshot::MarketSnapshot;
use std::fmt::{Display, Formatter};

/// Which section an alert came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum AlertKind {
    Currency,
    Index,
}

/// A quote whose change crossed its section threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub label: String,
    pub change_percent: f64,
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, format_percent(self.change_percent))
    }
}

/// Strict thresholds on |change %| per section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    pub currency: f64,
    pub index: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            currency: CURRENCY_ALERT_THRESHOLD,
            index: INDEX_ALERT_THRESHOLD,
        }
    }
}

/// Derive the alerts of a snapshot: currencies first, then indices, each in wire order.
pub fn derive_alerts(snapshot: &MarketSnapshot, thresholds: AlertThresholds) -> Vec<Alert> {
    let currencies = snapshot
        .cambio
        .iter()
        .flat_map(|cambio| cambio.iter())
        .filter(|(_, quote)| quote.change_percent.abs() > thresholds.currency)
        .map(|(pair, quote)| Alert {
            kind: AlertKind::Currency,
            label: pair.to_string(),
            change_percent: quote.change_percent,
        });

    let indices = snapshot
        .bolsa
        .iter()
        .flat_map(|bolsa| bolsa.iter())
        .filter(|(_, quote)| quote.change_percent.abs() > thresholds.index)
        .map(|(index, quote)| Alert {
            kind: AlertKind::Index,
            label: index.to_string(),
            change_percent: quote.change_percent,
        });

    currencies.chain(indices).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{CurrencyQuote, IndexQuote, OrderedMap};

    fn currency(change_percent: f64) -> CurrencyQuote {
        CurrencyQuote {
            rate: 5.0,
            change_percent,
            source: "test".to_string(),
            change: None,
            timestamp: None,
        }
    }

    fn index(change_percent: f64) -> IndexQuote {
        IndexQuote {
            price: 100.0,
            change_percent,
            volume: 1000.0,
            change: None,
            open: None,
            high: None,
            low: None,
            symbol: None,
            source: None,
            timestamp: None,
        }
    }

    #[test]
    // Thresholds are strict: exactly 2.00 / 3.0 is not an alert.
    fn test_thresholds_are_strict() {
        let snapshot = MarketSnapshot {
            cambio: Some(OrderedMap::from_iter([
                ("USD-BRL", currency(2.01)),
                ("USD-EUR", currency(2.00)),
                ("USD-JPY", currency(-2.5)),
            ])),
            bolsa: Some(OrderedMap::from_iter([
                ("IBOV", index(3.5)),
                ("SP500", index(3.0)),
            ])),
            ..Default::default()
        };

        let alerts = derive_alerts(&snapshot, AlertThresholds::default());
        let labels: Vec<String> = alerts.iter().map(|a| a.to_string()).collect();

        assert_eq!(labels, vec!["USD-BRL: +2.01%", "USD-JPY: -2.50%", "IBOV: +3.50%"]);
        assert_eq!(alerts[2].kind, AlertKind::Index);
    }

    #[test]
    fn test_empty_snapshot_has_no_alerts() {
        assert!(derive_alerts(&MarketSnapshot::default(), AlertThresholds::default()).is_empty());
    }
}
