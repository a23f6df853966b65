//! Market summary and plain-text report
//!
//! Used by headless mode and the `snapshot` command, where there is no
//! dashboard to render into.

use crate::alerts::{Alert, AlertThresholds, derive_alerts};
use crate::consts::dashboard_consts::market::TOP_MOVERS;
use crate::format::{
    NumberLocale, format_percent, format_price, format_rate, format_report_time, format_volume,
    parse_timestamp,
};
use crate::snapshot::{CurrencyQuote, IndexQuote, MarketSnapshot};

/// Executive summary of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub timestamp: Option<String>,
    /// `None` when the primary exchange is not in the snapshot.
    pub market_open: Option<bool>,
    pub top_currencies: Vec<(String, CurrencyQuote)>,
    pub top_indices: Vec<(String, IndexQuote)>,
    pub alerts: Vec<Alert>,
}

impl MarketSummary {
    pub fn from_snapshot(
        snapshot: &MarketSnapshot,
        primary_exchange: &str,
        thresholds: AlertThresholds,
    ) -> Self {
        let market_open = snapshot
            .market_status
            .as_ref()
            .and_then(|status| status.exchange(primary_exchange))
            .map(|status| status.is_open);

        let mut top_currencies: Vec<(String, CurrencyQuote)> = snapshot
            .cambio
            .iter()
            .flat_map(|cambio| cambio.iter())
            .map(|(pair, quote)| (pair.to_string(), quote.clone()))
            .collect();
        top_currencies.sort_by(|a, b| b.1.change_percent.abs().total_cmp(&a.1.change_percent.abs()));
        top_currencies.truncate(TOP_MOVERS);

        let mut top_indices: Vec<(String, IndexQuote)> = snapshot
            .bolsa
            .iter()
            .flat_map(|bolsa| bolsa.iter())
            .map(|(index, quote)| (index.to_string(), quote.clone()))
            .collect();
        top_indices.sort_by(|a, b| b.1.change_percent.abs().total_cmp(&a.1.change_percent.abs()));
        top_indices.truncate(TOP_MOVERS);

        Self {
            timestamp: snapshot.timestamp.clone(),
            market_open,
            top_currencies,
            top_indices,
            alerts: derive_alerts(snapshot, thresholds),
        }
    }
}

fn trend_glyph(change: f64) -> &'static str {
    if change >= 0.0 { "📈" } else { "📉" }
}

/// Render a fixed-width text report of a snapshot.
pub fn render_report(
    snapshot: &MarketSnapshot,
    primary_exchange: &str,
    thresholds: AlertThresholds,
    locale: NumberLocale,
) -> String {
    let summary = MarketSummary::from_snapshot(snapshot, primary_exchange, thresholds);
    let rule = "=".repeat(80);
    let thin_rule = "-".repeat(40);
    let mut lines = vec![rule.clone(), "MARKET DATA".to_string(), rule.clone()];

    let updated = summary
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .map(|time| format_report_time(&time))
        .unwrap_or_else(|| "unknown".to_string());
    lines.push(format!("Updated: {}", updated));
    lines.push(String::new());

    if let Some(is_open) = summary.market_open {
        let (glyph, text) = if is_open {
            ("🟢", "OPEN")
        } else {
            ("🔴", "CLOSED")
        };
        lines.push(format!("{}: {} {}", primary_exchange, glyph, text));
        lines.push(String::new());
    }

    lines.push("CURRENCIES".to_string());
    lines.push(thin_rule.clone());
    for (pair, quote) in snapshot.cambio.iter().flat_map(|cambio| cambio.iter()) {
        let change = quote.change.unwrap_or(quote.change_percent);
        lines.push(format!(
            "{:<12} {:>12} {} {:>8}",
            pair,
            format_rate(quote.rate, locale),
            trend_glyph(change),
            format_percent(quote.change_percent)
        ));
        lines.push(format!("{:13}Source: {}", "", quote.source));
    }
    lines.push(String::new());

    lines.push("INDICES".to_string());
    lines.push(thin_rule);
    for (index, quote) in snapshot.bolsa.iter().flat_map(|bolsa| bolsa.iter()) {
        let change = quote.change.unwrap_or(quote.change_percent);
        lines.push(format!(
            "{:<12} {:>14} {} {:>8}",
            index,
            format_price(quote.price, locale),
            trend_glyph(change),
            format_percent(quote.change_percent)
        ));
        let change_text = match quote.change {
            Some(change) if change >= 0.0 => format!("+{}", format_price(change, locale)),
            Some(change) => format_price(change, locale),
            None => "n/a".to_string(),
        };
        lines.push(format!(
            "{:13}Change: {} | Volume: {}",
            "",
            change_text,
            format_volume(quote.volume)
        ));
    }
    lines.push(String::new());

    if !summary.top_currencies.is_empty() || !summary.top_indices.is_empty() {
        lines.push("TOP MOVERS".to_string());
        let movers = summary
            .top_currencies
            .iter()
            .map(|(pair, quote)| (pair, quote.change_percent))
            .chain(
                summary
                    .top_indices
                    .iter()
                    .map(|(index, quote)| (index, quote.change_percent)),
            );
        for (label, change_percent) in movers {
            lines.push(format!(
                "  {} {:<12} {:>8}",
                trend_glyph(change_percent),
                label,
                format_percent(change_percent)
            ));
        }
        lines.push(String::new());
    }

    if !summary.alerts.is_empty() {
        lines.push("ALERTS".to_string());
        lines.extend(summary.alerts.iter().map(|alert| format!("  🚨 {}", alert)));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> MarketSnapshot {
        serde_json::from_str(
            r#"{
                "timestamp": "2025-03-14T10:15:30",
                "cambio": {
                    "USD-EUR": {"rate": 0.9213, "change_percent": 0.3, "source": "Fixer.io"},
                    "USD-BRL": {"rate": 5.7321, "change_percent": -2.4, "source": "BCB"}
                },
                "bolsa": {
                    "IBOV": {"price": 128456.7, "change": 1234.5, "change_percent": 1.0, "volume": 4100000000}
                },
                "market_status": {"B3": {"is_open": false}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    // Top movers are ordered by absolute change, largest first.
    fn test_summary_orders_movers_by_magnitude() {
        let summary =
            MarketSummary::from_snapshot(&sample_snapshot(), "B3", AlertThresholds::default());

        let pairs: Vec<&str> = summary
            .top_currencies
            .iter()
            .map(|(pair, _)| pair.as_str())
            .collect();
        assert_eq!(pairs, vec!["USD-BRL", "USD-EUR"]);
        assert_eq!(summary.market_open, Some(false));
        assert_eq!(summary.alerts.len(), 1);
        assert_eq!(summary.alerts[0].label, "USD-BRL");
    }

    #[test]
    fn test_report_contains_formatted_sections() {
        let report = render_report(
            &sample_snapshot(),
            "B3",
            AlertThresholds::default(),
            NumberLocale::PT_BR,
        );

        assert!(report.contains("Updated: 14/03/2025 10:15:30"));
        assert!(report.contains("B3: 🔴 CLOSED"));
        assert!(report.contains("5,7321"));
        assert!(report.contains("128.456,70"));
        assert!(report.contains("Change: +1.234,50 | Volume: 4.1B"));
        assert!(report.contains("🚨 USD-BRL: -2.40%"));

        let movers = report.split("TOP MOVERS").nth(1).unwrap();
        let usd_brl = movers.find("USD-BRL").unwrap();
        let usd_eur = movers.find("USD-EUR").unwrap();
        assert!(usd_brl < usd_eur);
        assert!(movers.contains("IBOV"));
    }

    #[test]
    // Without the primary exchange the status line is left out.
    fn test_report_skips_unknown_exchange() {
        let report = render_report(
            &sample_snapshot(),
            "NYSE",
            AlertThresholds::default(),
            NumberLocale::PT_BR,
        );

        assert!(!report.contains("NYSE:"));
        assert!(report.contains("TOP MOVERS"));
    }
}
