//! Section projections
//!
//! Each function maps one part of a snapshot onto a [`Fragment`]. They are
//! independent of each other and of any previous snapshot.

use super::bindings::{Card, Fragment, Tone, Trend};
use crate::alerts::Alert;
use crate::format::{
    NumberLocale, currency_flag, format_percent, format_price, format_rate, format_time_of_day,
    format_volume, index_icon, parse_timestamp,
};
use crate::snapshot::{CurrencyQuote, IndexQuote, MarketStatus, OrderedMap};
use chrono::{DateTime, Local};

pub const MARKET_STATUS_UNAVAILABLE: &str = "Market status unavailable";
pub const CURRENCY_DATA_UNAVAILABLE: &str = "Currency data unavailable";
pub const INDEX_DATA_UNAVAILABLE: &str = "Index data unavailable";

pub fn market_status(status: Option<&MarketStatus>, primary_exchange: &str) -> Fragment {
    match status.and_then(|status| status.exchange(primary_exchange)) {
        Some(exchange) if exchange.is_open => Fragment::Banner {
            text: format!("{}: MARKET OPEN", primary_exchange),
            tone: Tone::Positive,
        },
        Some(_) => Fragment::Banner {
            text: format!("{}: MARKET CLOSED", primary_exchange),
            tone: Tone::Negative,
        },
        None => Fragment::Placeholder(MARKET_STATUS_UNAVAILABLE.to_string()),
    }
}

pub fn currency_grid(cambio: Option<&OrderedMap<CurrencyQuote>>, locale: NumberLocale) -> Fragment {
    let Some(cambio) = cambio else {
        return Fragment::Placeholder(CURRENCY_DATA_UNAVAILABLE.to_string());
    };

    Fragment::Cards(
        cambio
            .iter()
            .map(|(pair, quote)| Card {
                glyph: currency_flag(pair),
                label: pair.to_string(),
                value: format_rate(quote.rate, locale),
                change: format_percent(quote.change_percent),
                trend: Trend::of(quote.change_percent),
                footer: quote.source.clone(),
            })
            .collect(),
    )
}

pub fn index_grid(bolsa: Option<&OrderedMap<IndexQuote>>, locale: NumberLocale) -> Fragment {
    let Some(bolsa) = bolsa else {
        return Fragment::Placeholder(INDEX_DATA_UNAVAILABLE.to_string());
    };

    Fragment::Cards(
        bolsa
            .iter()
            .map(|(index, quote)| Card {
                glyph: index_icon(index),
                label: index.to_string(),
                value: format_price(quote.price, locale),
                change: format_percent(quote.change_percent),
                trend: Trend::of(quote.change_percent),
                footer: format!("Volume: {}", format_volume(quote.volume)),
            })
            .collect(),
    )
}

/// Chart points for a section, in wire order.
pub fn chart_points<'a, Q: 'a>(
    section: &'a OrderedMap<Q>,
    change_percent: impl Fn(&Q) -> f64 + 'a,
) -> impl Iterator<Item = (String, f64)> + 'a {
    section
        .iter()
        .map(move |(label, quote)| (label.to_string(), change_percent(quote)))
}

/// The alert list and the visibility of its section.
pub fn alerts(alerts: &[Alert]) -> (Fragment, Fragment) {
    (
        Fragment::AlertList(alerts.iter().map(Alert::to_string).collect()),
        Fragment::Visibility(!alerts.is_empty()),
    )
}

/// The "last updated" label, or `None` to leave it as it is.
pub fn last_update(received_at: Option<&str>) -> Option<Fragment> {
    let raw = received_at?;
    match parse_timestamp(raw) {
        Some(time) => Some(Fragment::Text(format_time_of_day(&time))),
        None => {
            log::warn!("Unparseable update timestamp: {}", raw);
            None
        }
    }
}

pub fn clock(now: &DateTime<Local>) -> Fragment {
    Fragment::Text(format_time_of_day(now))
}

pub fn connection_badge(online: bool) -> Fragment {
    Fragment::Badge {
        online,
        label: if online { "Online" } else { "Offline" }.to_string(),
    }
}

pub fn refresh_button(busy: bool) -> Fragment {
    Fragment::Button {
        label: if busy { "Refreshing..." } else { "Refresh" }.to_string(),
        busy,
    }
}

pub fn loading_overlay(visible: bool) -> Fragment {
    Fragment::Overlay {
        visible,
        message: "Loading market data...".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;
    use crate::snapshot::ExchangeStatus;

    fn usd_quote(change_percent: f64) -> CurrencyQuote {
        CurrencyQuote {
            rate: 5.1234,
            change_percent,
            source: "BCB".to_string(),
            change: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_market_status_banner() {
        let status: MarketStatus = vec![(
            "B3".to_string(),
            ExchangeStatus {
                is_open: false,
                next_open: None,
                next_close: None,
            },
        )]
        .into_iter()
        .collect();

        assert_eq!(
            market_status(Some(&status), "B3"),
            Fragment::Banner {
                text: "B3: MARKET CLOSED".to_string(),
                tone: Tone::Negative
            }
        );
        // A status map without the primary exchange degrades to the placeholder.
        assert_eq!(
            market_status(Some(&status), "NYSE"),
            Fragment::Placeholder(MARKET_STATUS_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_currency_card_contents() {
        let cambio: OrderedMap<CurrencyQuote> =
            vec![("USD-BRL", usd_quote(-1.2))].into_iter().collect();

        match currency_grid(Some(&cambio), NumberLocale::PT_BR) {
            Fragment::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].glyph, "🇺🇸🇧🇷");
                assert_eq!(cards[0].value, "5,1234");
                assert_eq!(cards[0].change, "-1.20%");
                assert_eq!(cards[0].trend, Trend::Down);
                assert_eq!(cards[0].footer, "BCB");
            }
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_pair_uses_generic_glyph() {
        let cambio: OrderedMap<CurrencyQuote> =
            vec![("XYZ-ABC", usd_quote(0.5))].into_iter().collect();

        match currency_grid(Some(&cambio), NumberLocale::PT_BR) {
            Fragment::Cards(cards) => assert_eq!(cards[0].glyph, "💱"),
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn test_missing_sections_render_placeholders() {
        assert_eq!(
            currency_grid(None, NumberLocale::PT_BR),
            Fragment::Placeholder(CURRENCY_DATA_UNAVAILABLE.to_string())
        );
        assert_eq!(
            index_grid(None, NumberLocale::PT_BR),
            Fragment::Placeholder(INDEX_DATA_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_index_card_footer_has_volume() {
        let bolsa: OrderedMap<IndexQuote> = vec![(
            "IBOV",
            IndexQuote {
                price: 128_456.78,
                change_percent: 0.0,
                volume: 4_100_000_000.0,
                change: None,
                open: None,
                high: None,
                low: None,
                symbol: None,
                source: None,
                timestamp: None,
            },
        )]
        .into_iter()
        .collect();

        match index_grid(Some(&bolsa), NumberLocale::PT_BR) {
            Fragment::Cards(cards) => {
                assert_eq!(cards[0].value, "128.456,78");
                assert_eq!(cards[0].change, "+0.00%");
                assert_eq!(cards[0].footer, "Volume: 4.1B");
            }
            other => panic!("unexpected fragment: {:?}", other),
        }
    }

    #[test]
    fn test_alert_section_hidden_without_alerts() {
        let (list, visibility) = alerts(&[]);
        assert_eq!(list, Fragment::AlertList(vec![]));
        assert_eq!(visibility, Fragment::Visibility(false));

        let (list, visibility) = alerts(&[Alert {
            kind: AlertKind::Index,
            label: "IBOV".to_string(),
            change_percent: 3.5,
        }]);
        assert_eq!(list, Fragment::AlertList(vec!["IBOV: +3.50%".to_string()]));
        assert_eq!(visibility, Fragment::Visibility(true));
    }

    #[test]
    fn test_last_update_ignores_missing_and_garbage() {
        assert_eq!(last_update(None), None);
        assert_eq!(last_update(Some("yesterday-ish")), None);
        assert_eq!(
            last_update(Some("2025-03-14T10:15:30.123456")),
            Some(Fragment::Text("10:15:30".to_string()))
        );
    }
}
