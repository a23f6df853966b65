//! Display formatting
//!
//! Number, percent, volume and time formatting shared by the dashboard
//! sections and the text report.

use crate::consts::dashboard_consts::market::DEFAULT_LOCALE;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Thousands and decimal separators of a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    tag: &'static str,
    thousands: char,
    decimal: char,
}

impl NumberLocale {
    pub const PT_BR: NumberLocale = NumberLocale {
        tag: "pt-BR",
        thousands: '.',
        decimal: ',',
    };
    pub const EN_US: NumberLocale = NumberLocale {
        tag: "en-US",
        thousands: ',',
        decimal: '.',
    };
    pub const DE_DE: NumberLocale = NumberLocale {
        tag: "de-DE",
        thousands: '.',
        decimal: ',',
    };
    pub const ES_ES: NumberLocale = NumberLocale {
        tag: "es-ES",
        thousands: '.',
        decimal: ',',
    };
    pub const IT_IT: NumberLocale = NumberLocale {
        tag: "it-IT",
        thousands: '.',
        decimal: ',',
    };
    pub const FR_FR: NumberLocale = NumberLocale {
        tag: "fr-FR",
        thousands: ' ',
        decimal: ',',
    };

    const ALL: [NumberLocale; 6] = [
        Self::PT_BR,
        Self::EN_US,
        Self::DE_DE,
        Self::ES_ES,
        Self::IT_IT,
        Self::FR_FR,
    ];

    /// Resolve a locale tag, falling back to the default locale when unknown.
    pub fn resolve(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            log::warn!("Unknown locale '{}', using {}", tag, DEFAULT_LOCALE);
            Self::default()
        })
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}

impl FromStr for NumberLocale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&wanted))
            .ok_or(())
    }
}

impl Display for NumberLocale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag)
    }
}

/// Format a number with a fixed number of decimals and locale separators.
pub fn format_grouped(value: f64, decimals: usize, locale: NumberLocale) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(locale.thousands);
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push(locale.decimal);
        grouped.push_str(frac_part);
    }
    grouped
}

/// Currency rate: 4 decimals.
pub fn format_rate(value: f64, locale: NumberLocale) -> String {
    format_grouped(value, 4, locale)
}

/// Index price: 2 decimals.
pub fn format_price(value: f64, locale: NumberLocale) -> String {
    format_grouped(value, 2, locale)
}

/// Percent change with an explicit `+` for non-negative values.
pub fn format_percent(value: f64) -> String {
    // -0.0 counts as non-negative
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

/// Volume scaled into B/M/K with one decimal; plain below a thousand.
pub fn format_volume(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    UNITS
        .iter()
        .find(|(unit, _)| value >= *unit)
        .map(|(unit, suffix)| format!("{:.1}{}", value / unit, suffix))
        .unwrap_or_else(|| value.to_string())
}

/// Decorative glyph for a currency pair.
pub fn currency_flag(pair: &str) -> &'static str {
    match pair {
        "USD-BRL" => "🇺🇸🇧🇷",
        "USD-EUR" => "🇺🇸🇪🇺",
        "USD-JPY" => "🇺🇸🇯🇵",
        "USD-CNY" => "🇺🇸🇨🇳",
        "USD-INR" => "🇺🇸🇮🇳",
        "USD-KRW" => "🇺🇸🇰🇷",
        _ => "💱",
    }
}

/// Decorative glyph for a stock index.
pub fn index_icon(index: &str) -> &'static str {
    match index {
        "IBOV" => "🇧🇷",
        "SP500" | "NASDAQ" | "DOW" => "🇺🇸",
        "DAX" => "🇩🇪",
        "FTSE" => "🇬🇧",
        "NIKKEI" => "🇯🇵",
        "HANG_SENG" => "🇭🇰",
        _ => "📈",
    }
}

/// Parse a server timestamp. RFC 3339 and naive ISO-8601 (read as local time) are accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Time-of-day label, `HH:MM:SS`.
pub fn format_time_of_day<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%H:%M:%S").to_string()
}

/// Date and time label used by the text report, `DD/MM/YYYY HH:MM:SS`.
pub fn format_report_time(time: &DateTime<Local>) -> String {
    time.format("%d/%m/%Y %H:%M:%S").to_string()
}
