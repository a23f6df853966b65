//! Persistent charts
//!
//! Both charts are created once when the dashboard starts and mutated in
//! place for every snapshot afterwards.

use super::bindings::ElementId;
use crate::consts::dashboard_consts::palette;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum ChartKey {
    #[strum(to_string = "cambio")]
    Cambio,
    #[strum(to_string = "bolsa")]
    Bolsa,
}

impl ChartKey {
    pub const fn element(self) -> ElementId {
        match self {
            ChartKey::Cambio => ElementId::CambioChart,
            ChartKey::Bolsa => ElementId::BolsaChart,
        }
    }

    /// Configuration used when the chart is first created.
    pub fn config(self) -> ChartConfig {
        match self {
            ChartKey::Cambio => ChartConfig {
                kind: ChartKind::Bar,
                series_label: "Variation (%)".to_string(),
                accent: palette::CAMBIO_ACCENT,
            },
            ChartKey::Bolsa => ChartConfig {
                kind: ChartKind::Line,
                series_label: "Performance (%)".to_string(),
                accent: palette::GAIN,
            },
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub series_label: String,
    /// Hex color used for the chart frame.
    pub accent: &'static str,
}

/// The single dataset of a chart. `labels`, `values` and `colors` line up by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartData {
    /// Replace the dataset contents while keeping the allocations.
    pub fn replace<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        self.labels.clear();
        self.values.clear();
        self.colors.clear();
        for (label, value) in points {
            self.colors.push(bar_color(value).to_string());
            self.labels.push(label);
            self.values.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Gain color for non-negative changes, loss color otherwise.
pub fn bar_color(change_percent: f64) -> &'static str {
    if change_percent >= 0.0 {
        palette::GAIN
    } else {
        palette::LOSS
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UpdateMode {
    /// Redraw immediately, without animation.
    None,
}

/// A chart instance owned by the UI host.
pub trait Chart: Send {
    fn config(&self) -> &ChartConfig;
    fn data(&self) -> &ChartData;
    fn data_mut(&mut self) -> &mut ChartData;
    fn update(&mut self, mode: UpdateMode);
    fn resize(&mut self);
}

pub trait ChartFactory: Send {
    /// Create a chart on the given canvas, or `None` when the host has no canvas for it.
    fn create(&mut self, canvas: ElementId, config: ChartConfig) -> Option<Box<dyn Chart>>;
}

/// The two dashboard charts.
#[derive(Default)]
pub struct ChartSet {
    cambio: Option<Box<dyn Chart>>,
    bolsa: Option<Box<dyn Chart>>,
    created: bool,
}

impl ChartSet {
    /// Create both charts. Later calls are ignored so charts are never recreated.
    pub fn create_all(&mut self, factory: &mut dyn ChartFactory) {
        if self.created {
            log::debug!("Charts already created");
            return;
        }
        for key in [ChartKey::Cambio, ChartKey::Bolsa] {
            let chart = factory.create(key.element(), key.config());
            if chart.is_none() {
                log::warn!("No canvas for {} chart", key);
            }
            *self.slot(key) = chart;
        }
        self.created = true;
    }

    fn slot(&mut self, key: ChartKey) -> &mut Option<Box<dyn Chart>> {
        match key {
            ChartKey::Cambio => &mut self.cambio,
            ChartKey::Bolsa => &mut self.bolsa,
        }
    }

    /// Replace a chart's dataset and redraw it without animation.
    /// An absent chart is skipped.
    pub fn update<I>(&mut self, key: ChartKey, points: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        if let Some(chart) = self.slot(key).as_deref_mut() {
            chart.data_mut().replace(points);
            chart.update(UpdateMode::None);
        }
    }

    pub fn resize_all(&mut self) {
        for chart in [self.cambio.as_deref_mut(), self.bolsa.as_deref_mut()]
            .into_iter()
            .flatten()
        {
            chart.resize();
        }
    }
}

impl std::fmt::Debug for ChartSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSet")
            .field("cambio", &self.cambio.is_some())
            .field("bolsa", &self.bolsa.is_some())
            .field("created", &self.created)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::testing::FakeChartFactory;

    #[test]
    fn test_replace_colors_by_sign() {
        let mut data = ChartData::default();
        data.replace(vec![("USD-BRL".to_string(), 0.0), ("EUR-BRL".to_string(), -0.3)]);

        assert_eq!(data.labels, vec!["USD-BRL", "EUR-BRL"]);
        assert_eq!(data.colors, vec!["#20c997", "#fd7e14"]);
    }

    #[test]
    fn test_create_all_only_once() {
        let mut factory = FakeChartFactory::default();
        let mut charts = ChartSet::default();

        charts.create_all(&mut factory);
        charts.create_all(&mut factory);

        assert_eq!(factory.created(), 2);
    }

    #[test]
    // Updates to a chart the host declined to create are skipped.
    fn test_update_skips_absent_chart() {
        let mut factory = FakeChartFactory::declining(&[ElementId::BolsaChart]);
        let mut charts = ChartSet::default();
        charts.create_all(&mut factory);

        charts.update(ChartKey::Bolsa, vec![("IBOV".to_string(), 1.0)]);
        charts.update(ChartKey::Cambio, vec![("USD-BRL".to_string(), 1.0)]);

        assert_eq!(factory.created(), 1);
        assert_eq!(factory.record(ElementId::CambioChart).data.len(), 1);
        assert!(factory.record(ElementId::BolsaChart).updates.is_empty());
    }
}
