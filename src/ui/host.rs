//! Terminal view host
//!
//! Slots and charts write into a shared screen model; the UI loop paints
//! that model every frame.

use crate::dashboard::{
    Chart, ChartConfig, ChartData, ChartFactory, ElementId, Fragment, Slot, UpdateMode, ViewHost,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Last painted state of a chart.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub config: ChartConfig,
    pub data: ChartData,
    pub redraws: u64,
    pub resizes: u64,
}

/// Everything the dashboard has written, keyed by element.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    fragments: HashMap<ElementId, Fragment>,
    charts: HashMap<ElementId, ChartView>,
}

impl Screen {
    pub fn fragment(&self, id: ElementId) -> Option<&Fragment> {
        self.fragments.get(&id)
    }

    pub fn chart(&self, id: ElementId) -> Option<&ChartView> {
        self.charts.get(&id)
    }

    /// Whether a visibility-controlled element is shown.
    pub fn is_visible(&self, id: ElementId) -> bool {
        matches!(self.fragments.get(&id), Some(Fragment::Visibility(true)))
    }
}

type SharedScreen = Arc<Mutex<Screen>>;

fn with_screen(screen: &SharedScreen, f: impl FnOnce(&mut Screen)) {
    match screen.lock() {
        Ok(mut guard) => f(&mut guard),
        Err(poisoned) => f(&mut poisoned.into_inner()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    screen: SharedScreen,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current screen model for painting.
    pub fn screen(&self) -> Screen {
        let mut copy = Screen::default();
        with_screen(&self.screen, |screen| copy = screen.clone());
        copy
    }

    pub fn chart_factory(&self) -> TerminalChartFactory {
        TerminalChartFactory {
            screen: self.screen.clone(),
        }
    }
}

impl ViewHost for TerminalHost {
    fn bind(&self, id: ElementId) -> Option<Box<dyn Slot>> {
        if id.is_chart() {
            return None;
        }
        Some(Box::new(ScreenSlot {
            id,
            screen: self.screen.clone(),
        }))
    }
}

struct ScreenSlot {
    id: ElementId,
    screen: SharedScreen,
}

impl Slot for ScreenSlot {
    fn replace(&mut self, fragment: Fragment) {
        let id = self.id;
        with_screen(&self.screen, |screen| {
            screen.fragments.insert(id, fragment);
        });
    }
}

pub struct TerminalChartFactory {
    screen: SharedScreen,
}

impl ChartFactory for TerminalChartFactory {
    fn create(&mut self, canvas: ElementId, config: ChartConfig) -> Option<Box<dyn Chart>> {
        if !canvas.is_chart() {
            log::warn!("{} is not a chart canvas", canvas.dom_id());
            return None;
        }
        with_screen(&self.screen, |screen| {
            screen.charts.insert(
                canvas,
                ChartView {
                    config: config.clone(),
                    data: ChartData::default(),
                    redraws: 0,
                    resizes: 0,
                },
            );
        });
        Some(Box::new(ScreenChart {
            canvas,
            config,
            data: ChartData::default(),
            screen: self.screen.clone(),
        }))
    }
}

struct ScreenChart {
    canvas: ElementId,
    config: ChartConfig,
    data: ChartData,
    screen: SharedScreen,
}

impl Chart for ScreenChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn data(&self) -> &ChartData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    // The terminal has no animation, so both modes repaint on the next frame.
    fn update(&mut self, _mode: UpdateMode) {
        let data = self.data.clone();
        with_screen(&self.screen, |screen| {
            if let Some(view) = screen.charts.get_mut(&self.canvas) {
                view.data = data;
                view.redraws += 1;
            }
        });
    }

    fn resize(&mut self) {
        with_screen(&self.screen, |screen| {
            if let Some(view) = screen.charts.get_mut(&self.canvas) {
                view.resizes += 1;
            }
        });
    }
}
