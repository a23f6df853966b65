//! View bindings
//!
//! The dashboard never looks up UI elements on its own. Every element it
//! writes to is named here, resolved once against a [`ViewHost`], and handed
//! to the section renderers.

use super::error::DashboardError;
use crate::events::Event;
use strum::IntoEnumIterator;

/// Named UI elements. The contract ids are fixed; hosts key on them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::EnumIter)]
pub enum ElementId {
    MarketStatus,
    CambioGrid,
    BolsaGrid,
    CambioChart,
    BolsaChart,
    RefreshButton,
    AlertList,
    AlertSection,
    ServerTime,
    StatusIndicator,
    LastUpdate,
    LoadingModal,
    ToastContainer,
    ActivityLog,
}

impl ElementId {
    pub const fn dom_id(self) -> &'static str {
        match self {
            ElementId::MarketStatus => "market-status",
            ElementId::CambioGrid => "cambio-grid",
            ElementId::BolsaGrid => "bolsa-grid",
            ElementId::CambioChart => "cambio-chart",
            ElementId::BolsaChart => "bolsa-chart",
            ElementId::RefreshButton => "refresh-btn",
            ElementId::AlertList => "alertas-list",
            ElementId::AlertSection => "alertas-section",
            ElementId::ServerTime => "server-time",
            ElementId::StatusIndicator => "status-indicator",
            ElementId::LastUpdate => "last-update",
            ElementId::LoadingModal => "loadingModal",
            ElementId::ToastContainer => "toast-container",
            ElementId::ActivityLog => "activity-log",
        }
    }

    /// Chart canvases are bound through the chart factory, not as slots.
    pub const fn is_chart(self) -> bool {
        matches!(self, ElementId::CambioChart | ElementId::BolsaChart)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// One quote card in a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub glyph: &'static str,
    pub label: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
    pub footer: String,
}

/// A renderable piece of UI content written into a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Banner { text: String, tone: Tone },
    Cards(Vec<Card>),
    Placeholder(String),
    AlertList(Vec<String>),
    Visibility(bool),
    Text(String),
    Badge { online: bool, label: String },
    Button { label: String, busy: bool },
    Overlay { visible: bool, message: String },
    /// Notification texts, newest first.
    Toasts(Vec<String>),
    /// Activity events, oldest first.
    Activity(Vec<Event>),
}

/// A bound element whose content is replaced wholesale.
pub trait Slot: Send {
    fn replace(&mut self, fragment: Fragment);
}

/// The UI host the dashboard renders into.
pub trait ViewHost {
    /// Bind an element, or `None` when the host has no such element.
    fn bind(&self, id: ElementId) -> Option<Box<dyn Slot>>;
}

/// Every slot the dashboard writes to, resolved once.
pub struct ViewBindings {
    pub market_status: Box<dyn Slot>,
    pub cambio_grid: Box<dyn Slot>,
    pub bolsa_grid: Box<dyn Slot>,
    pub refresh_button: Box<dyn Slot>,
    pub alert_list: Box<dyn Slot>,
    pub alert_section: Box<dyn Slot>,
    pub server_time: Box<dyn Slot>,
    pub status_indicator: Box<dyn Slot>,
    pub last_update: Box<dyn Slot>,
    pub loading_modal: Box<dyn Slot>,
    pub toast_container: Box<dyn Slot>,
    pub activity_log: Box<dyn Slot>,
}

impl ViewBindings {
    pub fn resolve(host: &dyn ViewHost) -> Result<Self, DashboardError> {
        let bind = |id: ElementId| {
            host.bind(id)
                .ok_or(DashboardError::MissingBinding(id.dom_id()))
        };

        Ok(Self {
            market_status: bind(ElementId::MarketStatus)?,
            cambio_grid: bind(ElementId::CambioGrid)?,
            bolsa_grid: bind(ElementId::BolsaGrid)?,
            refresh_button: bind(ElementId::RefreshButton)?,
            alert_list: bind(ElementId::AlertList)?,
            alert_section: bind(ElementId::AlertSection)?,
            server_time: bind(ElementId::ServerTime)?,
            status_indicator: bind(ElementId::StatusIndicator)?,
            last_update: bind(ElementId::LastUpdate)?,
            loading_modal: bind(ElementId::LoadingModal)?,
            toast_container: bind(ElementId::ToastContainer)?,
            activity_log: bind(ElementId::ActivityLog)?,
        })
    }
}

impl std::fmt::Debug for ViewBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewBindings").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::testing::FakeHost;

    #[test]
    fn test_dom_ids_are_unique() {
        let ids: std::collections::HashSet<&str> =
            ElementId::iter().map(ElementId::dom_id).collect();
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_resolve_names_missing_binding() {
        let host = FakeHost::without(&[ElementId::AlertSection]);

        match ViewBindings::resolve(&host) {
            Err(DashboardError::MissingBinding(id)) => assert_eq!(id, "alertas-section"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_trend_of_zero_is_up() {
        assert_eq!(Trend::of(0.0), Trend::Up);
        assert_eq!(Trend::of(-0.01), Trend::Down);
    }
}
