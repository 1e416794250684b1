//! Time-series view state and its transition function
//!
//! All mutation of the view goes through [`ViewState::reduce`]. A transition
//! may emit a [`RequestTicket`] describing the fetch the caller must issue;
//! the outcome is fed back as [`ViewEvent::FetchResolved`] or
//! [`ViewEvent::FetchRejected`] carrying the same ticket.
//!
//! Every ticket has a sequence number. A response is stored only if its
//! ticket is the latest one issued for its tab, so a slow response can never
//! overwrite a newer one for the same tab. Responses for other tabs are still
//! stored. Only the most recently issued request may touch `is_loading` and
//! `error_message`.

use serde::{Deserialize, Serialize};

use crate::models::{ForecastResult, HistoryResult, PerformanceResult, TabPayload};
use crate::types::{CropId, Tab};

pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

/// Lifecycle of a single tab's data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum TabPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// What a fetch asks the backend for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchQuery {
    Forecast { crop: CropId, horizon_days: u32 },
    History { crop: CropId, period_days: u32 },
    Performance { crop: CropId },
}

impl FetchQuery {
    pub fn tab(&self) -> Tab {
        match self {
            FetchQuery::Forecast { .. } => Tab::Forecast,
            FetchQuery::History { .. } => Tab::History,
            FetchQuery::Performance { .. } => Tab::Performance,
        }
    }

    pub fn crop(&self) -> &CropId {
        match self {
            FetchQuery::Forecast { crop, .. }
            | FetchQuery::History { crop, .. }
            | FetchQuery::Performance { crop } => crop,
        }
    }
}

/// An issued fetch, tagged with its sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTicket {
    pub seq: u64,
    pub query: FetchQuery,
}

impl RequestTicket {
    pub fn tab(&self) -> Tab {
        self.query.tab()
    }
}

/// Discrete events driving the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Crop list retrieval started on mount
    MountStarted,
    CropsLoaded(Vec<CropId>),
    CropsFailed(String),
    TabActivated(Tab),
    FetchResolved {
        ticket: RequestTicket,
        payload: TabPayload,
    },
    FetchRejected {
        ticket: RequestTicket,
        message: String,
    },
    CropChanged(CropId),
    HorizonChanged(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TabSlot {
    phase: TabPhase,
    latest_seq: Option<u64>,
}

/// State of the time-series view, owned by one controller
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub available_crops: Vec<CropId>,
    pub selected_crop: CropId,
    pub horizon_days: u32,
    pub history_days: u32,
    pub active_tab: Tab,
    pub forecast: Option<ForecastResult>,
    pub history: Option<HistoryResult>,
    pub performance: Option<PerformanceResult>,
    pub is_loading: bool,
    pub crops_loading: bool,
    pub error_message: Option<String>,
    tabs: [TabSlot; 3],
    next_seq: u64,
    last_issued: Option<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS, DEFAULT_HISTORY_DAYS)
    }
}

fn slot_index(tab: Tab) -> usize {
    match tab {
        Tab::Forecast => 0,
        Tab::History => 1,
        Tab::Performance => 2,
    }
}

impl ViewState {
    /// Fresh state as created on mount: nothing selected, nothing loaded
    pub fn new(horizon_days: u32, history_days: u32) -> Self {
        Self {
            available_crops: Vec::new(),
            selected_crop: CropId::none(),
            horizon_days,
            history_days,
            active_tab: Tab::default(),
            forecast: None,
            history: None,
            performance: None,
            is_loading: false,
            crops_loading: false,
            error_message: None,
            tabs: Default::default(),
            next_seq: 1,
            last_issued: None,
        }
    }

    pub fn phase(&self, tab: Tab) -> &TabPhase {
        &self.tabs[slot_index(tab)].phase
    }

    /// Whether this ticket is still the latest issued for its tab
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.tabs[slot_index(ticket.tab())].latest_seq == Some(ticket.seq)
    }

    /// Whether this ticket is the most recently issued request overall
    pub fn is_latest(&self, ticket: &RequestTicket) -> bool {
        self.last_issued == Some(ticket.seq)
    }

    pub fn has_data(&self) -> bool {
        self.forecast.is_some() || self.history.is_some() || self.performance.is_some()
    }

    /// Apply one event, returning the next state and the fetch to issue, if any
    pub fn reduce(mut self, event: ViewEvent) -> (ViewState, Option<RequestTicket>) {
        match event {
            ViewEvent::MountStarted => {
                self.crops_loading = true;
            }
            ViewEvent::CropsLoaded(crops) => {
                self.crops_loading = false;
                if let Some(first) = crops.first() {
                    self.selected_crop = first.clone();
                }
                self.available_crops = crops;
            }
            ViewEvent::CropsFailed(message) => {
                self.crops_loading = false;
                self.error_message = Some(message);
            }
            ViewEvent::TabActivated(tab) => {
                self.active_tab = tab;
                if !self.selected_crop.is_selected() {
                    return (self, None);
                }
                let ticket = self.issue(tab);
                return (self, Some(ticket));
            }
            ViewEvent::FetchResolved { ticket, payload } => {
                if !self.is_current(&ticket) || payload.tab() != ticket.tab() {
                    return (self, None);
                }
                match payload {
                    TabPayload::Forecast(p) => self.forecast = Some(p),
                    TabPayload::History(p) => self.history = Some(p),
                    TabPayload::Performance(p) => self.performance = Some(p),
                }
                self.tabs[slot_index(ticket.tab())].phase = TabPhase::Loaded;
                if self.is_latest(&ticket) {
                    self.is_loading = false;
                }
            }
            ViewEvent::FetchRejected { ticket, message } => {
                if !self.is_current(&ticket) {
                    return (self, None);
                }
                self.tabs[slot_index(ticket.tab())].phase = TabPhase::Errored(message.clone());
                if self.is_latest(&ticket) {
                    self.error_message = Some(message);
                    self.is_loading = false;
                }
            }
            ViewEvent::CropChanged(crop) => {
                self.selected_crop = crop;
            }
            ViewEvent::HorizonChanged(days) => {
                self.horizon_days = days;
            }
        }
        (self, None)
    }

    fn issue(&mut self, tab: Tab) -> RequestTicket {
        let seq = self.next_seq;
        self.next_seq += 1;

        let crop = self.selected_crop.clone();
        let query = match tab {
            Tab::Forecast => FetchQuery::Forecast {
                crop,
                horizon_days: self.horizon_days,
            },
            Tab::History => FetchQuery::History {
                crop,
                period_days: self.history_days,
            },
            Tab::Performance => FetchQuery::Performance { crop },
        };

        let slot = &mut self.tabs[slot_index(tab)];
        slot.phase = TabPhase::Loading;
        slot.latest_seq = Some(seq);
        self.last_issued = Some(seq);
        self.is_loading = true;
        self.error_message = None;

        RequestTicket { seq, query }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn forecast(days: u32) -> ForecastResult {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ForecastResult {
            horizon_days: days,
            dates: start.iter_days().take(days as usize).collect(),
            predictions: (0..days).map(|i| 100.0 + f64::from(i)).collect(),
            crop: None,
        }
    }

    fn history() -> HistoryResult {
        HistoryResult {
            period_days: 3,
            values: vec![1.0, 2.0, 3.0],
            dates: Vec::new(),
            crop: None,
        }
    }

    fn mounted(crops: &[&str]) -> ViewState {
        let (state, _) = ViewState::default().reduce(ViewEvent::MountStarted);
        let crops = crops.iter().map(|c| CropId::from(*c)).collect();
        state.reduce(ViewEvent::CropsLoaded(crops)).0
    }

    fn activate(state: ViewState, tab: Tab) -> (ViewState, RequestTicket) {
        let (state, ticket) = state.reduce(ViewEvent::TabActivated(tab));
        (state, ticket.expect("fetch should be issued"))
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = ViewState::default();
        assert!(!state.selected_crop.is_selected());
        assert_eq!(state.horizon_days, 30);
        assert!(!state.is_loading);
        assert!(!state.has_data());
        assert!(state.error_message.is_none());
        for tab in Tab::ALL {
            assert_eq!(state.phase(tab), &TabPhase::Idle);
        }
    }

    #[test]
    fn test_mount_selects_first_crop() {
        let state = mounted(&["Wheat", "Rice"]);
        assert_eq!(state.selected_crop, CropId::from("Wheat"));
        assert_eq!(state.available_crops.len(), 2);
        assert!(!state.crops_loading);
    }

    #[test]
    fn test_mount_with_no_crops_leaves_selection_empty() {
        let state = mounted(&[]);
        assert!(!state.selected_crop.is_selected());
    }

    #[test]
    fn test_mount_failure_sets_error() {
        let (state, _) = ViewState::default().reduce(ViewEvent::MountStarted);
        let (state, _) = state.reduce(ViewEvent::CropsFailed("down".to_string()));
        assert_eq!(state.error_message.as_deref(), Some("down"));
        assert!(!state.selected_crop.is_selected());
    }

    #[test]
    fn test_activation_without_crop_is_noop() {
        let (state, ticket) = ViewState::default().reduce(ViewEvent::TabActivated(Tab::History));
        assert!(ticket.is_none());
        assert_eq!(state.active_tab, Tab::History);
        assert!(!state.is_loading);
        assert_eq!(state.phase(Tab::History), &TabPhase::Idle);
    }

    #[test]
    fn test_activation_issues_forecast_query() {
        let (state, ticket) = activate(mounted(&["Wheat"]), Tab::Forecast);
        assert_eq!(
            ticket.query,
            FetchQuery::Forecast {
                crop: CropId::from("Wheat"),
                horizon_days: 30
            }
        );
        assert!(state.is_loading);
        assert_eq!(state.phase(Tab::Forecast), &TabPhase::Loading);
    }

    #[test]
    fn test_activation_clears_error() {
        let mut state = mounted(&["Wheat"]);
        state.error_message = Some("old".to_string());
        let (state, _) = activate(state, Tab::Performance);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_resolve_stores_payload() {
        let (state, ticket) = activate(mounted(&["Wheat"]), Tab::Forecast);
        let payload = forecast(30);
        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket,
            payload: TabPayload::Forecast(payload.clone()),
        });
        assert_eq!(state.forecast, Some(payload));
        assert!(!state.is_loading);
        assert_eq!(state.phase(Tab::Forecast), &TabPhase::Loaded);
    }

    #[test]
    fn test_reject_keeps_other_payloads() {
        let (state, ticket) = activate(mounted(&["Wheat"]), Tab::History);
        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket,
            payload: TabPayload::History(history()),
        });
        let (state, ticket) = activate(state, Tab::Performance);
        let (state, _) = state.reduce(ViewEvent::FetchRejected {
            ticket,
            message: "timeout".to_string(),
        });
        assert_eq!(state.error_message.as_deref(), Some("timeout"));
        assert!(!state.is_loading);
        assert_eq!(state.history, Some(history()));
        assert_eq!(
            state.phase(Tab::Performance),
            &TabPhase::Errored("timeout".to_string())
        );
    }

    #[test]
    fn test_stale_same_tab_response_is_discarded() {
        let state = mounted(&["Wheat"]);
        let (state, first) = activate(state, Tab::Forecast);
        let (state, _) = state.reduce(ViewEvent::HorizonChanged(7));
        let (state, second) = activate(state, Tab::Forecast);

        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket: second,
            payload: TabPayload::Forecast(forecast(7)),
        });
        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket: first,
            payload: TabPayload::Forecast(forecast(30)),
        });
        assert_eq!(state.forecast.unwrap().horizon_days, 7);
    }

    #[test]
    fn test_other_tab_response_is_stored_but_does_not_clear_loading() {
        let state = mounted(&["Wheat"]);
        let (state, forecast_ticket) = activate(state, Tab::Forecast);
        let (state, history_ticket) = activate(state, Tab::History);

        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket: forecast_ticket,
            payload: TabPayload::Forecast(forecast(30)),
        });
        assert!(state.forecast.is_some());
        assert!(state.is_loading, "history is still in flight");

        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket: history_ticket,
            payload: TabPayload::History(history()),
        });
        assert!(!state.is_loading);
        assert_eq!(state.active_tab, Tab::History);
    }

    #[test]
    fn test_superseded_rejection_does_not_set_error() {
        let state = mounted(&["Wheat"]);
        let (state, forecast_ticket) = activate(state, Tab::Forecast);
        let (state, _history_ticket) = activate(state, Tab::History);
        let (state, _) = state.reduce(ViewEvent::FetchRejected {
            ticket: forecast_ticket,
            message: "boom".to_string(),
        });
        assert!(state.error_message.is_none());
        assert!(state.is_loading);
        assert_eq!(state.phase(Tab::Forecast), &TabPhase::Errored("boom".to_string()));
    }

    #[test]
    fn test_mismatched_payload_is_ignored() {
        let (state, ticket) = activate(mounted(&["Wheat"]), Tab::Forecast);
        let (state, _) = state.reduce(ViewEvent::FetchResolved {
            ticket,
            payload: TabPayload::History(history()),
        });
        assert!(state.history.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn test_crop_and_horizon_changes_issue_nothing() {
        let state = mounted(&["Wheat", "Rice"]);
        let (state, ticket) = state.reduce(ViewEvent::CropChanged(CropId::from("Rice")));
        assert!(ticket.is_none());
        let (state, ticket) = state.reduce(ViewEvent::HorizonChanged(90));
        assert!(ticket.is_none());
        assert_eq!(state.selected_crop, CropId::from("Rice"));
        assert_eq!(state.horizon_days, 90);
        assert!(!state.is_loading);

        let (_, ticket) = activate(state, Tab::Forecast);
        assert_eq!(
            ticket.query,
            FetchQuery::Forecast {
                crop: CropId::from("Rice"),
                horizon_days: 90
            }
        );
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let state = mounted(&["Wheat"]);
        let (state, a) = activate(state, Tab::Forecast);
        let (state, b) = activate(state, Tab::Performance);
        assert!(b.seq > a.seq);
        assert!(state.is_latest(&b));
        assert!(!state.is_latest(&a));
        assert!(state.is_current(&a));
    }

    #[test]
    fn test_ticket_names_tab_and_crop() {
        let state = mounted(&["Rice"]);
        let (state, ticket) = activate(state, Tab::History);
        assert_eq!(ticket.tab(), Tab::History);
        assert_eq!(ticket.query.crop(), &CropId::from("Rice"));

        let (_, ticket) = activate(state, Tab::Performance);
        assert_eq!(ticket.tab(), Tab::Performance);
        assert_eq!(ticket.query.crop(), &CropId::from("Rice"));
    }
}
