//! Tab controller for the time-series view
//!
//! Translates user actions into [`ViewEvent`]s, issues the fetch a
//! transition asks for, and feeds the outcome back through the reducer.
//! Issuing and completing are separate steps so that several fetches can be
//! in flight at once; [`TabController::activate_tab`] chains them for the
//! common case.

use shared::{
    CropId, FetchQuery, ForecastView, HistoryView, PerformanceView, RequestTicket, Tab,
    TabPayload, ViewEvent, ViewState,
};

use crate::config::ViewConfig;
use crate::gateway::DataGateway;

/// Owns the view state and the gateway it fetches through
pub struct TabController<G> {
    gateway: G,
    state: ViewState,
    history_chart_window: usize,
}

impl<G: DataGateway> TabController<G> {
    pub fn new(gateway: G, view: &ViewConfig) -> Self {
        Self {
            gateway,
            state: ViewState::new(view.default_horizon_days, view.history_days),
            history_chart_window: view.history_chart_window,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one event through the reducer
    pub fn dispatch(&mut self, event: ViewEvent) -> Option<RequestTicket> {
        let (next, ticket) = std::mem::take(&mut self.state).reduce(event);
        self.state = next;
        ticket
    }

    /// Load the crop list and select the first crop
    pub async fn mount(&mut self) {
        self.dispatch(ViewEvent::MountStarted);

        let event = match self.gateway.list_crops().await {
            Ok(crops) => {
                tracing::info!(count = crops.len(), "Loaded available crops");
                ViewEvent::CropsLoaded(crops)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load available crops");
                ViewEvent::CropsFailed(format!("Failed to load available crops: {}", e))
            }
        };
        self.dispatch(event);
    }

    /// Change the selected crop; data is fetched on the next tab activation
    pub fn select_crop(&mut self, crop: impl Into<CropId>) {
        let crop = crop.into();
        tracing::debug!(%crop, "Crop changed");
        self.dispatch(ViewEvent::CropChanged(crop));
    }

    /// Change the forecast horizon; used on the next Forecast activation
    pub fn set_horizon(&mut self, days: u32) {
        tracing::debug!(days, "Horizon changed");
        self.dispatch(ViewEvent::HorizonChanged(days));
    }

    /// Activate a tab and return the fetch to issue, if a crop is selected
    pub fn begin_activation(&mut self, tab: Tab) -> Option<RequestTicket> {
        let ticket = self.dispatch(ViewEvent::TabActivated(tab));
        match &ticket {
            Some(ticket) => {
                tracing::debug!(
                    seq = ticket.seq,
                    tab = %ticket.tab(),
                    crop = %ticket.query.crop(),
                    "Fetch issued"
                )
            }
            None => tracing::debug!(%tab, "No crop selected, nothing to fetch"),
        }
        ticket
    }

    /// Perform the request for a ticket without touching the view state
    pub async fn fetch(&self, ticket: &RequestTicket) -> ViewEvent {
        let result = match &ticket.query {
            FetchQuery::Forecast { crop, horizon_days } => self
                .gateway
                .get_forecast(crop, *horizon_days)
                .await
                .map(TabPayload::Forecast),
            FetchQuery::History { crop, period_days } => self
                .gateway
                .get_history(crop, *period_days)
                .await
                .map(TabPayload::History),
            FetchQuery::Performance { crop } => self
                .gateway
                .get_performance(crop)
                .await
                .map(TabPayload::Performance),
        };

        match result {
            Ok(payload) => ViewEvent::FetchResolved {
                ticket: ticket.clone(),
                payload,
            },
            Err(e) => {
                tracing::warn!(
                    seq = ticket.seq,
                    tab = %ticket.tab(),
                    crop = %ticket.query.crop(),
                    code = e.code(),
                    error = %e,
                    "Fetch failed"
                );
                ViewEvent::FetchRejected {
                    ticket: ticket.clone(),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Apply the outcome of a fetch
    pub fn complete(&mut self, outcome: ViewEvent) {
        if let ViewEvent::FetchResolved { ticket, .. } | ViewEvent::FetchRejected { ticket, .. } =
            &outcome
        {
            if !self.state.is_current(ticket) {
                tracing::warn!(seq = ticket.seq, tab = %ticket.tab(), "Discarding stale response");
            }
        }
        self.dispatch(outcome);
    }

    /// Activate a tab and wait for its data
    pub async fn activate_tab(&mut self, tab: Tab) {
        if let Some(ticket) = self.begin_activation(tab) {
            let outcome = self.fetch(&ticket).await;
            self.complete(outcome);
        }
    }

    pub fn forecast_view(&self) -> Option<ForecastView> {
        self.state.forecast.as_ref().map(ForecastView::from_result)
    }

    pub fn history_view(&self) -> Option<HistoryView> {
        self.state
            .history
            .as_ref()
            .map(|h| HistoryView::with_window(h, self.history_chart_window))
    }

    pub fn performance_view(&self) -> Option<PerformanceView> {
        self.state.performance.as_ref().map(PerformanceView::from_result)
    }
}
