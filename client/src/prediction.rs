//! Single-point prediction form: validate, then submit

use shared::{validate_prediction_form, PredictionForm, PredictionFormState};

use crate::error::ClientResult;
use crate::gateway::AgriYieldClient;

/// Drives the prediction form against the backend
pub struct PredictionService {
    client: AgriYieldClient,
    state: PredictionFormState,
}

impl PredictionService {
    pub fn new(client: AgriYieldClient) -> Self {
        Self {
            client,
            state: PredictionFormState::default(),
        }
    }

    pub fn state(&self) -> &PredictionFormState {
        &self.state
    }

    /// Validate and submit the form.
    ///
    /// The previous result and error are cleared first. Validation failures
    /// never reach the network.
    pub async fn submit(&mut self, form: &PredictionForm) -> &PredictionFormState {
        self.state.begin_submit();

        match self.try_submit(form).await {
            Ok(predicted_yield) => {
                tracing::info!(predicted_yield, "Prediction received");
                self.state.succeed(predicted_yield);
            }
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "Prediction failed");
                self.state.fail(e.to_string());
            }
        }
        &self.state
    }

    async fn try_submit(&self, form: &PredictionForm) -> ClientResult<f64> {
        let input = validate_prediction_form(form)?;
        let response = self.client.predict(&input).await?;
        Ok(response.predicted_yield)
    }
}
