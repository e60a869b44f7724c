//! Onboarding wizard client methods

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::{OnboardingProfile, OnboardingStatus, OnboardingStep, StepSaved};

impl ApiClient {
    pub async fn onboarding_status(&self) -> Result<OnboardingStatus, ClientError> {
        self.execute(ApiRequest::get("/onboarding/status")).await
    }

    pub async fn onboarding_profile(&self) -> Result<OnboardingProfile, ClientError> {
        self.execute(ApiRequest::get("/onboarding/profile")).await
    }

    /// Save one wizard step; saving the last step completes onboarding
    pub async fn save_onboarding_step(
        &self,
        step: &OnboardingStep,
    ) -> Result<StepSaved, ClientError> {
        let request =
            ApiRequest::post(format!("/onboarding/step/{}", step.number())).json(step)?;
        self.execute(request).await
    }

    /// Mark onboarding complete without finishing the wizard
    pub async fn skip_onboarding(&self) -> Result<StepSaved, ClientError> {
        self.execute(ApiRequest::post("/onboarding/skip")).await
    }
}
