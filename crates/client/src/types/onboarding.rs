//! Onboarding wizard
//!
//! The wizard has six steps. Each step posts its own payload to
//! `/onboarding/step/{n}`; the backend remembers the furthest step reached
//! and marks onboarding complete after the last one.

use serde::{Deserialize, Serialize};

/// Step 1: linked accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConnection {
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub facebook_connected: Option<bool>,
    #[serde(default)]
    pub naver_talktalk_id: Option<String>,
    #[serde(default)]
    pub kakao_channel_id: Option<String>,
}

/// Step 2: products and services
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductService {
    #[serde(default)]
    pub products_services: Option<String>,
    #[serde(default)]
    pub price_menu: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub faq_list: Option<String>,
}

/// Step 3: how customers book or ask for a consultation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSetup {
    #[serde(default)]
    pub reservation_link: Option<String>,
    #[serde(default)]
    pub reservation_method: Option<String>,
    #[serde(default)]
    pub required_info: Option<String>,
}

/// Step 4: business rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRules {
    #[serde(default)]
    pub immediate_response_keywords: Option<String>,
    #[serde(default)]
    pub banned_topics: Option<String>,
    #[serde(default)]
    pub night_auto_response: Option<bool>,
    #[serde(default)]
    pub night_response_message: Option<String>,
}

/// Step 5: reply tone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneSetting {
    #[serde(default)]
    pub tone_style: Option<String>,
    #[serde(default)]
    pub tone_example: Option<String>,
}

/// Step 6: who gets alerted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminInfo {
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_kakao: Option<String>,
    #[serde(default)]
    pub alert_keywords: Option<String>,
}

/// A step payload ready to be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OnboardingStep {
    AccountConnection(AccountConnection),
    ProductService(ProductService),
    Reservation(ReservationSetup),
    BusinessRules(BusinessRules),
    Tone(ToneSetting),
    AdminInfo(AdminInfo),
}

impl OnboardingStep {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 6;

    /// 1-based position of this step in the wizard
    pub const fn number(&self) -> u8 {
        match self {
            Self::AccountConnection(_) => 1,
            Self::ProductService(_) => 2,
            Self::Reservation(_) => 3,
            Self::BusinessRules(_) => 4,
            Self::Tone(_) => 5,
            Self::AdminInfo(_) => 6,
        }
    }

    pub const fn is_last(&self) -> bool {
        self.number() == Self::LAST
    }
}

/// `GET /onboarding/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    pub onboarding_completed: bool,
    pub current_step: u8,
}

/// Everything entered so far, as returned by `GET /onboarding/profile`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(flatten)]
    pub account: AccountConnection,
    #[serde(flatten)]
    pub product: ProductService,
    #[serde(flatten)]
    pub reservation: ReservationSetup,
    #[serde(flatten)]
    pub rules: BusinessRules,
    #[serde(flatten)]
    pub tone: ToneSetting,
    #[serde(flatten)]
    pub admin: AdminInfo,
    #[serde(default)]
    pub onboarding_completed: Option<bool>,
    #[serde(default)]
    pub onboarding_step: Option<u8>,
}

impl OnboardingProfile {
    /// Step the wizard should resume at
    pub fn resume_step(&self) -> u8 {
        self.onboarding_step
            .unwrap_or(OnboardingStep::FIRST)
            .clamp(OnboardingStep::FIRST, OnboardingStep::LAST)
    }

    /// Previously saved payload for step `number`, used to prefill the form
    pub fn step(&self, number: u8) -> Option<OnboardingStep> {
        let step = match number {
            1 => OnboardingStep::AccountConnection(self.account.clone()),
            2 => OnboardingStep::ProductService(self.product.clone()),
            3 => OnboardingStep::Reservation(self.reservation.clone()),
            4 => OnboardingStep::BusinessRules(self.rules.clone()),
            5 => OnboardingStep::Tone(self.tone.clone()),
            6 => OnboardingStep::AdminInfo(self.admin.clone()),
            _ => return None,
        };
        Some(step)
    }
}

/// Response to saving a step or skipping the wizard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSaved {
    pub message: String,
    #[serde(default)]
    pub next_step: Option<u8>,
    #[serde(default)]
    pub onboarding_completed: Option<bool>,
}
