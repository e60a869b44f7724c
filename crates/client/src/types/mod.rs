//! Wire types shared by the API families

pub mod auth;
pub mod channel;
pub mod common;
pub mod dashboard;
pub mod estimate;
pub mod log;
pub mod onboarding;
pub mod reservation;
pub mod rule;
pub mod subscription;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest};
pub use channel::{Channel, ChannelStatus, ChannelType, ConnectResponse, WebhookStatus};
pub use common::{MessageResponse, PageMeta, Paginated};
pub use dashboard::{
    ChannelStat, ChartDataPoint, DashboardStats, DashboardSummary, ResponseStat,
};
pub use estimate::{EstimateQuery, EstimateRequest, EstimateStatus, PublicEstimateRequest};
pub use log::{LogExportQuery, LogQuery, MessageLog, ResponseType};
pub use onboarding::{OnboardingProfile, OnboardingStatus, OnboardingStep, StepSaved};
pub use reservation::{
    PublicReservationPage, PublicReservationRequest, Reservation, ReservationQuery,
    ReservationSource, ReservationStatus,
};
pub use rule::{AutoRule, MatchType, NewRule, RuleOrder, RuleTestResult, RuleUpdate};
pub use subscription::{Plan, Subscription, SubscriptionStatus, UsageSummary};
pub use user::{AiTone, PasswordUpdate, ProfileUpdate, User};
