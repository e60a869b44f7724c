//! CLI commands

use anyhow::{Context, Result, bail};
use autoreply_client::types::onboarding::{
    AccountConnection, AdminInfo, BusinessRules, ProductService, ReservationSetup, ToneSetting,
};
use autoreply_client::types::{
    ChannelType, EstimateQuery, EstimateStatus, LogExportQuery, LogQuery, NewRule,
    OnboardingStep, PasswordUpdate, Plan, ProfileUpdate, RegisterRequest, ReservationQuery,
    ReservationStatus, ResponseType, RuleUpdate,
};
use autoreply_client::{ApiClient, AuthContext, AuthStatus};
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Parse a backend enum from its wire spelling, e.g. `instagram` or `no_show`
fn wire_value<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| format!("unsupported value '{raw}'"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        email: String,

        #[arg(long, env = "AUTOREPLY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and store the session
    Register {
        email: String,

        #[arg(long, env = "AUTOREPLY_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        brand_name: String,

        #[arg(long)]
        industry: String,
    },

    /// End the session
    Logout,

    /// Verify the stored session and show the signed-in user
    Whoami,

    /// Messaging channel links
    Channels {
        #[command(subcommand)]
        command: ChannelCommands,
    },

    /// Auto-reply rules
    Rules {
        #[command(subcommand)]
        command: RuleCommands,
    },

    /// AI reply assistant
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// Reservations
    Reservations {
        #[command(subcommand)]
        command: ReservationCommands,
    },

    /// Estimate requests
    Estimates {
        #[command(subcommand)]
        command: EstimateCommands,
    },

    /// Message logs
    Logs {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Dashboard statistics
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },

    /// Business profile and account
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Plan and usage
    Subscription {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },

    /// Onboarding wizard
    Onboarding {
        #[command(subcommand)]
        command: OnboardingCommands,
    },

    /// Send a fake Instagram message through the webhook pipeline
    WebhookTest {
        message: String,

        #[arg(long)]
        sender_id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ChannelCommands {
    /// List linked channels
    List,
    /// Start linking a channel; prints the URL to open
    Connect {
        #[arg(value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
    /// Link a channel without the platform OAuth flow (development backends)
    MockConnect {
        #[arg(value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
        account: String,
    },
    /// Unlink a channel
    Disconnect {
        #[arg(value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
    /// Connection and webhook health
    Status {
        #[arg(value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
    /// Renew the platform token
    RefreshToken {
        #[arg(value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
}

#[derive(Subcommand)]
pub enum RuleCommands {
    List,
    Show {
        id: i64,
    },
    /// Create a rule from a JSON file
    Create {
        file: PathBuf,
    },
    /// Apply a partial update from a JSON file
    Update {
        id: i64,
        file: PathBuf,
    },
    Delete {
        id: i64,
    },
    /// Flip a rule between active and inactive
    Toggle {
        id: i64,
    },
    /// Dry-run the rules against a message
    Test {
        message: String,

        #[arg(long, default_value = "instagram", value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
}

#[derive(Subcommand)]
pub enum AiCommands {
    /// Run a message through rules and AI
    Test {
        message: String,

        #[arg(long, default_value = "instagram", value_parser = wire_value::<ChannelType>)]
        channel: ChannelType,
    },
    /// Suggest FAQ entries from the business profile
    Faq {
        #[arg(long, default_value_t = 5)]
        count: u32,
    },
    /// Generate a reply to a message
    Generate {
        message: String,
    },
}

#[derive(Subcommand)]
pub enum ReservationCommands {
    List {
        #[arg(long, value_parser = wire_value::<ReservationStatus>)]
        status: Option<ReservationStatus>,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        page: Option<u32>,
    },
    Show {
        id: i64,
    },
    SetStatus {
        id: i64,
        #[arg(value_parser = wire_value::<ReservationStatus>)]
        status: ReservationStatus,
    },
    Note {
        id: i64,
        note: String,
    },
}

#[derive(Subcommand)]
pub enum EstimateCommands {
    List {
        #[arg(long, value_parser = wire_value::<EstimateStatus>)]
        status: Option<EstimateStatus>,

        #[arg(long)]
        page: Option<u32>,
    },
    Show {
        id: i64,
    },
    /// Send a priced quote to the customer
    Quote {
        id: i64,
        amount: f64,
        message: String,
    },
    SetStatus {
        id: i64,
        #[arg(value_parser = wire_value::<EstimateStatus>)]
        status: EstimateStatus,
    },
}

#[derive(Subcommand)]
pub enum LogCommands {
    List {
        #[arg(long, value_parser = wire_value::<ChannelType>)]
        channel: Option<ChannelType>,

        #[arg(long, value_parser = wire_value::<ResponseType>)]
        response_type: Option<ResponseType>,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,
    },
    Show {
        id: i64,
    },
    /// Download logs as CSV
    Export {
        #[arg(long, value_parser = wire_value::<ChannelType>)]
        channel: Option<ChannelType>,

        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output file (defaults to message-logs-<today>.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    Summary,
    Stats,
    Chart {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    Channels,
    Responses,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    Show,
    /// Apply a partial update from a JSON file
    Update {
        file: PathBuf,
    },
    Password {
        #[arg(long, env = "AUTOREPLY_PASSWORD", hide_env_values = true)]
        current: String,

        #[arg(long, env = "AUTOREPLY_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
    /// Permanently delete the account
    Delete {
        #[arg(long, env = "AUTOREPLY_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum SubscriptionCommands {
    Show,
    Usage,
    Upgrade {
        #[arg(value_parser = wire_value::<Plan>)]
        plan: Plan,
    },
    Cancel,
    Resume,
}

#[derive(Subcommand)]
pub enum OnboardingCommands {
    Status,
    /// Everything entered so far and where to resume
    Profile,
    /// Save one wizard step from a JSON file
    Step {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        number: u8,
        file: PathBuf,
    },
    Skip,
}

/// Build the payload of step `number` from free-form JSON
fn onboarding_step(number: u8, value: Value) -> Result<OnboardingStep> {
    let step = match number {
        1 => OnboardingStep::AccountConnection(serde_json::from_value::<AccountConnection>(value)?),
        2 => OnboardingStep::ProductService(serde_json::from_value::<ProductService>(value)?),
        3 => OnboardingStep::Reservation(serde_json::from_value::<ReservationSetup>(value)?),
        4 => OnboardingStep::BusinessRules(serde_json::from_value::<BusinessRules>(value)?),
        5 => OnboardingStep::Tone(serde_json::from_value::<ToneSetting>(value)?),
        6 => OnboardingStep::AdminInfo(serde_json::from_value::<AdminInfo>(value)?),
        _ => bail!("onboarding has steps 1 to 6, got {number}"),
    };
    Ok(step)
}

impl Commands {
    pub async fn execute(self, auth: &AuthContext) -> Result<()> {
        let client = auth.client();
        match self {
            Commands::Login { email, password } => {
                let user = auth.login(&email, &password).await?;
                info!(user_id = user.id, "Session stored");
                print_json(&user)
            }
            Commands::Register {
                email,
                password,
                brand_name,
                industry,
            } => {
                let user = auth
                    .register(&RegisterRequest {
                        email,
                        password_confirmation: password.clone(),
                        password,
                        brand_name,
                        industry,
                    })
                    .await?;
                print_json(&user)
            }
            Commands::Logout => {
                auth.logout().await?;
                println!("Logged out");
                Ok(())
            }
            Commands::Whoami => match auth.try_bootstrap().await {
                Ok(AuthStatus::Authenticated(user)) => print_json(&user),
                Ok(_) => bail!("Not logged in; run `autoreply login`"),
                Err(err) if err.is_auth_expired() => Err(err.into()),
                Err(err) => {
                    warn!(error = %err, "Session check failed");
                    bail!(
                        "Not logged in ({}); run `autoreply login`",
                        err.user_message(&err.to_string())
                    )
                }
            },
            Commands::Channels { command } => command.execute(client).await,
            Commands::Rules { command } => command.execute(client).await,
            Commands::Ai { command } => command.execute(client).await,
            Commands::Reservations { command } => command.execute(client).await,
            Commands::Estimates { command } => command.execute(client).await,
            Commands::Logs { command } => command.execute(client).await,
            Commands::Dashboard { command } => command.execute(client).await,
            Commands::Profile { command } => command.execute(auth).await,
            Commands::Subscription { command } => command.execute(client).await,
            Commands::Onboarding { command } => command.execute(client).await,
            Commands::WebhookTest { message, sender_id } => print_json(
                &client
                    .test_instagram_webhook(&message, sender_id.as_deref())
                    .await?,
            ),
        }
    }
}

impl ChannelCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            ChannelCommands::List => print_json(&client.list_channels().await?),
            ChannelCommands::Connect { channel } => {
                let response = client.connect_channel(channel).await?;
                print_json(&response)
            }
            ChannelCommands::MockConnect { channel, account } => {
                print_json(&client.mock_connect_channel(channel, &account).await?)
            }
            ChannelCommands::Disconnect { channel } => {
                client.disconnect_channel(channel).await?;
                println!("Disconnected {channel}");
                Ok(())
            }
            ChannelCommands::Status { channel } => {
                print_json(&client.channel_status(channel).await?)
            }
            ChannelCommands::RefreshToken { channel } => {
                print_json(&client.refresh_channel_token(channel).await?)
            }
        }
    }
}

impl RuleCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            RuleCommands::List => print_json(&client.list_rules().await?),
            RuleCommands::Show { id } => print_json(&client.get_rule(id).await?),
            RuleCommands::Create { file } => {
                let rule: NewRule = read_json(&file)?;
                print_json(&client.create_rule(&rule).await?)
            }
            RuleCommands::Update { id, file } => {
                let update: RuleUpdate = read_json(&file)?;
                print_json(&client.update_rule(id, &update).await?)
            }
            RuleCommands::Delete { id } => {
                client.delete_rule(id).await?;
                println!("Deleted rule {id}");
                Ok(())
            }
            RuleCommands::Toggle { id } => print_json(&client.toggle_rule(id).await?),
            RuleCommands::Test { message, channel } => {
                print_json(&client.test_rules(&message, channel).await?)
            }
        }
    }
}

impl AiCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            AiCommands::Test { message, channel } => {
                print_json(&client.ai_test_message(&message, channel).await?)
            }
            AiCommands::Faq { count } => print_json(&client.generate_faq(count).await?),
            AiCommands::Generate { message } => {
                print_json(&client.generate_response(&message).await?)
            }
        }
    }
}

impl ReservationCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            ReservationCommands::List {
                status,
                from,
                to,
                page,
            } => {
                let query = ReservationQuery {
                    status,
                    date_from: from,
                    date_to: to,
                    page,
                    ..Default::default()
                };
                print_json(&client.list_reservations(&query).await?)
            }
            ReservationCommands::Show { id } => print_json(&client.get_reservation(id).await?),
            ReservationCommands::SetStatus { id, status } => {
                print_json(&client.update_reservation_status(id, status).await?)
            }
            ReservationCommands::Note { id, note } => {
                print_json(&client.add_reservation_note(id, &note).await?)
            }
        }
    }
}

impl EstimateCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            EstimateCommands::List { status, page } => {
                let query = EstimateQuery {
                    status,
                    page,
                    ..Default::default()
                };
                print_json(&client.list_estimates(&query).await?)
            }
            EstimateCommands::Show { id } => print_json(&client.get_estimate(id).await?),
            EstimateCommands::Quote {
                id,
                amount,
                message,
            } => print_json(&client.send_quote(id, amount, &message).await?),
            EstimateCommands::SetStatus { id, status } => {
                print_json(&client.update_estimate_status(id, status).await?)
            }
        }
    }
}

impl LogCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            LogCommands::List {
                channel,
                response_type,
                from,
                to,
                search,
                page,
            } => {
                let query = LogQuery {
                    channel,
                    response_type,
                    date_from: from,
                    date_to: to,
                    search,
                    page,
                    ..Default::default()
                };
                print_json(&client.list_logs(&query).await?)
            }
            LogCommands::Show { id } => print_json(&client.get_log(id).await?),
            LogCommands::Export {
                channel,
                from,
                to,
                output,
            } => {
                let query = LogExportQuery {
                    channel,
                    date_from: from,
                    date_to: to,
                };
                let export = client.export_logs(&query).await?;
                let path = output.unwrap_or_else(|| PathBuf::from(&export.filename));
                std::fs::write(&path, &export.contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported {} bytes to {}", export.contents.len(), path.display());
                Ok(())
            }
        }
    }
}

impl DashboardCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            DashboardCommands::Summary => print_json(&client.dashboard_summary().await?),
            DashboardCommands::Stats => print_json(&client.dashboard_stats().await?),
            DashboardCommands::Chart { days } => print_json(&client.dashboard_chart(days).await?),
            DashboardCommands::Recent { limit } => {
                print_json(&client.recent_activity(limit).await?)
            }
            DashboardCommands::Channels => print_json(&client.channel_stats().await?),
            DashboardCommands::Responses => print_json(&client.response_stats().await?),
        }
    }
}

impl ProfileCommands {
    pub async fn execute(self, auth: &AuthContext) -> Result<()> {
        let client = auth.client();
        match self {
            ProfileCommands::Show => print_json(&client.get_profile().await?),
            ProfileCommands::Update { file } => {
                let update: ProfileUpdate = read_json(&file)?;
                let user = client.update_profile(&update).await?;
                auth.update_user(user.clone());
                print_json(&user)
            }
            ProfileCommands::Password { current, new } => {
                client
                    .update_password(&PasswordUpdate {
                        current_password: current,
                        password_confirmation: new.clone(),
                        password: new,
                    })
                    .await?;
                println!("Password updated");
                Ok(())
            }
            ProfileCommands::Delete { password } => {
                auth.delete_account(&password).await?;
                println!("Account deleted");
                Ok(())
            }
        }
    }
}

impl SubscriptionCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            SubscriptionCommands::Show => print_json(&client.get_subscription().await?),
            SubscriptionCommands::Usage => {
                let usage = client.subscription_usage().await?;
                if let Some(remaining) = usage.remaining_today() {
                    info!(remaining, "Replies left today");
                }
                print_json(&usage)
            }
            SubscriptionCommands::Upgrade { plan } => {
                print_json(&client.upgrade_subscription(plan).await?)
            }
            SubscriptionCommands::Cancel => {
                client.cancel_subscription().await?;
                println!("Subscription cancelled");
                Ok(())
            }
            SubscriptionCommands::Resume => print_json(&client.resume_subscription().await?),
        }
    }
}

impl OnboardingCommands {
    pub async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            OnboardingCommands::Status => print_json(&client.onboarding_status().await?),
            OnboardingCommands::Profile => {
                let profile = client.onboarding_profile().await?;
                info!(resume_step = profile.resume_step(), "Onboarding progress");
                print_json(&profile)
            }
            OnboardingCommands::Step { number, file } => {
                let step = onboarding_step(number, read_json(&file)?)?;
                print_json(&client.save_onboarding_step(&step).await?)
            }
            OnboardingCommands::Skip => print_json(&client.skip_onboarding().await?),
        }
    }
}
