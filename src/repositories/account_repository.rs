use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::latency::SimulatedLatency;
use super::seed;
use crate::models::{
    Account, DashboardSnapshot, Profile, ProfileSettings, RepositoryError, RepositoryResult,
};

/// Registered accounts
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Lookup is case-insensitive
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>>;

    /// Fails with `ConstraintViolation` when the email is taken
    async fn create(&self, account: Account) -> RepositoryResult<Account>;
}

/// Member data: public profiles, the dashboard snapshot and the signed-in member's settings
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Profile>>;

    async fn dashboard(&self) -> RepositoryResult<DashboardSnapshot>;

    async fn settings(&self) -> RepositoryResult<ProfileSettings>;

    /// Replace the stored settings as a whole
    async fn save_settings(&self, settings: ProfileSettings) -> RepositoryResult<ProfileSettings>;
}

pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
    latency: SimulatedLatency,
}

impl InMemoryAccountRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            latency,
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>> {
        self.latency.before_read().await;
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    #[instrument(skip(self, account), fields(account_id = %account.id))]
    async fn create(&self, account: Account) -> RepositoryResult<Account> {
        self.latency.before_write().await;
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(RepositoryError::ConstraintViolation {
                message: "email already registered".to_string(),
            });
        }
        accounts.push(account.clone());
        info!("Account created");
        Ok(account)
    }
}

pub struct InMemoryProfileRepository {
    profiles: Vec<Profile>,
    dashboard: DashboardSnapshot,
    settings: RwLock<ProfileSettings>,
    latency: SimulatedLatency,
}

impl InMemoryProfileRepository {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            profiles: seed::profiles(),
            dashboard: seed::dashboard(),
            settings: RwLock::new(seed::profile_settings()),
            latency,
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    #[instrument(skip(self), fields(profile_id = %id))]
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Profile>> {
        self.latency.before_read().await;
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn dashboard(&self) -> RepositoryResult<DashboardSnapshot> {
        self.latency.before_read().await;
        Ok(self.dashboard.clone())
    }

    #[instrument(skip(self))]
    async fn settings(&self) -> RepositoryResult<ProfileSettings> {
        self.latency.before_read().await;
        Ok(self.settings.read().await.clone())
    }

    #[instrument(skip(self, settings))]
    async fn save_settings(&self, settings: ProfileSettings) -> RepositoryResult<ProfileSettings> {
        self.latency.before_write().await;
        *self.settings.write().await = settings.clone();
        info!("Profile settings saved");
        Ok(settings)
    }
}
