use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    skill_options, Account, AccountType, DashboardResponse, FieldErrors, Profile, ProfileSettings,
    ProfileSettingsPage, RegistrationForm, RepositoryError, ServiceError, ServiceResult, Validate,
};
use crate::repositories::{AccountRepository, ProfileRepository};

const EMAIL_TAKEN: &str = "Email is already registered";

/// Registration, public profiles, the dashboard and profile settings
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { accounts, profiles }
    }

    /// Validate the registration form and create the account; the password is not stored
    #[instrument(skip(self, form), fields(user_type = %form.user_type))]
    pub async fn register(&self, form: RegistrationForm) -> ServiceResult<Account> {
        form.validate()?;

        if self.accounts.find_by_email(&form.email).await?.is_some() {
            crate::warn_with_trace!("Registration with an existing email");
            return Err(email_taken());
        }

        let account = match self.accounts.create(Account::from_form(&form)).await {
            Ok(account) => account,
            // Lost a race with a concurrent registration
            Err(RepositoryError::ConstraintViolation { .. }) => return Err(email_taken()),
            Err(e) => return Err(e.into()),
        };

        crate::info_with_trace!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    #[instrument(skip(self), fields(profile_id = %id))]
    pub async fn get_profile(&self, id: &str) -> ServiceResult<Profile> {
        self.profiles
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::ProfileNotFound { id: id.to_string() })
    }

    #[instrument(skip(self), fields(account_type = %account_type))]
    pub async fn dashboard(&self, account_type: AccountType) -> ServiceResult<DashboardResponse> {
        let snapshot = self.profiles.dashboard().await?;
        Ok(snapshot.for_account(account_type))
    }

    /// Current settings with the skill catalogue the form offers
    #[instrument(skip(self))]
    pub async fn settings(&self) -> ServiceResult<ProfileSettingsPage> {
        let settings = self.profiles.settings().await?;
        Ok(ProfileSettingsPage {
            settings,
            skill_options: skill_options(),
        })
    }

    #[instrument(skip(self, settings), fields(skills = settings.skills.len()))]
    pub async fn update_settings(&self, settings: ProfileSettings) -> ServiceResult<ProfileSettings> {
        let settings = settings.trimmed();
        settings.validate()?;

        let saved = self.profiles.save_settings(settings).await?;
        crate::info_with_trace!("Profile settings updated");
        Ok(saved)
    }
}

fn email_taken() -> ServiceError {
    let mut fields = FieldErrors::new();
    fields.insert("email", EMAIL_TAKEN);
    ServiceError::InvalidFields { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DashboardSnapshot, DashboardStats};
    use crate::repositories::seed;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;
            async fn create(&self, account: Account) -> Result<Account, RepositoryError>;
        }
    }

    mock! {
        TestProfileRepository {}

        #[async_trait]
        impl ProfileRepository for TestProfileRepository {
            async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, RepositoryError>;
            async fn dashboard(&self) -> Result<DashboardSnapshot, RepositoryError>;
            async fn settings(&self) -> Result<ProfileSettings, RepositoryError>;
            async fn save_settings(&self, settings: ProfileSettings) -> Result<ProfileSettings, RepositoryError>;
        }
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "longenough1".to_string(),
            confirm_password: "longenough1".to_string(),
            agree_to_terms: true,
            user_type: AccountType::Provider,
        }
    }

    fn service(accounts: MockTestAccountRepository) -> AccountService {
        AccountService::new(Arc::new(accounts), Arc::new(MockTestProfileRepository::new()))
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts.expect_create().times(1).returning(Ok);

        let account = service(accounts).register(valid_form()).await.unwrap();
        assert_eq!(account.email, "grace@example.com");
        assert_eq!(account.account_type, AccountType::Provider);
        assert_eq!(account.full_name(), "Grace Hopper");
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let accounts = MockTestAccountRepository::new();
        let form = RegistrationForm {
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..valid_form()
        };

        match service(accounts).register(form).await {
            Err(ServiceError::InvalidFields { fields }) => assert_eq!(
                fields.get("password"),
                Some("Password must be at least 8 characters")
            ),
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut accounts = MockTestAccountRepository::new();
        accounts
            .expect_find_by_email()
            .returning(|_| Ok(Some(Account::from_form(&valid_form()))));
        accounts.expect_create().never();

        match service(accounts).register(valid_form()).await {
            Err(ServiceError::InvalidFields { fields }) => {
                assert_eq!(fields.get("email"), Some(EMAIL_TAKEN))
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_constraint_race_maps_to_email_error() {
        let mut accounts = MockTestAccountRepository::new();
        accounts.expect_find_by_email().returning(|_| Ok(None));
        accounts.expect_create().returning(|_| {
            Err(RepositoryError::ConstraintViolation {
                message: "email already registered".to_string(),
            })
        });

        let result = service(accounts).register(valid_form()).await;
        assert!(matches!(result, Err(ServiceError::InvalidFields { .. })));
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let mut profiles = MockTestProfileRepository::new();
        profiles
            .expect_find_by_id()
            .returning(|id| Ok(seed::profiles().into_iter().find(|p| p.id == id)));

        let service = AccountService::new(
            Arc::new(MockTestAccountRepository::new()),
            Arc::new(profiles),
        );

        let profile = service.get_profile("john-smith").await.unwrap();
        assert_eq!(profile.stats.completed_projects, 132);
        assert!(matches!(
            service.get_profile("nobody").await,
            Err(ServiceError::ProfileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_dashboard_for_client() {
        let mut profiles = MockTestProfileRepository::new();
        profiles.expect_dashboard().returning(|| Ok(seed::dashboard()));

        let service = AccountService::new(
            Arc::new(MockTestAccountRepository::new()),
            Arc::new(profiles),
        );

        let response = service.dashboard(AccountType::Client).await.unwrap();
        assert!(matches!(response.stats, DashboardStats::Client(ref c) if c.saved_services == 8));
        assert_eq!(response.recent_activity[0].id, "act-123");
    }

    fn with_profiles(profiles: MockTestProfileRepository) -> AccountService {
        AccountService::new(Arc::new(MockTestAccountRepository::new()), Arc::new(profiles))
    }

    #[tokio::test]
    async fn test_settings_page_lists_skill_options() {
        let mut profiles = MockTestProfileRepository::new();
        profiles
            .expect_settings()
            .times(1)
            .returning(|| Ok(seed::profile_settings()));

        let page = with_profiles(profiles).settings().await.unwrap();
        assert_eq!(page.settings.email, "john.doe@example.com");
        assert_eq!(page.skill_options.len(), 20);
    }

    #[tokio::test]
    async fn test_update_settings_trims_and_saves() {
        let mut profiles = MockTestProfileRepository::new();
        profiles
            .expect_save_settings()
            .times(1)
            .withf(|s| s.title == "Senior Developer")
            .returning(Ok);

        let settings = ProfileSettings {
            title: "  Senior Developer ".to_string(),
            ..seed::profile_settings()
        };
        let saved = with_profiles(profiles).update_settings(settings).await.unwrap();
        assert_eq!(saved.title, "Senior Developer");
    }

    #[tokio::test]
    async fn test_invalid_settings_are_not_saved() {
        let mut profiles = MockTestProfileRepository::new();
        profiles.expect_save_settings().never();

        let settings = ProfileSettings {
            skills: vec!["cobol".to_string()],
            ..seed::profile_settings()
        };

        match with_profiles(profiles).update_settings(settings).await {
            Err(ServiceError::InvalidFields { fields }) => {
                assert_eq!(fields.get("skills"), Some("Unknown skill: cobol"))
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }
}
