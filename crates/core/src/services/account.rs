//! Administrative accounts and sessions.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use unitvisit_common::{AppError, AppResult, IdGenerator};
use unitvisit_db::{
    entities::user::{self, UserRole},
    repositories::UserRepository,
};
use validator::Validate;

use crate::services::UnitService;

/// Input for creating a unit admin account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminInput {
    #[validate(length(min = 8, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(length(min = 1, max = 32))]
    pub unit_code: String,
}

/// Input for updating one's own profile.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 6))]
    pub password: Option<String>,
}

/// Account management and token-based sessions for reviewers.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    unit_service: UnitService,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, unit_service: UnitService) -> Self {
        Self {
            user_repo,
            unit_service,
            id_gen: IdGenerator::new(),
        }
    }

    /// Sign in with phone and password, issuing a fresh session token.
    ///
    /// The same message is returned for an unknown phone and a wrong
    /// password, so callers cannot probe which accounts exist.
    pub async fn authenticate(&self, phone: &str, password: &str) -> AppResult<user::Model> {
        let invalid =
            || AppError::Unauthorized("Invalid phone number or password".to_string());

        let user = self
            .user_repo
            .find_by_phone(phone)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".to_string()));
        }

        let mut model: user::ActiveModel = user.into();
        model.token = Set(Some(self.id_gen.generate_token()));
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// Resolve a bearer token to its account. Disabled accounts are
    /// rejected even when their token is still stored.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".to_string()));
        }

        Ok(user)
    }

    /// Invalidate the account's session token.
    pub async fn sign_out(&self, user: user::Model) -> AppResult<()> {
        let mut model: user::ActiveModel = user.into();
        model.token = Set(None);
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await?;
        Ok(())
    }

    /// Create a unit admin account. SUPER_ADMIN only; the new account is
    /// always a unit-scoped ADMIN.
    pub async fn create_admin(
        &self,
        acting_user: &user::Model,
        input: CreateAdminInput,
    ) -> AppResult<user::Model> {
        if !acting_user.is_super_admin() {
            return Err(AppError::Forbidden(
                "Only a super admin can manage accounts".to_string(),
            ));
        }
        input.validate()?;

        if self.user_repo.find_by_phone(&input.phone).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Phone number already registered: {}",
                input.phone
            )));
        }

        let unit = self.unit_service.resolve(&input.unit_code).await?;
        let main_unit = self.unit_service.resolve_main(&unit).await?;
        let now = Utc::now();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            phone: Set(input.phone),
            name: Set(input.name),
            password_hash: Set(hash_password(&input.password)?),
            role: Set(UserRole::Admin),
            unit_code: Set(Some(main_unit.code)),
            is_active: Set(true),
            token: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Enable or disable an account. SUPER_ADMIN only; super admin
    /// accounts cannot be disabled. Disabling drops the session token.
    pub async fn set_active(
        &self,
        acting_user: &user::Model,
        user_id: &str,
        active: bool,
    ) -> AppResult<user::Model> {
        if !acting_user.is_super_admin() {
            return Err(AppError::Forbidden(
                "Only a super admin can manage accounts".to_string(),
            ));
        }

        let target = self.user_repo.get_by_id(user_id).await?;
        if target.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super admin accounts cannot be disabled".to_string(),
            ));
        }

        let mut model: user::ActiveModel = target.into();
        model.is_active = Set(active);
        if !active {
            model.token = Set(None);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// Update the acting user's own name, phone, or password.
    pub async fn update_profile(
        &self,
        acting_user: &user::Model,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        if let Some(ref phone) = input.phone
            && phone != &acting_user.phone
            && self.user_repo.find_by_phone(phone).await?.is_some()
        {
            return Err(AppError::Conflict(format!(
                "Phone number already registered: {phone}"
            )));
        }

        let mut model: user::ActiveModel = acting_user.clone().into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(phone) = input.phone {
            model.phone = Set(phone);
        }
        if let Some(password) = input.password {
            model.password_hash = Set(hash_password(&password)?);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(model).await
    }

    /// List all accounts. SUPER_ADMIN only.
    pub async fn list(&self, acting_user: &user::Model) -> AppResult<Vec<user::Model>> {
        if !acting_user.is_super_admin() {
            return Err(AppError::Forbidden(
                "Only a super admin can manage accounts".to_string(),
            ));
        }

        self.user_repo.find_all().await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
