//! Visit registration workflow.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::Set;
use serde::Deserialize;
use unitvisit_common::{AppError, AppResult, IdGenerator};
use unitvisit_db::{
    entities::{
        user,
        visit_registration::{self, RegistrationStatus, VehicleType},
    },
    repositories::{RegistrationFilter, RegistrationRepository},
};
use validator::Validate;

use crate::services::{CODE_LENGTH, CodeGenerator, UnitService};

/// Input for a public visit-registration submission.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationInput {
    #[validate(length(min = 1, max = 256))]
    pub soldier_name: String,

    #[validate(length(min = 1, max = 32))]
    pub unit_code: String,

    #[validate(length(min = 1, max = 256))]
    pub relative_name: String,

    #[validate(length(min = 1, max = 64))]
    pub relationship: String,

    pub visit_date: NaiveDate,

    #[validate(length(min = 1, max = 128))]
    pub province: String,

    #[validate(length(min = 1, max = 128))]
    pub ward: String,

    #[validate(range(min = 1, max = 50))]
    pub number_of_visitors: i32,

    pub vehicle_type: VehicleType,

    #[validate(range(min = 1))]
    pub vehicle_count: i32,

    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}

/// Input for a reviewer's approve/reject decision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub registration_id: String,
    pub status: RegistrationStatus,
    pub admin_notes: Option<String>,
}

/// Public view of a registration returned by the anonymous lookup.
///
/// Omits the reviewer identity. Review notes are included, matching the
/// reference portal's behavior.
#[derive(Debug, Clone)]
pub struct RegistrationLookup {
    pub registration_code: String,
    pub soldier_name: String,
    pub unit_name: String,
    pub relative_name: String,
    pub relationship: String,
    pub visit_date: NaiveDate,
    pub status: RegistrationStatus,
    pub admin_notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Filters accepted by the admin registration listing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub status: Option<RegistrationStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// The registration lifecycle: submission, review, and anonymous lookup.
#[derive(Clone)]
pub struct RegistrationService {
    registration_repo: RegistrationRepository,
    unit_service: UnitService,
    code_generator: CodeGenerator,
    id_gen: IdGenerator,
}

impl RegistrationService {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(
        registration_repo: RegistrationRepository,
        unit_service: UnitService,
        code_generator: CodeGenerator,
    ) -> Self {
        Self {
            registration_repo,
            unit_service,
            code_generator,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a new registration. Created in PENDING state.
    pub async fn submit(
        &self,
        input: SubmitRegistrationInput,
    ) -> AppResult<visit_registration::Model> {
        input.validate()?;

        let unit = self.unit_service.resolve(&input.unit_code).await?;
        let main_unit = self.unit_service.resolve_main(&unit).await?;

        let code = self.code_generator.generate().await?;
        let now = Utc::now();

        let model = visit_registration::ActiveModel {
            id: Set(self.id_gen.generate()),
            registration_code: Set(code),
            soldier_name: Set(input.soldier_name),
            unit_code: Set(unit.code),
            main_unit_code: Set(main_unit.code),
            relative_name: Set(input.relative_name),
            relationship: Set(input.relationship),
            visit_date: Set(input.visit_date),
            province: Set(input.province),
            ward: Set(input.ward),
            number_of_visitors: Set(input.number_of_visitors),
            vehicle_type: Set(input.vehicle_type),
            vehicle_count: Set(input.vehicle_count),
            phone_number: Set(input.phone_number),
            status: Set(RegistrationStatus::Pending),
            admin_notes: Set(None),
            reviewed_by_id: Set(None),
            reviewed_at: Set(None),
            submitted_at: Set(now.into()),
        };

        self.registration_repo.create(model).await
    }

    /// Apply a reviewer's decision to a registration.
    ///
    /// An ADMIN may only act on registrations whose main unit matches their
    /// own; a SUPER_ADMIN may act on any. The current status is not guarded:
    /// a terminal registration can be re-reviewed and overwritten, matching
    /// the reference behavior (last write wins).
    pub async fn review(
        &self,
        acting_user: &user::Model,
        input: ReviewInput,
    ) -> AppResult<visit_registration::Model> {
        let registration = self
            .registration_repo
            .get_by_id(&input.registration_id)
            .await?;

        if !acting_user.is_super_admin()
            && acting_user.unit_code.as_deref() != Some(registration.main_unit_code.as_str())
        {
            return Err(AppError::Forbidden(
                "You can only manage registrations for your own unit".to_string(),
            ));
        }

        let now = Utc::now();
        let mut model: visit_registration::ActiveModel = registration.into();
        model.status = Set(input.status);
        model.admin_notes = Set(input.admin_notes.filter(|n| !n.is_empty()));
        model.reviewed_by_id = Set(Some(acting_user.id.clone()));
        model.reviewed_at = Set(Some(now.into()));

        self.registration_repo.update(model).await
    }

    /// Anonymous status lookup by registration code.
    pub async fn lookup(&self, code: &str) -> AppResult<RegistrationLookup> {
        if code.chars().count() != CODE_LENGTH {
            return Err(AppError::Validation(
                "Registration code must be exactly 7 characters".to_string(),
            ));
        }

        let registration = self
            .registration_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::RegistrationNotFound(code.to_string()))?;

        let unit = self.unit_service.resolve(&registration.unit_code).await?;

        Ok(RegistrationLookup {
            registration_code: registration.registration_code,
            soldier_name: registration.soldier_name,
            unit_name: unit.name,
            relative_name: registration.relative_name,
            relationship: registration.relationship,
            visit_date: registration.visit_date,
            status: registration.status,
            admin_notes: registration.admin_notes,
            submitted_at: registration.submitted_at.into(),
        })
    }

    /// List registrations for the admin dashboard.
    ///
    /// Unit-scoped reviewers only see their own main unit's registrations;
    /// SUPER_ADMIN sees everything.
    pub async fn list(
        &self,
        acting_user: &user::Model,
        query: ListQuery,
    ) -> AppResult<Vec<visit_registration::Model>> {
        let filter = RegistrationFilter {
            status: query.status,
            main_unit_code: if acting_user.is_super_admin() {
                None
            } else {
                acting_user.unit_code.clone()
            },
            visit_from: query.start_date,
            visit_to: query.end_date,
        };

        self.registration_repo.list(&filter).await
    }
}
