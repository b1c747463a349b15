//! Monthly visit statistics.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use unitvisit_common::{AppError, AppResult};
use unitvisit_db::{entities::user, repositories::RegistrationRepository};

/// Visitor totals for a single province of origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceStat {
    pub province: String,
    pub total_visitors: i64,
    pub registration_count: i64,
}

/// Aggregate figures for one calendar month.
///
/// Only APPROVED registrations whose review fell inside the month are
/// counted, so `approved_registrations` always equals `total_registrations`
/// and the pending/rejected buckets are zero. They are kept in the payload
/// because the dashboard renders all four.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub total_visitors: i64,
    pub total_registrations: i64,
    pub approved_registrations: i64,
    pub pending_registrations: i64,
    pub rejected_registrations: i64,
    pub province_stats: Vec<ProvinceStat>,
}

/// Aggregates approved registrations into monthly dashboard figures.
#[derive(Clone)]
pub struct StatisticsService {
    registration_repo: RegistrationRepository,
}

impl StatisticsService {
    /// Create a new statistics service.
    #[must_use]
    pub const fn new(registration_repo: RegistrationRepository) -> Self {
        Self { registration_repo }
    }

    /// Compute the summary for a `YYYY-MM` month, optionally scoped to a
    /// main unit.
    pub async fn monthly_summary(
        &self,
        month: &str,
        main_unit_code: Option<&str>,
    ) -> AppResult<MonthlySummary> {
        let (start, end) = month_bounds(month)?;

        let registrations = self
            .registration_repo
            .find_approved_reviewed_between(start, end, main_unit_code)
            .await?;

        let total_registrations = registrations.len() as i64;
        let total_visitors: i64 = registrations
            .iter()
            .map(|r| i64::from(r.number_of_visitors))
            .sum();

        let mut by_province: HashMap<String, (i64, i64)> = HashMap::new();
        for registration in &registrations {
            let entry = by_province
                .entry(registration.province.clone())
                .or_insert((0, 0));
            entry.0 += i64::from(registration.number_of_visitors);
            entry.1 += 1;
        }

        let mut province_stats: Vec<ProvinceStat> = by_province
            .into_iter()
            .map(|(province, (total_visitors, registration_count))| ProvinceStat {
                province,
                total_visitors,
                registration_count,
            })
            .collect();
        province_stats.sort_by(|a, b| b.total_visitors.cmp(&a.total_visitors));

        Ok(MonthlySummary {
            month: month.to_string(),
            total_visitors,
            total_registrations,
            approved_registrations: total_registrations,
            pending_registrations: 0,
            rejected_registrations: 0,
            province_stats,
        })
    }

    /// Scope a summary request to the acting user: SUPER_ADMIN sees all
    /// units, a unit admin sees only their own.
    pub async fn monthly_summary_for(
        &self,
        acting_user: &user::Model,
        month: &str,
    ) -> AppResult<MonthlySummary> {
        let scope = if acting_user.is_super_admin() {
            None
        } else {
            acting_user.unit_code.as_deref()
        };

        self.monthly_summary(month, scope).await
    }
}

/// Parse `YYYY-MM` into the inclusive UTC bounds of that month.
fn month_bounds(month: &str) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let invalid = || AppError::Validation(format!("Invalid month, expected YYYY-MM: {month}"));

    let (year_str, month_str) = month.split_once('-').ok_or_else(invalid)?;
    if year_str.len() != 4 || month_str.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month_num: u32 = month_str.parse().map_err(|_| invalid())?;

    let first = NaiveDate::from_ymd_opt(year, month_num, 1).ok_or_else(invalid)?;
    let next_month = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_month.pred_opt().ok_or_else(invalid)?;

    let start = Utc
        .from_utc_datetime(&first.and_hms_opt(0, 0, 0).ok_or_else(invalid)?);
    let end = Utc
        .from_utc_datetime(&last.and_hms_milli_opt(23, 59, 59, 999).ok_or_else(invalid)?);

    debug_assert_eq!(start.month(), end.month());
    Ok((start, end))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use unitvisit_db::entities::visit_registration::{
        self, RegistrationStatus, VehicleType,
    };

    fn approved(province: &str, visitors: i32) -> visit_registration::Model {
        visit_registration::Model {
            id: format!("reg-{province}-{visitors}"),
            registration_code: "Ab3X9kL".to_string(),
            soldier_name: "Nguyễn Văn A".to_string(),
            unit_code: "901-D1".to_string(),
            main_unit_code: "901".to_string(),
            relative_name: "Nguyễn Văn B".to_string(),
            relationship: "Bố".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            province: province.to_string(),
            ward: "Phúc Xá".to_string(),
            number_of_visitors: visitors,
            vehicle_type: VehicleType::Car,
            vehicle_count: 1,
            phone_number: "0912345678".to_string(),
            status: RegistrationStatus::Approved,
            admin_notes: None,
            reviewed_by_id: Some("u1".to_string()),
            reviewed_at: Some(Utc::now().into()),
            submitted_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_summary_totals_and_province_ordering() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    approved("Hà Nội", 2),
                    approved("Hà Nội", 3),
                    approved("Hà Nội", 5),
                    approved("Thừa Thiên Huế", 1),
                ]])
                .into_connection(),
        );
        let service = StatisticsService::new(RegistrationRepository::new(db));

        let summary = service.monthly_summary("2024-03", None).await.unwrap();

        assert_eq!(summary.total_visitors, 11);
        assert_eq!(summary.total_registrations, 4);
        assert_eq!(summary.approved_registrations, 4);
        assert_eq!(summary.pending_registrations, 0);
        assert_eq!(summary.rejected_registrations, 0);

        assert_eq!(
            summary.province_stats,
            vec![
                ProvinceStat {
                    province: "Hà Nội".to_string(),
                    total_visitors: 10,
                    registration_count: 3,
                },
                ProvinceStat {
                    province: "Thừa Thiên Huế".to_string(),
                    total_visitors: 1,
                    registration_count: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_serializes_dashboard_field_names() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![approved("Hà Nội", 4)]])
                .into_connection(),
        );
        let service = StatisticsService::new(RegistrationRepository::new(db));

        let summary = service.monthly_summary("2024-03", None).await.unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["approvedRegistrations"], 1);
        assert_eq!(json["pendingRegistrations"], 0);
        assert_eq!(json["rejectedRegistrations"], 0);
        assert_eq!(json["provinceStats"][0]["registrationCount"], 1);
        assert_eq!(json["provinceStats"][0]["totalVisitors"], 4);
    }

    #[tokio::test]
    async fn test_summary_of_empty_month_is_all_zeroes() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<visit_registration::Model>::new()])
                .into_connection(),
        );
        let service = StatisticsService::new(RegistrationRepository::new(db));

        let summary = service.monthly_summary("2024-02", None).await.unwrap();

        assert_eq!(summary.total_visitors, 0);
        assert_eq!(summary.total_registrations, 0);
        assert!(summary.province_stats.is_empty());
    }

    #[tokio::test]
    async fn test_summary_rejects_malformed_month() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = StatisticsService::new(RegistrationRepository::new(db));

        for bad in ["2024", "2024-13", "24-03", "2024-3", "March 2024"] {
            let err = service.monthly_summary(bad, None).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {bad}");
        }
    }

    #[test]
    fn test_month_bounds_cover_leap_february() {
        let (start, end) = month_bounds("2024-02").unwrap();

        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_month_bounds_handle_december_rollover() {
        let (start, end) = month_bounds("2023-12").unwrap();

        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }
}
