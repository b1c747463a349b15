//! Registration code generation.

use rand::Rng;
use tracing::debug;
use unitvisit_common::{AppError, AppResult};
use unitvisit_db::repositories::RegistrationRepository;

/// Alphabet for registration codes: 62 symbols, case-sensitive.
pub const CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a registration code.
pub const CODE_LENGTH: usize = 7;

/// Generates unique 7-character registration codes (e.g. `Ab3X9kL`).
///
/// The keyspace is 62^7 (~3.5e12), so collisions are rare but handled
/// explicitly: after drawing a candidate the generator checks the store and
/// redraws on collision, up to a configured bound. The unique index on
/// `registration_code` remains the authoritative guard for the check-then-
/// insert race under concurrent submissions.
#[derive(Clone)]
pub struct CodeGenerator {
    registration_repo: RegistrationRepository,
    max_attempts: u32,
}

impl CodeGenerator {
    /// Create a new code generator.
    #[must_use]
    pub const fn new(registration_repo: RegistrationRepository, max_attempts: u32) -> Self {
        Self {
            registration_repo,
            max_attempts,
        }
    }

    /// Draw a single random candidate code.
    fn draw() -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    /// Generate a code that is free at the time of the check.
    ///
    /// Fails with [`AppError::CodeExhausted`] once the attempt bound is hit.
    pub async fn generate(&self) -> AppResult<String> {
        for _ in 0..self.max_attempts {
            let code = Self::draw();

            if !self.registration_repo.code_exists(&code).await? {
                return Ok(code);
            }

            debug!(code, "Registration code collision, redrawing");
        }

        Err(AppError::CodeExhausted(self.max_attempts))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn count_result(n: i64) -> Vec<std::collections::BTreeMap<&'static str, sea_orm::Value>> {
        vec![maplit::btreemap! {
            "num_items" => sea_orm::Value::BigInt(Some(n))
        }]
    }

    #[tokio::test]
    async fn test_generate_returns_seven_alphanumeric_chars() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([count_result(0)])
                .into_connection(),
        );

        let generator = CodeGenerator::new(RegistrationRepository::new(db), 16);
        let code = generator.generate().await.unwrap();

        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_generate_redraws_on_collision() {
        // First candidate is taken, second is free
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([count_result(1)])
                .append_query_results([count_result(0)])
                .into_connection(),
        );

        let generator = CodeGenerator::new(RegistrationRepository::new(db), 16);
        let code = generator.generate().await.unwrap();

        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[tokio::test]
    async fn test_generate_fails_when_attempts_exhausted() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([count_result(1)])
                .append_query_results([count_result(1)])
                .into_connection(),
        );

        let generator = CodeGenerator::new(RegistrationRepository::new(db), 2);
        let err = generator.generate().await.unwrap_err();

        assert!(matches!(err, AppError::CodeExhausted(2)));
    }

    #[test]
    fn test_alphabet_has_sixty_two_symbols() {
        assert_eq!(CODE_ALPHABET.len(), 62);
    }

    #[test]
    fn test_draw_is_uniform_over_alphabet_only() {
        for _ in 0..100 {
            let code = CodeGenerator::draw();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }
}
