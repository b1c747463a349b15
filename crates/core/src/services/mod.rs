//! Core services.

mod account;
mod code;
mod feedback;
mod registration;
mod statistics;
mod unit;

pub use account::{AccountService, CreateAdminInput, UpdateProfileInput};
pub use code::{CODE_ALPHABET, CODE_LENGTH, CodeGenerator};
pub use feedback::{FeedbackService, SubmitFeedbackInput};
pub use registration::{
    ListQuery, RegistrationLookup, RegistrationService, ReviewInput, SubmitRegistrationInput,
};
pub use statistics::{MonthlySummary, ProvinceStat, StatisticsService};
pub use unit::UnitService;
