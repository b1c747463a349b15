//! Database repositories.

mod feedback;
mod registration;
mod unit;
mod user;

pub use feedback::FeedbackRepository;
pub use registration::{RegistrationFilter, RegistrationRepository};
pub use unit::UnitRepository;
pub use user::UserRepository;
