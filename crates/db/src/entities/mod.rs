//! Database entities.

pub mod feedback;
pub mod unit;
pub mod user;
pub mod visit_registration;

pub use feedback::Entity as Feedback;
pub use unit::Entity as Unit;
pub use user::Entity as User;
pub use visit_registration::Entity as VisitRegistration;
