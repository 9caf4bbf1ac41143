pub mod auth;

pub mod courses;

pub mod classrooms;

pub mod exams;

pub mod newsletter;

pub mod visitor_questions;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use frontend::configure_frontend_routes;
pub use newsletter::configure_newsletter_routes;
pub use visitor_questions::configure_visitor_question_routes;
