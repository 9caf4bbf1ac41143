pub mod extractor;
pub mod parameter_error_handler;
pub mod password;
pub mod session;
pub mod sql;
pub mod validate;
pub mod view;

pub use extractor::{
    SafeClassroomIdI64, SafeDoubtIdI64, SafeExamIdI64, SafeExerciseIdI64, SafeIDI64,
    SafeQuestionIdI64,
};
pub use parameter_error_handler::{form_error_handler, query_error_handler};
pub use session::{SessionClaims, SessionUtils};
pub use sql::escape_like_pattern;
pub use view::{current_user, redirect, redirect_with_flash, render, render_invalid};
