pub mod form;
pub mod pagination;
pub mod question_type;
pub mod response;

pub use pagination::*;
pub use question_type::QuestionType;
pub use response::*;
