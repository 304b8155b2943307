pub mod exam_checker;
pub mod message;
pub mod scheduler;

pub use exam_checker::{ExamChecker, PollOutcome};
pub use message::{format_error_message, format_exam_message};
pub use scheduler::Scheduler;
