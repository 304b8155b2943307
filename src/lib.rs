//! Watches the UKE exam listing for new radio exams and forwards them to a
//! Telegram chat.

pub mod api;
pub mod core;
pub mod notify;
pub mod scanner;
