//! Alert texts sent through the notifier. Telegram renders them with the
//! HTML parse mode, so every value taken from the API is escaped.

use chrono::NaiveDateTime;
use std::fmt::Write;

use crate::api::ExamRecord;

pub const EXAMS_PAGE_URL: &str = "https://egzaminy.uke.gov.pl/pl/proposals/";

/// Local time in the layout Polish users expect, e.g. `1.06.2024, 09:05:00`.
pub fn format_check_time(at: NaiveDateTime) -> String {
    at.format("%-d.%m.%Y, %H:%M:%S").to_string()
}

/// Results alert. Records are listed in the order the API returned them and
/// only fields that are present get a line.
pub fn format_exam_message(exams: &[ExamRecord], checked_at: NaiveDateTime) -> String {
    let mut message = String::from("🚨 <b>New Radio Exams Found!</b>\n\n");
    let _ = write!(message, "📊 Total exams: {}\n\n", exams.len());

    for (index, exam) in exams.iter().enumerate() {
        let _ = writeln!(message, "<b>Exam {}:</b>", index + 1);
        if let Some(date) = exam.date() {
            let _ = writeln!(message, "Date: {}", escape_html(&date));
        }
        if let Some(location) = exam.location() {
            let _ = writeln!(message, "Location: {}", escape_html(&location));
        }
        message.push('\n');
    }

    let _ = writeln!(message, "⏰ Checked at: {}", format_check_time(checked_at));
    let _ = write!(message, "Link to exams: {}", EXAMS_PAGE_URL);
    message
}

/// Connectivity alert.
pub fn format_error_message(error: &str, at: NaiveDateTime) -> String {
    format!(
        "⚠️ <b>Exam Parser Error</b>\n\nFailed to connect to exam API.\nError: {}\nTime: {}",
        escape_html(error),
        format_check_time(at)
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
