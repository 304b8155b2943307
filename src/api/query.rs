use reqwest::Url;

use crate::core::config::ExamApiConfig;

/// Maritime exams.
pub const EXAM_CATEGORY: &str = "M";
/// Examination board division for the Gdynia region.
pub const DIVISION_ID: u32 = 14;
pub const PAGE_LIMIT: u32 = 10;
pub const PAGE: u32 = 1;

/// Builds the listing query. `now_millis` goes into the `_` parameter so
/// intermediate caches never serve a stale page.
pub fn build_request_url(config: &ExamApiConfig, now_millis: i64) -> Url {
    let mut url = config.base_url.clone();
    url.query_pairs_mut()
        .append_pair("category", EXAM_CATEGORY)
        .append_pair("division_id", &DIVISION_ID.to_string())
        .append_pair("q", &config.search_keyword)
        .append_pair("page_limit", &PAGE_LIMIT.to_string())
        .append_pair("page", &PAGE.to_string())
        .append_pair("_", &now_millis.to_string());
    url
}
