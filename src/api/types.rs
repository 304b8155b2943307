use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body returned by `netpar/exams.json`. Either field may be missing, and a
/// field of an unexpected shape is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExamResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub meta: Option<ResponseMeta>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub exams: Option<Vec<ExamRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseMeta {
    /// Only logged, so accept whatever shape the API sends.
    pub total_count: Option<Value>,
}

/// One listing entry. Values are kept raw and rendered on demand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExamRecord {
    pub date_exam: Option<Value>,
    pub fullname: Option<Value>,
}

impl ExamResponse {
    pub fn total_count(&self) -> u64 {
        self.meta
            .as_ref()
            .and_then(|m| m.total_count.as_ref())
            .and_then(|v| match v {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Consumes the response. A missing list means no results.
    pub fn into_exams(self) -> Vec<ExamRecord> {
        self.exams.unwrap_or_default()
    }
}

impl ExamRecord {
    pub fn date(&self) -> Option<String> {
        render(self.date_exam.as_ref())
    }

    pub fn location(&self) -> Option<String> {
        render(self.fullname.as_ref())
    }
}

/// Scalars become text; null, empty strings and containers count as absent.
fn render(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps every entry that decodes; a non-array counts as no list at all.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() < total {
        tracing::warn!(
            skipped = total - decoded.len(),
            "Ignoring listing entries that are not objects"
        );
    }
    Ok(Some(decoded))
}
