use crate::utils::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 依照記錄型別驗證 JSON；缺欄位、型別錯誤或未知列舉值都回傳 ValidationError
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ClientError::validation(e.to_string()))
}

/// 驗證 JSON 陣列，錯誤訊息會標出第幾筆
pub fn parse_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::validation(format!(
                "expected an array, got {}",
                kind_of(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| ClientError::validation(format!("item {}: {}", index, e)))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
