use indexmap::IndexMap;
use serde_json::Value;

/// Raw lookup payloads keyed by continent code ("AF", "EU", ...), in lookup order.
pub type ContinentMap = IndexMap<String, Value>;

/// Status object GeoNames embeds in a response body when a request is refused.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStatus {
    pub value: Option<i64>,
    pub message: String,
}

impl ServiceStatus {
    /// Read the `status` object of a response body, if there is one.
    ///
    /// Only `status.value` decides anything; the message is kept in whatever
    /// form the service sent it.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let status = payload.get("status")?;

        let value = status.get("value").and_then(|value| {
            value
                .as_i64()
                .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        });
        let message = match status.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Some(Self { value, message })
    }
}

/// Read the `continentCode` of a lookup payload.
pub fn continent_code(payload: &Value) -> Option<&str> {
    payload.get("continentCode").and_then(Value::as_str)
}
