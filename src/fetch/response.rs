use serde::{Deserialize, Deserializer};

const STATUS_OK: &str = "OK";

/// Decoded body of one API answer. Country-precision answers carry only the country fields.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiResponse {
    pub status_code: String,
    pub status_message: String,
    #[serde(deserialize_with = "present_string")]
    pub ip_address: Option<String>,
    #[serde(deserialize_with = "present_string")]
    pub country_code: Option<String>,
    #[serde(deserialize_with = "present_string")]
    pub country_name: Option<String>,
    #[serde(deserialize_with = "present_string")]
    pub region_name: Option<String>,
    #[serde(deserialize_with = "present_string")]
    pub city_name: Option<String>,
    #[serde(deserialize_with = "present_string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "coordinate")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "coordinate")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "present_string")]
    pub time_zone: Option<String>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// The provider fills unknown fields with "-" or an empty string.
fn is_placeholder(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "-"
}

fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !is_placeholder(s)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateDe {
    Number(f64),
    Text(String),
}

fn coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<CoordinateDe> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(CoordinateDe::Number(number)) => Ok(Some(number)),
        Some(CoordinateDe::Text(text)) if is_placeholder(&text) => Ok(None),
        Some(CoordinateDe::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!(r#"invalid coordinate "{text}""#))),
    }
}
