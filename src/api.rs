//! JSON request/response boundary for the lookup service
//!
//! Transport independent: the Lambda handler and tests both go through
//! [`rates`] and [`lookup`], which never fail and always produce a status code
//! with a JSON body.

use crate::error::LookupError;
use crate::lookup::{FactorLookup, FactorLookupResult};
use crate::table::FactorSource;
use log::debug;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Status code and JSON body for one API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, format!("Serialization error: {}", e)),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<LookupError> for ApiResponse {
    fn from(err: LookupError) -> Self {
        Self::error(err.status_code(), err.to_string())
    }
}

/// Body of `GET /api/rates`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatesResponse {
    pub rates: Vec<f64>,
    pub total_rates: usize,
}

/// Body of a successful `POST /api/lookup`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    #[serde(flatten)]
    pub result: FactorLookupResult,
    pub lookup_success: bool,
}

/// Parsed body of `POST /api/lookup`
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub rate: f64,
    pub factor_type: String,
    pub period: i64,
}

const REQUIRED_FIELDS: [&str; 3] = ["rate", "factor_type", "period"];

impl LookupRequest {
    /// Parse a raw request body
    pub fn from_json(body: &str) -> Result<Self, LookupError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| LookupError::InvalidJson(e.to_string()))?;
        match &value {
            Value::Object(fields) => Self::from_fields(fields),
            _ => Err(LookupError::InvalidJson("expected a JSON object".to_string())),
        }
    }

    /// Validate fields: presence first (in order), then types.
    ///
    /// `rate` accepts numbers or numeric strings; `period` accepts integers,
    /// integral floats, or integer strings.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, LookupError> {
        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                return Err(LookupError::MissingField(field));
            }
        }

        let rate = parse_rate(&fields["rate"]).ok_or(LookupError::InvalidInput)?;
        let factor_type = match &fields["factor_type"] {
            Value::String(s) => s.clone(),
            _ => return Err(LookupError::InvalidInput),
        };
        let period = parse_period(&fields["period"]).ok_or(LookupError::InvalidInput)?;

        Ok(Self { rate, factor_type, period })
    }
}

fn parse_rate(value: &Value) -> Option<f64> {
    let rate = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    rate.filter(|r| r.is_finite())
}

fn parse_period(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
                .map(|v| v as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// `GET /api/rates`
pub fn rates<S: FactorSource>(service: &FactorLookup<S>) -> ApiResponse {
    match service.list_available_rates() {
        Ok(rates) => ApiResponse::json(
            200,
            &RatesResponse {
                total_rates: rates.len(),
                rates,
            },
        ),
        Err(e) => ApiResponse::error(500, format!("Error loading rates: {}", e)),
    }
}

/// `POST /api/lookup`
pub fn lookup<S: FactorSource>(service: &FactorLookup<S>, body: &str) -> ApiResponse {
    let response = LookupRequest::from_json(body).and_then(|request| {
        service.lookup(request.rate, &request.factor_type, request.period)
    });

    match response {
        Ok(result) => ApiResponse::json(
            200,
            &LookupResponse {
                result,
                lookup_success: true,
            },
        ),
        Err(e) => {
            debug!("Lookup rejected ({:?}): {}", e.kind(), e);
            e.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CsvFileSource, CsvTextSource};

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/factors_table.csv");

    fn service() -> FactorLookup<CsvFileSource> {
        FactorLookup::new(CsvFileSource::new(FIXTURE))
    }

    fn error_message(response: &ApiResponse) -> &str {
        response.body["error"].as_str().expect("error body")
    }

    #[test]
    fn test_rates_endpoint() {
        let response = rates(&service());
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({ "rates": [0.25, 0.5, 1.0, 2.0], "total_rates": 4 })
        );
    }

    #[test]
    fn test_rates_on_empty_table() {
        let empty = FactorLookup::new(CsvTextSource::new("interest_rate,n,F/P\n"));
        let response = rates(&empty);
        assert!(response.is_success());
        assert_eq!(response.body, json!({ "rates": [], "total_rates": 0 }));
    }

    #[test]
    fn test_rates_when_table_missing() {
        let missing = FactorLookup::new(CsvFileSource::new("nowhere/factors.csv"));
        let response = rates(&missing);
        assert_eq!(response.status, 500);
        assert!(error_message(&response).starts_with("Error loading rates: "));
    }

    #[test]
    fn test_lookup_success_body() {
        let response = lookup(
            &service(),
            r#"{"rate": 0.25, "factor_type": "F/P", "period": 1}"#,
        );
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({
                "rate": 0.25,
                "factor_type": "F/P",
                "period": 1,
                "factor_value": 1.0025,
                "factor_info": {
                    "name": "(F/P) - Future Worth of Present Sum",
                    "formula": "F = P × (F/P,i%,n)",
                },
                "lookup_success": true,
            })
        );
    }

    #[test]
    fn test_lookup_accepts_strings_and_integral_floats() {
        let service = service();

        let response = lookup(&service, r#"{"rate": "1.0", "factor_type": "A/P", "period": "3"}"#);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["factor_value"], json!(0.34));

        let response = lookup(&service, r#"{"rate": 2, "factor_type": "P/G", "period": 4.0}"#);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["factor_value"], json!(5.6173));
        assert_eq!(response.body["period"], json!(4));
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let service = service();

        let response = lookup(&service, r#"{"period": 1}"#);
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "Missing required field: rate");

        let response = lookup(&service, r#"{"rate": 0.25, "period": 1}"#);
        assert_eq!(error_message(&response), "Missing required field: factor_type");

        let response = lookup(&service, r#"{"rate": 0.25, "factor_type": "F/P"}"#);
        assert_eq!(error_message(&response), "Missing required field: period");
    }

    #[test]
    fn test_non_numeric_input() {
        let service = service();
        let bodies = [
            r#"{"rate": "abc", "factor_type": "F/P", "period": 1}"#,
            r#"{"rate": 0.25, "factor_type": "F/P", "period": 1.5}"#,
            r#"{"rate": 0.25, "factor_type": "F/P", "period": "one"}"#,
            r#"{"rate": null, "factor_type": "F/P", "period": 1}"#,
            r#"{"rate": 0.25, "factor_type": 7, "period": 1}"#,
        ];
        for body in bodies {
            let response = lookup(&service, body);
            assert_eq!(response.status, 400, "body: {}", body);
            assert_eq!(
                error_message(&response),
                "Invalid input format. Please enter numeric values."
            );
        }
    }

    #[test]
    fn test_malformed_json() {
        let service = service();

        let response = lookup(&service, "{not json");
        assert_eq!(response.status, 400);
        assert!(error_message(&response).starts_with("Invalid JSON: "));

        let response = lookup(&service, "[0.25, \"F/P\", 1]");
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "Invalid JSON: expected a JSON object");
    }

    #[test]
    fn test_no_data_for_rate() {
        let response = lookup(
            &service(),
            r#"{"rate": 99.0, "factor_type": "F/P", "period": 1}"#,
        );
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "No data found for rate 99.0% and period 1");
    }

    #[test]
    fn test_unknown_factor_type() {
        let response = lookup(
            &service(),
            r#"{"rate": 0.25, "factor_type": "X/Y", "period": 1}"#,
        );
        assert_eq!(response.status, 400);
        assert_eq!(error_message(&response), "Factor type X/Y not found in table");
    }

    #[test]
    fn test_lookup_when_table_missing() {
        let missing = FactorLookup::new(CsvFileSource::new("nowhere/factors.csv"));
        let response = lookup(&missing, r#"{"rate": 0.25, "factor_type": "F/P", "period": 1}"#);
        assert_eq!(response.status, 500);
        assert_eq!(
            error_message(&response),
            "Lookup error: factor table not found at nowhere/factors.csv"
        );
    }
}
