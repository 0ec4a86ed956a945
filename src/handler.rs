//! API gateway request handling: event in, HTTP-shaped JSON response out.
//!
//! Logical failures (vehicle not found, ambiguous charge table) still
//! produce a 200 with the condition described in the body. Only faults
//! (`CheckerError`) escape, for the hosting layer to turn into a 5xx.

use crate::checker::{self, ChargeDetermination, CheckOutcome, VehicleRecord};
use crate::config::Config;
use crate::error::{CheckerError, Result};
use crate::mot::{self, MotClient};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

pub const NOT_FOUND_ERROR: &str = "not_found";
pub const NOT_FOUND_TEXT: &str = "Vehicle details could not be found";

/// The parts of the gateway event we read
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayEvent {
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl GatewayEvent {
    pub fn for_vrn(vrn: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert("vrn".to_string(), vrn.into());
        Self {
            query_string_parameters: Some(params),
        }
    }

    pub fn lookup_request(&self) -> Result<LookupRequest> {
        let vrn = self
            .query_string_parameters
            .as_ref()
            .and_then(|params| params.get("vrn"))
            .ok_or(CheckerError::MissingVrn)?;
        LookupRequest::new(vrn.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub vrn: String,
}

impl LookupRequest {
    /// The VRN is sent upstream exactly as given, but must not be blank
    pub fn new(vrn: String) -> Result<Self> {
        if vrn.trim().is_empty() {
            return Err(CheckerError::MissingVrn);
        }
        Ok(Self { vrn })
    }
}

/// Response body. Field order is the order keys appear in the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(flatten)]
    pub vehicle: VehicleRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
    pub vrn: String,
    pub charged: ChargeDetermination,
    pub mot_data: Value,
    pub last_year_mileage: i64,
}

impl ResponseEnvelope {
    pub fn new(
        vrn: &str,
        outcome: CheckOutcome,
        mot_data: Value,
        last_year_mileage: i64,
    ) -> Self {
        let (vehicle, charged, error, error_text) = match outcome {
            CheckOutcome::NotFound => (
                VehicleRecord::default(),
                ChargeDetermination::Unknown,
                Some(NOT_FOUND_ERROR.to_string()),
                Some(NOT_FOUND_TEXT.to_string()),
            ),
            CheckOutcome::Checked(extracted) => {
                (extracted.vehicle, extracted.charged, None, None)
            }
        };

        Self {
            vehicle,
            error,
            error_text,
            vrn: vrn.to_string(),
            charged,
            mot_data,
            last_year_mileage,
        }
    }

    /// Pretty JSON with four-space indent
    pub fn to_body(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// HTTP-shaped response handed back to the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    pub fn json(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code: 200,
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}

/// Request handler. Construction fails if the MOT API key is missing, so a
/// misconfigured deployment never sends an unauthenticated request.
pub struct Handler {
    config: Config,
    mot: MotClient,
}

impl Handler {
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config.mot_api_key()?;
        let mot = MotClient::new(&config.mot, api_key)?;
        Ok(Self { config, mot })
    }

    pub async fn handle(&self, event: &GatewayEvent) -> Result<GatewayResponse> {
        let request = event.lookup_request()?;
        let envelope = self.lookup(&request).await?;
        Ok(GatewayResponse::json(envelope.to_body()?))
    }

    /// Checker flow first, then the MOT history; strictly one after the other
    pub async fn lookup(&self, request: &LookupRequest) -> Result<ResponseEnvelope> {
        let vrn = request.vrn.as_str();
        info!(vrn, "lookup started");

        let outcome = checker::check_vehicle(&self.config.checker, vrn).await?;

        let mot_data = self.mot.fetch_history(vrn).await?;
        let last_year_mileage = if self.config.enable_mileage_rate {
            mot::last_year_mileage(&mot_data)
        } else {
            0
        };

        Ok(ResponseEnvelope::new(vrn, outcome, mot_data, last_year_mileage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Extracted, VehicleAttribute};
    use serde_json::json;

    #[test]
    fn test_event_requires_vrn() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "resource": "/check",
            "queryStringParameters": { "vrn": "AB12CDE" }
        }))
        .unwrap();
        assert_eq!(event.lookup_request().unwrap().vrn, "AB12CDE");

        let event: GatewayEvent =
            serde_json::from_value(json!({ "queryStringParameters": null })).unwrap();
        assert!(matches!(
            event.lookup_request(),
            Err(CheckerError::MissingVrn)
        ));

        let event = GatewayEvent::for_vrn("  ");
        assert!(matches!(
            event.lookup_request(),
            Err(CheckerError::MissingVrn)
        ));
    }

    #[test]
    fn test_not_found_envelope() {
        let mot_data = json!({ "errorMessage": "No MOT Tests found" });
        let envelope =
            ResponseEnvelope::new("AB12CDE", CheckOutcome::NotFound, mot_data.clone(), 0);
        let body: Value = serde_json::from_str(&envelope.to_body().unwrap()).unwrap();

        assert_eq!(
            body,
            json!({
                "vrn": "AB12CDE",
                "charged": null,
                "error": "not_found",
                "error_text": "Vehicle details could not be found",
                "mot_data": mot_data,
                "last_year_mileage": 0
            })
        );
    }

    #[test]
    fn test_checked_envelope_key_order() {
        let mut vehicle = VehicleRecord::default();
        vehicle.insert(VehicleAttribute::RegistrationNumber, "XY34ZZZ".to_string());
        vehicle.insert(VehicleAttribute::Make, "FORD".to_string());
        let outcome = CheckOutcome::Checked(Extracted {
            vehicle,
            charged: ChargeDetermination::NotCharged,
        });

        let envelope = ResponseEnvelope::new("XY34ZZZ", outcome, json!([]), 4000);
        let body = envelope.to_body().unwrap();

        let expected = "{\n    \"registration-number\": \"XY34ZZZ\",\n    \"make\": \"FORD\",\n    \"vrn\": \"XY34ZZZ\",\n    \"charged\": false,\n    \"mot_data\": [],\n    \"last_year_mileage\": 4000\n}";
        assert_eq!(body, expected);
    }

    #[test]
    fn test_gateway_response_shape() {
        let response = GatewayResponse::json("{}".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": { "Content-Type": "application/json" },
                "body": "{}",
                "isBase64Encoded": false
            })
        );
    }

    #[test]
    fn test_handler_fails_fast_without_key() {
        let config = Config::default();
        assert!(matches!(
            Handler::new(config),
            Err(CheckerError::MissingApiKey)
        ));
    }
}
