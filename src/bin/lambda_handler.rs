//! AWS Lambda handler for year-end adjustment calculations
//!
//! Accepts an employee declaration as JSON and returns the computed
//! deduction statement together with validation findings.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

use nencho_system::statement::DeductionStatement;
use nencho_system::taxpayer::{validate_declaration, ValidationReport};
use nencho_system::{Declaration, DeductionEngine, DEFAULT_TARGET_YEAR};

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Target tax year for age determination (default: statutory filing year)
    #[serde(default = "default_target_year")]
    pub target_year: i32,

    /// The employee's declaration
    pub declaration: Declaration,
}

fn default_target_year() -> i32 {
    DEFAULT_TARGET_YEAR
}

/// Output from one calculation
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub target_year: i32,
    pub statement: DeductionStatement,
    pub total_deductions: u64,
    pub validation: ValidationReport,
    pub execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &CalculationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: CalculationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let validation = validate_declaration(&request.declaration, request.target_year);

    let engine = DeductionEngine::new(request.target_year);
    let statement = engine.compute(&request.declaration);
    let total_deductions = statement.total_deductions();

    let execution_time_ms = start.elapsed().as_millis() as u64;

    let response = CalculationResponse {
        target_year: request.target_year,
        statement,
        total_deductions,
        validation,
        execution_time_ms,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
