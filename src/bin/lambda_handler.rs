//! AWS Lambda handler for factor table lookups
//!
//! Routes:
//! - `GET /api/rates`: available interest rates
//! - `POST /api/lookup`: one factor value for `{rate, factor_type, period}`
//!
//! Supports Lambda Function URLs for direct HTTP access. The table is loaded on
//! the first request and reused for the lifetime of the execution environment.

use factor_tables::{api, CsvFileSource, FactorLookup, ServiceConfig};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::info;

fn json_response(response: &api::ApiResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(response.status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(response.body.to_string()))?)
}

fn preflight_response() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Empty)?)
}

/// Lambda handler function
fn handler(service: &FactorLookup<CsvFileSource>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = event.uri().path().trim_end_matches('/');

    let response = match (method, path) {
        ("OPTIONS", _) => return preflight_response(),
        ("GET", "/api/rates") => api::rates(service),
        ("POST", "/api/lookup") => {
            let body_str = match event.body() {
                Body::Text(s) => s.clone(),
                Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
                Body::Empty => "{}".to_string(),
            };
            api::lookup(service, &body_str)
        }
        (_, "/api/rates") | (_, "/api/lookup") => api::ApiResponse::error(405, "Method not allowed"),
        _ => api::ApiResponse::error(404, format!("No route for {}", path)),
    };

    info!("{} {} -> {}", method, path, response.status);
    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = ServiceConfig::from_env();
    info!("Serving factor table from {}", config.table_path.display());
    let service = FactorLookup::new(config.source());

    let shared = &service;
    run(service_fn(move |event: Request| async move { handler(shared, event) })).await
}
