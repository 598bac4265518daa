//! Client for the hosted footprint model.
//!
//! A prediction is two calls: the API key is exchanged for a short-lived
//! bearer token, then the survey is posted to the deployment's scoring URL.
//! Nothing is retried.

use crate::config::Settings;
use crate::models::{MODEL_FIELDS, Survey};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Largest footprint (kg CO₂ per year) accepted from the model.
pub const MAX_FOOTPRINT: f64 = 100_000.0;

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Authentication failed: {0}")]
    AuthStatus(u16),
    #[error("Network error during authentication")]
    AuthNetwork(#[source] reqwest::Error),
    #[error("Invalid API key")]
    MissingToken,
    #[error("Prediction failed with status: {0}")]
    PredictionStatus(u16),
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Network error during prediction")]
    PredictionNetwork(#[source] reqwest::Error),
    #[error("Invalid response format from API")]
    MissingPredictions,
    #[error("No prediction values in response")]
    MissingValues,
    #[error("Invalid response format from prediction API")]
    MalformedValues,
    #[error("Invalid prediction result received")]
    OutOfRange,
}

#[derive(Clone)]
pub struct WatsonClient {
    client: Client,
    api_key: String,
    token_url: String,
    deployment_url: String,
    token_timeout: Duration,
    prediction_timeout: Duration,
}

impl WatsonClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            token_url: settings.token_url.clone(),
            deployment_url: settings.deployment_url.clone(),
            token_timeout: settings.token_timeout,
            prediction_timeout: settings.prediction_timeout,
        })
    }

    pub async fn fetch_token(&self) -> Result<String, PredictError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[("apikey", self.api_key.as_str()), ("grant_type", GRANT_TYPE)])
            .timeout(self.token_timeout)
            .send()
            .await
            .map_err(PredictError::AuthNetwork)?;

        if response.status() != StatusCode::OK {
            warn!("token endpoint answered {}", response.status());
            return Err(PredictError::AuthStatus(response.status().as_u16()));
        }

        // An undecodable body counts as a failed exchange, not a bad key.
        let body: Value = response.json().await.map_err(PredictError::AuthNetwork)?;
        body.get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(PredictError::MissingToken)
    }

    /// Annual footprint in kg CO₂ for one survey.
    pub async fn predict(&self, survey: &Survey) -> Result<f64, PredictError> {
        let token = self.fetch_token().await?;

        let response = self
            .client
            .post(&self.deployment_url)
            .bearer_auth(token)
            .json(&scoring_payload(survey))
            .timeout(self.prediction_timeout)
            .send()
            .await
            .map_err(classify_network)?;

        if response.status() != StatusCode::OK {
            warn!("scoring endpoint answered {}", response.status());
            return Err(PredictError::PredictionStatus(response.status().as_u16()));
        }

        let body: Value = response.json().await.map_err(classify_network)?;
        let footprint = parse_prediction(&body)?;
        info!(footprint, "prediction received");
        Ok(footprint)
    }
}

fn classify_network(err: reqwest::Error) -> PredictError {
    if err.is_timeout() {
        PredictError::Timeout
    } else {
        PredictError::PredictionNetwork(err)
    }
}

pub fn scoring_payload(survey: &Survey) -> Value {
    json!({
        "input_data": [
            {
                "fields": MODEL_FIELDS,
                "values": [survey.model_values()],
            }
        ]
    })
}

/// Pulls `predictions[0].values[0][0]` out of a scoring response.
pub fn parse_prediction(body: &Value) -> Result<f64, PredictError> {
    let predictions = body
        .get("predictions")
        .ok_or(PredictError::MissingPredictions)?
        .as_array()
        .ok_or(PredictError::MalformedValues)?;

    let values = predictions
        .first()
        .and_then(|first| first.get("values"))
        .ok_or(PredictError::MissingValues)?;

    let raw = values
        .get(0)
        .and_then(|row| row.get(0))
        .ok_or(PredictError::MalformedValues)?;

    let footprint = raw.as_f64().ok_or(PredictError::OutOfRange)?;
    if !(0.0..=MAX_FOOTPRINT).contains(&footprint) {
        return Err(PredictError::OutOfRange);
    }
    Ok(footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode as MockStatus, routing::post};

    #[test]
    fn payload_pairs_fields_with_values() {
        let payload = scoring_payload(&Survey::default());
        let block = &payload["input_data"][0];
        let fields = block["fields"].as_array().expect("fields");
        let values = block["values"][0].as_array().expect("values");
        assert_eq!(fields.len(), 19);
        assert_eq!(values.len(), 19);
        assert_eq!(fields[0], "Body Type");
        assert_eq!(values[0], "Thin");
        assert_eq!(fields[18], "Cooking_With");
        assert_eq!(values[18], "Gas");
    }

    #[test]
    fn parses_first_value() {
        let body = json!({ "predictions": [{ "fields": ["prediction"], "values": [[2875.5]] }] });
        assert_eq!(parse_prediction(&body).unwrap(), 2875.5);

        let body = json!({ "predictions": [{ "values": [[4000]] }] });
        assert_eq!(parse_prediction(&body).unwrap(), 4000.0);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            parse_prediction(&json!({ "results": [] })),
            Err(PredictError::MissingPredictions)
        ));
        assert!(matches!(
            parse_prediction(&json!({ "predictions": [] })),
            Err(PredictError::MissingValues)
        ));
        assert!(matches!(
            parse_prediction(&json!({ "predictions": [{ "fields": [] }] })),
            Err(PredictError::MissingValues)
        ));
        assert!(matches!(
            parse_prediction(&json!({ "predictions": [{ "values": [] }] })),
            Err(PredictError::MalformedValues)
        ));
    }

    #[test]
    fn rejects_out_of_range_results() {
        for raw in [json!(-1.0), json!(100_000.5), json!("1200"), json!(null)] {
            let body = json!({ "predictions": [{ "values": [[raw]] }] });
            let err = parse_prediction(&body).unwrap_err();
            assert_eq!(err.to_string(), "Invalid prediction result received");
        }
        let body = json!({ "predictions": [{ "values": [[100_000]] }] });
        assert_eq!(parse_prediction(&body).unwrap(), MAX_FOOTPRINT);
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn closed_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/token")
    }

    fn watson_client(token_url: String, deployment_url: String) -> WatsonClient {
        let settings = Settings {
            api_key: "key".to_string(),
            deployment_url,
            token_url,
            port: 0,
            session_ttl_minutes: 60,
            token_timeout: Duration::from_secs(5),
            prediction_timeout: Duration::from_millis(300),
        };
        WatsonClient::new(&settings).unwrap()
    }

    async fn token_error(router: Router) -> String {
        let base = serve(router).await;
        let client = watson_client(format!("{base}/token"), format!("{base}/score"));
        client.fetch_token().await.unwrap_err().to_string()
    }

    #[tokio::test]
    async fn token_status_is_reported() {
        let router = Router::new().route("/token", post(|| async { MockStatus::SERVICE_UNAVAILABLE }));
        assert_eq!(token_error(router).await, "Authentication failed: 503");
    }

    #[tokio::test]
    async fn token_without_access_token_is_invalid_key() {
        let router = Router::new().route("/token", post(|| async { Json(json!({ "nope": 1 })) }));
        assert_eq!(token_error(router).await, "Invalid API key");
    }

    #[tokio::test]
    async fn undecodable_token_body_is_network_error() {
        let router = Router::new().route("/token", post(|| async { "not json" }));
        assert_eq!(token_error(router).await, "Network error during authentication");
    }

    #[tokio::test]
    async fn unreachable_token_service_is_network_error() {
        let client = watson_client(closed_url(), closed_url());
        let err = client.fetch_token().await.unwrap_err();
        assert!(matches!(err, PredictError::AuthNetwork(_)));
        assert_eq!(err.to_string(), "Network error during authentication");
    }

    fn token_route() -> Router {
        Router::new().route("/token", post(|| async { Json(json!({ "access_token": "t" })) }))
    }

    #[tokio::test]
    async fn slow_scoring_times_out() {
        let router = token_route().route(
            "/score",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "predictions": [{ "values": [[1.0]] }] }))
            }),
        );
        let base = serve(router).await;
        let client = watson_client(format!("{base}/token"), format!("{base}/score"));
        let err = client.predict(&Survey::default()).await.unwrap_err();
        assert!(matches!(err, PredictError::Timeout));
        assert_eq!(err.to_string(), "Request timed out. Please try again.");
    }

    #[tokio::test]
    async fn scoring_failures_are_network_errors() {
        let router = token_route().route("/score", post(|| async { "<html>gateway</html>" }));
        let base = serve(router).await;
        let client = watson_client(format!("{base}/token"), format!("{base}/score"));
        let err = client.predict(&Survey::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error during prediction");

        let client = watson_client(format!("{base}/token"), closed_url());
        let err = client.predict(&Survey::default()).await.unwrap_err();
        assert!(matches!(err, PredictError::PredictionNetwork(_)));
    }
}
