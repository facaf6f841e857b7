use serde_json::Value;

use crate::error::Error;

/// Client for the homework-statuses endpoint. One GET per polling cycle;
/// retry on failure is the loop driver's job, not this client's.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            endpoint,
            token,
        }
    }

    /// Fetch the statuses of homeworks updated after `from_date` (unix
    /// seconds). Returns the parsed body as a generic JSON tree; shape
    /// validation happens downstream.
    pub async fn fetch_statuses(&self, from_date: i64) -> Result<Value, Error> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Transport(format!("код ответа {}", status.as_u16())));
        }

        tracing::debug!("API responded 200 OK");

        resp.json::<Value>()
            .await
            .map_err(|e| Error::Shape(format!("не удалось преобразовать тело в JSON: {e}")))
    }
}
