use super::dto::{
    ActionAck, ApiErrorBody, MediaActionBody, ReportActionBody, ReportEnvelope,
};
use super::traits::ModerationBackend;
use crate::domain::report::{
    action::MediaActionCode, entity::MediaType, errors::ModerationError,
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpModerationBackend {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpModerationBackend {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModerationError> {
        // Url::join replaces the last path segment unless the base ends in '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|e| {
            ModerationError::InvalidRequest(format!("invalid moderation API url: {}", e))
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ModerationError> {
        self.base_url
            .join(path)
            .map_err(|e| ModerationError::InvalidRequest(format!("invalid endpoint {}: {}", path, e)))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn post_action<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ActionAck, ModerationError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST moderation action");
        let resp = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        let bytes = ensure_success(resp).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ActionAck::default());
        }
        decode(&bytes)
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ModerationError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    warn!(status = status.as_u16(), %message, "moderation API returned an error");
    Err(ModerationError::Api {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ModerationError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[async_trait]
impl ModerationBackend for HttpModerationBackend {
    async fn fetch_reported_media(
        &self,
        media_type: MediaType,
        page: u32,
        limit: u32,
    ) -> Result<ReportEnvelope, ModerationError> {
        let mut url = self.endpoint("reported-media")?;
        url.query_pairs_mut()
            .append_pair("reported_media_type", media_type.as_str())
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        debug!(%url, "GET reported media");
        let resp = self.authorize(self.client.get(url)).send().await?;
        let bytes = ensure_success(resp).await?.bytes().await?;
        decode(&bytes)
    }

    async fn suspend_report(&self, report_id: &str) -> Result<ActionAck, ModerationError> {
        self.post_action("suspend-report", &ReportActionBody { report_id })
            .await
    }

    async fn delete_report(&self, report_id: &str) -> Result<ActionAck, ModerationError> {
        self.post_action("delete-report", &ReportActionBody { report_id })
            .await
    }

    async fn escalate_report(&self, report_id: &str) -> Result<ActionAck, ModerationError> {
        self.post_action("escalate-report", &ReportActionBody { report_id })
            .await
    }

    async fn set_media_action(
        &self,
        report_id: &str,
        action: MediaActionCode,
    ) -> Result<ActionAck, ModerationError> {
        self.post_action(
            "suspend-media",
            &MediaActionBody {
                report_id,
                action_type: action.code(),
            },
        )
        .await
    }
}
