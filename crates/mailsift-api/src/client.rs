use crate::{ApiError, Backend};
use async_trait::async_trait;
use mailsift_core::{
    BulkFeedbackOutcome, ConversationQuery, DashboardMetrics, DeepAnalysisSession, EmailDetail,
    EmailIdent, Filter, Mailbox, PromptAnswer, SearchHit, SearchRequest, SearchResponse, Theme,
    TodoItem,
};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// HTTP client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
    retry_gateway_timeout: bool,
}

impl HttpBackend {
    pub fn new(
        mut base: Url,
        timeout: Duration,
        retry_gateway_timeout: bool,
    ) -> Result<Self, ApiError> {
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base,
            retry_gateway_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.send(self.http.post(url).json(body)).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.send(self.http.put(url).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        self.send(self.http.delete(url)).await
    }

    /// Send a request, retrying a gateway timeout once, then map the three
    /// failure classes: transport, non-2xx status, and `{error}` in a 200.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let retry = request.try_clone();
        let mut response = request.send().await?;
        if response.status() == StatusCode::GATEWAY_TIMEOUT && self.retry_gateway_timeout {
            if let Some(again) = retry {
                tracing::warn!("gateway timeout, retrying once");
                response = again.send().await?;
            }
        }

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        if let Some(message) = backend_error(&value) {
            return Err(ApiError::Backend(message));
        }
        Ok(value)
    }
}

/// A 200 body carrying `{"error": ...}` is a failure like any other.
fn backend_error(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    if error.is_null() {
        return None;
    }
    Some(match error.as_str() {
        Some(text) => text.to_string(),
        None => error.to_string(),
    })
}

fn field<T: serde::de::DeserializeOwned + Default>(value: &Value, key: &str) -> Result<T, ApiError> {
    match value.get(key) {
        Some(inner) if !inner.is_null() => Ok(serde_json::from_value(inner.clone())?),
        _ => Ok(T::default()),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let body = serde_json::to_value(request)?;
        let value = self.post("api/search", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn email_detail(&self, ident: &EmailIdent) -> Result<EmailDetail, ApiError> {
        let value = match ident {
            EmailIdent::Index(index) => self.get("api/email", &[("index", index)]).await?,
            EmailIdent::MessageId(id) => {
                self.get(&format!("api/email/{id}"), &[]).await?
            }
        };
        Ok(serde_json::from_value(value)?)
    }

    async fn feedback(
        &self,
        query: &str,
        message_id: &str,
        is_relevant: bool,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "query": query,
            "message_id": message_id,
            "is_relevant": is_relevant,
        });
        self.post("api/feedback", &body).await?;
        Ok(())
    }

    async fn bulk_feedback(
        &self,
        query: &str,
        filter: &Filter,
    ) -> Result<BulkFeedbackOutcome, ApiError> {
        let body = serde_json::json!({ "query": query, "filter": filter });
        let value = self.post("api/bulk_feedback", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn filter_emails(
        &self,
        query: &str,
        filter: &Filter,
        page: u64,
        results_per_page: u64,
    ) -> Result<Vec<SearchHit>, ApiError> {
        let body = serde_json::json!({
            "query": query,
            "filter": filter,
            "page": page,
            "results_per_page": results_per_page,
        });
        let value = self.post("api/filter_emails", &body).await?;
        field(&value, "results")
    }

    async fn analyze_themes(&self, email_ids: &[String]) -> Result<Vec<Theme>, ApiError> {
        let body = serde_json::json!({ "email_ids": email_ids });
        let value = self.post("api/analyze_themes", &body).await?;
        field(&value, "themes")
    }

    async fn conversation_emails(
        &self,
        query: &ConversationQuery,
    ) -> Result<SearchResponse, ApiError> {
        let body = serde_json::to_value(query)?;
        let value = self.post("api/conversation_emails", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn deep_analysis_init(
        &self,
        theme_ids: &[String],
    ) -> Result<DeepAnalysisSession, ApiError> {
        let body = serde_json::json!({ "theme_ids": theme_ids });
        let value = self.post("api/deep_analysis_init", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn deep_analysis_prompt(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<PromptAnswer, ApiError> {
        let body = serde_json::json!({ "session_id": session_id, "prompt": prompt });
        let value = self.post("api/deep_analysis_prompt", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn deep_analysis_reset(&self, session_id: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "session_id": session_id });
        self.post("api/deep_analysis_reset", &body).await?;
        Ok(())
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        let value = self.get("api/dashboard/metrics", &[]).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
        let value = self.get("api/todos", &[]).await?;
        field(&value, "todos")
    }

    async fn create_todo(
        &self,
        title: &str,
        message_id: Option<&str>,
    ) -> Result<TodoItem, ApiError> {
        let body = serde_json::json!({ "title": title, "message_id": message_id });
        let value = self.post("api/todos", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn update_todo(&self, todo: &TodoItem) -> Result<TodoItem, ApiError> {
        let body = serde_json::to_value(todo)?;
        let value = self.put(&format!("api/todos/{}", todo.id), &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("api/todos/{id}")).await?;
        Ok(())
    }

    async fn list_mailboxes(&self) -> Result<Vec<Mailbox>, ApiError> {
        let value = self.get("api/mailboxes", &[]).await?;
        field(&value, "mailboxes")
    }

    async fn create_mailbox(&self, address: &str, provider: &str) -> Result<Mailbox, ApiError> {
        let body = serde_json::json!({ "address": address, "provider": provider });
        let value = self.post("api/mailboxes", &body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn delete_mailbox(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("api/mailboxes/{id}")).await?;
        Ok(())
    }

    async fn change_password(&self, current: &str, new: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "current_password": current,
            "new_password": new,
        });
        self.post("api/change_password", &body).await?;
        Ok(())
    }
}
