//! Thin HTTP client for the recipe API.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

pub struct RecipeClient {
    http: Client,
    base: Url,
}

impl RecipeClient {
    /// `base` is the API mount point, e.g. `http://localhost:8080/api/recipes`.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("Invalid server URL: {base}"))?;
        if base.cannot_be_a_base() {
            bail!("Server URL cannot have path segments: {base}");
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub async fn list(&self) -> Result<Value> {
        self.send(self.http.get(self.url(&[]))).await
    }

    pub async fn by_cuisine(&self, cuisine: &str) -> Result<Value> {
        self.send(self.http.get(self.url(&["cuisine", cuisine])))
            .await
    }

    pub async fn top_rated(&self, limit: u32) -> Result<Value> {
        self.send(self.http.get(self.url(&["top", &limit.to_string()])))
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Value> {
        self.send(self.http.get(self.url(&["search", query]))).await
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        self.send(self.http.get(self.url(&[id]))).await
    }

    pub async fn create(&self, recipe: &Value) -> Result<Value> {
        self.send(self.http.post(self.url(&[""])).json(recipe)).await
    }

    pub async fn update(&self, id: &str, changes: &Value) -> Result<Value> {
        self.send(self.http.put(self.url(&[id])).json(changes)).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.send(self.http.delete(self.url(&[id]))).await
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Request failed")?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Server returned {status} with a non-JSON body"))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(anyhow!("Server returned {status}: {message}"));
        }

        Ok(body)
    }
}
