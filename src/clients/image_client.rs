//! 图片搜索客户端（Pexels）
//!
//! 词典页面给单词配一张图，失败不影响查词

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    large: String,
}

/// 图片搜索客户端
pub struct ImageClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
}

impl ImageClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.pexels_api_key.clone(),
            api_base_url: config.pexels_api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 搜索第一张图片的 URL
    ///
    /// 未配置 API key 或没有结果时返回 `None`
    pub async fn search_image(&self, query: &str) -> AppResult<Option<String>> {
        if self.api_key.is_empty() {
            debug!("未配置图片搜索 API key，跳过");
            return Ok(None);
        }

        let response = self
            .http
            .get(format!("{}/search", self.api_base_url))
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("图片搜索返回错误状态: {}", response.status());
            return Ok(None);
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.photos.into_iter().next().map(|p| p.src.large))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_skips_request() {
        let client = ImageClient::new(&Config::default());
        let result = tokio_test::block_on(client.search_image("apple"));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_response_shape() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"photos": [{"id": 1, "src": {"large": "https://images.example/apple.jpg", "small": "x"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.photos[0].src.large, "https://images.example/apple.jpg");

        let empty: SearchResponse = serde_json::from_str(r#"{"total_results": 0}"#).unwrap();
        assert!(empty.photos.is_empty());
    }
}
