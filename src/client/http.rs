//! Thin reqwest-backed implementations of the platform client capabilities.
//!
//! These speak the public web endpoints directly. They are deliberately
//! minimal: the harvesting pipeline treats them as opaque services, and all
//! adapter logic is tested against mock implementations of the traits.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::client::instagram::{IgMedia, IgResource, InstagramClient};
use crate::client::tiktok::{TikTokClient, TtFeed};
use crate::error::{Error, Result};
use crate::post::MediaTypeField;

const IG_BASE: &str = "https://www.instagram.com";
const TT_BASE: &str = "https://www.tiktok.com";

/// App id the Instagram web client sends with API requests.
const IG_APP_ID: &str = "936619743392459";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Instagram web API client with a cookie-backed session.
pub struct HttpInstagramClient {
    client: Client,
}

impl HttpInstagramClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the login page and pull the csrf token out of the bootstrap
    /// payload.
    async fn fetch_csrf_token(&self) -> Result<String> {
        let body = self
            .client
            .get(format!("{}/accounts/login/", IG_BASE))
            .send()
            .await?
            .text()
            .await?;

        let pattern = Regex::new(r#""csrf_token":"([^"]+)""#).unwrap();
        pattern
            .captures(&body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::Authentication("csrf token not found in login page".into()))
    }

    async fn post_login(&self, username: &str, password: &str, csrf: &str) -> Result<()> {
        let enc_password = format!("#PWD_INSTAGRAM_BROWSER:0:0:{}", password);
        let response = self
            .client
            .post(format!("{}/accounts/login/ajax/", IG_BASE))
            .header("x-csrftoken", csrf)
            .header("x-ig-app-id", IG_APP_ID)
            .form(&[("username", username), ("enc_password", &enc_password)])
            .send()
            .await?;

        let status = response.status();
        let json: Value = response.json().await?;
        tracing::debug!("Login response status {}: {}", status, json);

        if json["authenticated"].as_bool() == Some(true) {
            Ok(())
        } else {
            Err(Error::Authentication(format!(
                "login rejected (HTTP {})",
                status
            )))
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}{}", IG_BASE, path))
            .header("x-ig-app-id", IG_APP_ID)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedShape(format!(
                "GET {} returned HTTP {}",
                path, status
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl InstagramClient for HttpInstagramClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let csrf = self.fetch_csrf_token().await?;
        self.post_login(username, password, &csrf).await
    }

    async fn login_with_session(
        &self,
        username: &str,
        password: &str,
        session_id: &str,
    ) -> Result<()> {
        // Validate the saved session by hitting an authenticated endpoint
        // with the session cookie attached.
        let response = self
            .client
            .get(format!("{}/api/v1/accounts/current_user/", IG_BASE))
            .header("x-ig-app-id", IG_APP_ID)
            .header("cookie", format!("sessionid={}", session_id))
            .send()
            .await?;

        if response.status().is_success() {
            let _ = (username, password);
            return Ok(());
        }

        Err(Error::Authentication(format!(
            "saved session rejected (HTTP {})",
            response.status()
        )))
    }

    async fn user_id_from_username(&self, handle: &str) -> Result<String> {
        let json = self
            .get_json(&format!(
                "/api/v1/users/web_profile_info/?username={}",
                handle
            ))
            .await?;

        json["data"]["user"]["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Lookup {
                handle: handle.to_string(),
                message: "user id missing from profile response".into(),
            })
    }

    async fn user_medias(&self, user_id: &str, amount: usize) -> Result<Vec<IgMedia>> {
        let json = self
            .get_json(&format!("/api/v1/feed/user/{}/?count={}", user_id, amount))
            .await?;

        let items = json["items"]
            .as_array()
            .ok_or_else(|| Error::UnexpectedShape("feed response missing items".into()))?;

        Ok(items.iter().take(amount).filter_map(parse_feed_item).collect())
    }
}

/// Map one raw feed item into the client contract shape. Items without an
/// id or code are unusable and dropped here.
fn parse_feed_item(item: &Value) -> Option<IgMedia> {
    let id = item["pk"]
        .as_str()
        .map(str::to_string)
        .or_else(|| item["pk"].as_i64().map(|n| n.to_string()))?;
    let code = item["code"].as_str()?.to_string();

    Some(IgMedia {
        id,
        code,
        taken_at: item["taken_at"]
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        caption_text: item["caption"]["text"].as_str().map(str::to_string),
        like_count: item["like_count"].as_u64(),
        comment_count: item["comment_count"].as_u64(),
        media_type: parse_media_type(&item["media_type"]),
        thumbnail_url: item["image_versions2"]["candidates"][0]["url"]
            .as_str()
            .map(str::to_string),
        video_url: item["video_versions"][0]["url"].as_str().map(str::to_string),
        resources: item["carousel_media"]
            .as_array()
            .map(|children| {
                children
                    .iter()
                    .map(|child| IgResource {
                        media_type: parse_media_type(&child["media_type"]),
                        thumbnail_url: child["image_versions2"]["candidates"][0]["url"]
                            .as_str()
                            .map(str::to_string),
                        video_url: child["video_versions"][0]["url"]
                            .as_str()
                            .map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn parse_media_type(value: &Value) -> Option<MediaTypeField> {
    match value {
        Value::Number(n) => n.as_i64().map(MediaTypeField::Code),
        Value::String(s) => Some(MediaTypeField::Name(s.clone())),
        _ => None,
    }
}

/// TikTok web API client. The HTTP client is rebuilt on every
/// `open_session` because the proxy can only be set at construction time.
pub struct HttpTikTokClient {
    session: RwLock<Option<Client>>,
}

impl HttpTikTokClient {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
        }
    }

    async fn session_client(&self) -> Result<Client> {
        self.session
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::Authentication("TikTok session not opened".into()))
    }
}

impl Default for HttpTikTokClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TikTokClient for HttpTikTokClient {
    async fn open_session(&self, proxy: Option<&str>) -> Result<()> {
        let mut builder = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .cookie_store(true);

        if let Some(uri) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(uri)?);
        }

        let client = builder.build()?;

        // Prime cookies so subsequent API calls carry a device session.
        client.get(TT_BASE).send().await?;

        *self.session.write().await = Some(client);
        Ok(())
    }

    async fn resolve_sec_uid(&self, handle: &str) -> Result<Option<String>> {
        let client = self.session_client().await?;
        let body = client
            .get(format!("{}/@{}", TT_BASE, handle))
            .send()
            .await?
            .text()
            .await?;

        let pattern = Regex::new(r#""secUid":"([^"]+)""#).unwrap();
        Ok(pattern
            .captures(&body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()))
    }

    async fn user_feed(&self, sec_uid: &str, count: usize) -> Result<TtFeed> {
        let client = self.session_client().await?;
        let response = client
            .get(format!("{}/api/post/item_list/", TT_BASE))
            .query(&[
                ("secUid", sec_uid),
                ("count", &count.to_string()),
                ("cursor", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedShape(format!(
                "item list returned HTTP {}",
                status
            )));
        }

        Ok(response.json().await?)
    }
}
