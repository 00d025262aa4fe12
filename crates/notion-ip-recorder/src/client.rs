// # Notion API client
//
// Thin wrapper over the three endpoints notion-ip uses:
//
// - List children: GET `/blocks/:page_id/children?page_size=100`
// - Append children: PATCH `/blocks/:page_id/children`
// - Update page: PATCH `/pages/:page_id`
//
// Every request carries the bearer token, the pinned `Notion-Version`
// header and a JSON content type. The token never appears in logs or in
// `Debug` output.

use notion_ip_core::{Error, IpRecord, NotionConfig, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::collections::HashSet;

use crate::model::{AppendChildren, BlockList, NotionErrorResponse, PageUpdate};

/// Pinned API version
pub const NOTION_VERSION: &str = "2022-06-28";

/// Blocks requested per listing page (API maximum)
pub const PAGE_SIZE: u32 = 100;

/// Upper bound on listing requests made by one `fetch_latest`
pub const MAX_PAGES: usize = 50;

/// Notion API client bound to one page
pub struct NotionClient {
    /// Integration token
    /// ⚠️ NEVER log this value
    token: String,
    api_url: String,
    page_id: String,
    title_property: String,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the token
impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("token", &"<REDACTED>")
            .field("api_url", &self.api_url)
            .field("page_id", &self.page_id)
            .field("title_property", &self.title_property)
            .finish()
    }
}

impl NotionClient {
    /// Create a client for the page described by `config`
    pub fn new(config: &NotionConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            token: config.token.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            page_id: config.page_id.clone(),
            title_property: config.title_property.clone(),
            client,
        })
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn title_property(&self) -> &str {
        &self.title_property
    }

    fn children_url(&self) -> String {
        format!("{}/blocks/{}/children", self.api_url, self.page_id)
    }

    fn page_url(&self) -> String {
        format!("{}/pages/{}", self.api_url, self.page_id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Fetch one page of the page's child blocks
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /blocks/:page_id/children?page_size=100[&start_cursor=...]
    /// ```
    pub async fn list_children(&self, cursor: Option<&str>) -> Result<BlockList> {
        let url = format!("{}?page_size={}", self.children_url(), PAGE_SIZE);
        let mut request = self.request(Method::GET, &url);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to execute request to fetch latest IP");
            Error::notion_read(format!("HTTP request failed: {e}"))
        })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            tracing::error!(status_code = status.as_u16(), "Non-OK HTTP status when fetching latest IP");
            return Err(Error::notion_read(failure_message(
                "failed to fetch latest IP from Notion",
                response,
            )
            .await));
        }

        response.json::<BlockList>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to decode Notion response for latest IP");
            Error::notion_read(format!("Failed to parse response: {e}"))
        })
    }

    /// Most recent IP record on the page.
    ///
    /// Follows `next_cursor` until the listing is exhausted, so one call may
    /// issue several requests; the newest paragraph that parses as a record
    /// wins. Paging stops early on a repeated cursor or after [`MAX_PAGES`]
    /// requests.
    ///
    /// # Returns
    ///
    /// - `Ok(IpRecord)`: The newest record
    /// - `Err(Error::NotFound)`: No paragraph holds a record
    /// - `Err(Error::NotionRead)`: The listing request failed
    pub async fn fetch_latest(&self) -> Result<IpRecord> {
        let mut latest = None;
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();

        for page in 1..=MAX_PAGES {
            let list = self.list_children(cursor.as_deref()).await?;

            if let Some(record) = newest_record(&list) {
                latest = Some(record);
            }

            match (list.has_more, list.next_cursor) {
                (true, Some(next)) if !seen.insert(next.clone()) => {
                    tracing::warn!(cursor = %next, "Notion returned a repeated cursor, stopping");
                    break;
                }
                (true, Some(_)) if page == MAX_PAGES => {
                    tracing::warn!(pages = MAX_PAGES, "Notion listing exceeds page limit, stopping");
                }
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        latest.ok_or_else(|| Error::not_found("no valid IP address found in Notion page"))
    }

    /// Append a paragraph holding `record` to the page. Success is exactly 200.
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /blocks/:page_id/children
    /// {"children":[{"object":"block","type":"paragraph","paragraph":{"rich_text":[...]}}]}
    /// ```
    pub async fn append(&self, record: &IpRecord) -> Result<()> {
        let payload = AppendChildren::paragraph(record.to_content());
        let response = self
            .send_json(Method::PATCH, &self.children_url(), &payload)
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let message =
                failure_message("failed to append new IP to Notion page", response).await;
            tracing::error!(status_code = status.as_u16(), error = %message, "Non-OK HTTP status when appending new IP");
            return Err(Error::notion_write(message));
        }

        tracing::info!(ip = %record.ip, "Successfully appended new IP to Notion page");
        Ok(())
    }

    /// Set the title property to `content`. Success is any 2xx.
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /pages/:page_id
    /// {"properties":{"Title":[{"text":{"content":"Current IP: 1.2.3.4"}}]}}
    /// ```
    pub async fn update_title(&self, content: &str) -> Result<()> {
        let payload = PageUpdate::title(&self.title_property, content);
        let response = self
            .send_json(Method::PATCH, &self.page_url(), &payload)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = failure_message("failed to update Notion page", response).await;
            tracing::error!(status_code = status.as_u16(), error = %message, "Non-2xx HTTP status when updating page");
            return Err(Error::notion_write(message));
        }

        tracing::info!(content, "Successfully updated Notion page title");
        Ok(())
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        payload: &T,
    ) -> Result<Response> {
        self.request(method, url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to execute request to Notion");
                Error::notion_write(format!("HTTP request failed: {e}"))
            })
    }
}

/// Newest record in one listing page (results are oldest first)
pub fn newest_record(list: &BlockList) -> Option<IpRecord> {
    list.results
        .iter()
        .rev()
        .filter_map(|block| block.paragraph_text())
        .find_map(|text| IpRecord::parse(&text))
}

/// Failure description for a non-success response.
///
/// Uses the API's `message` when the body is a Notion error object, and
/// `generic` with the status code otherwise.
async fn failure_message(generic: &str, response: Response) -> String {
    let status = response.status().as_u16();
    match response.json::<NotionErrorResponse>().await {
        Ok(body) if !body.message.is_empty() => {
            if body.code.is_empty() {
                format!("status {status}: {}", body.message)
            } else {
                format!("status {status}: {} ({})", body.message, body.code)
            }
        }
        _ => format!("{generic} (status {status})"),
    }
}
