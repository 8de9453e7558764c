use ::async_trait::async_trait;
use ::domain::Folder;
use ::domain::FolderId;
use ::domain::Video;
use ::domain::VideoId;
use ::use_cases::gateways::Authenticator;
use ::use_cases::gateways::CatalogRepository;
use ::use_cases::models::descriptors::Credentials;
use ::use_cases::models::descriptors::FolderDraft;
use ::use_cases::models::descriptors::VideoDraft;
use ::use_cases::models::errors::GatewayError;
use ::use_cases::models::errors::GatewayResult;
use ::use_cases::models::state::Token;

use crate::utils::aliases::Fallible;
use crate::utils::extensions::OptionExt;

/// Client for the catalog REST API.
///
/// Reads are anonymous. Writes carry `Authorization: Token <token>`.
#[derive(::bon::Builder)]
#[builder(on(_, into))]
pub struct RestApiClient {
    base_url: ::url::Url,

    #[builder(default)]
    client: ::reqwest::Client,
}

impl RestApiClient {
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Fallible<::url::Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .ok()
            .ok()?
            .pop_if_empty()
            .push("api")
            .extend(segments);

        Ok(url)
    }

    /// `DELETE` targets end in a slash, e.g. `/api/folders/3/`.
    fn item_endpoint(&self, collection: &str, id: u64) -> Fallible<::url::Url> {
        self.endpoint([collection, &id.to_string(), ""])
    }

    async fn get<T>(&self, collection: &str) -> GatewayResult<T>
    where
        T: ::serde::de::DeserializeOwned,
    {
        let url = self.endpoint([collection])?;
        let response = execute(self.client.get(url)).await?;

        Ok(response.json().await.map_err(::anyhow::Error::from)?)
    }

    async fn post_authorized<Body>(&self, collection: &str, body: &Body, token: &Token) -> GatewayResult<()>
    where
        Body: ::serde::Serialize + Sync,
    {
        let url = self.endpoint([collection])?;
        execute(authorized(self.client.post(url), token).json(body)).await?;

        Ok(())
    }

    async fn delete_authorized(&self, collection: &str, id: u64, token: &Token) -> GatewayResult<()> {
        let url = self.item_endpoint(collection, id)?;
        execute(authorized(self.client.delete(url), token)).await?;

        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for RestApiClient {
    async fn get_folders(self: ::std::sync::Arc<Self>) -> GatewayResult<Vec<Folder>> {
        self.get("folders").await
    }

    async fn get_videos(self: ::std::sync::Arc<Self>) -> GatewayResult<Vec<Video>> {
        self.get("videos").await
    }

    async fn insert_folder(self: ::std::sync::Arc<Self>, draft: FolderDraft, token: Token) -> GatewayResult<()> {
        let body = FolderBody { name: &draft.name, parent: draft.parent };

        self.post_authorized("folders", &body, &token).await
    }

    async fn delete_folder(self: ::std::sync::Arc<Self>, id: FolderId, token: Token) -> GatewayResult<()> {
        self.delete_authorized("folders", id, &token).await
    }

    async fn insert_video(self: ::std::sync::Arc<Self>, draft: VideoDraft, token: Token) -> GatewayResult<()> {
        let body = VideoBody {
            title: &draft.title,
            youtube_url: &draft.youtube_url,
            folder: draft.folder,
        };

        self.post_authorized("videos", &body, &token).await
    }

    async fn delete_video(self: ::std::sync::Arc<Self>, id: VideoId, token: Token) -> GatewayResult<()> {
        self.delete_authorized("videos", id, &token).await
    }
}

#[async_trait]
impl Authenticator for RestApiClient {
    async fn login(self: ::std::sync::Arc<Self>, credentials: Credentials) -> GatewayResult<Token> {
        let url = self.endpoint(["login"])?;
        let body = CredentialsBody::from(&credentials);

        let response = execute(self.client.post(url).json(&body)).await?;
        let TokenBody { token } = response.json().await.map_err(::anyhow::Error::from)?;

        Ok(token.into())
    }

    async fn register(self: ::std::sync::Arc<Self>, credentials: Credentials) -> GatewayResult<()> {
        let url = self.endpoint(["register"])?;
        let body = CredentialsBody::from(&credentials);

        execute(self.client.post(url).json(&body)).await?;

        Ok(())
    }
}

#[derive(::serde::Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
        }
    }
}

#[derive(::serde::Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(::serde::Serialize)]
struct FolderBody<'a> {
    name: &'a str,
    parent: Option<FolderId>,
}

#[derive(::serde::Serialize)]
struct VideoBody<'a> {
    title: &'a str,
    youtube_url: &'a str,
    folder: Option<FolderId>,
}

fn authorized(request: ::reqwest::RequestBuilder, token: &Token) -> ::reqwest::RequestBuilder {
    request.header(::reqwest::header::AUTHORIZATION, format!("Token {}", token))
}

/// Sends `request`, turning any non-2xx answer into [`GatewayError::Rejected`].
async fn execute(request: ::reqwest::RequestBuilder) -> GatewayResult<::reqwest::Response> {
    let response = request.send().await.map_err(::anyhow::Error::from)?;
    let status = response.status();

    ::tracing::debug!(url = %response.url(), %status, "api responded");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(GatewayError::Rejected {
        status: status.as_u16(),
        body: explain_rejection(&body).into(),
    })
}

/// Renders a rejection body the way a person would want to read it.
///
/// Validation errors arrive as `{"field": ["message", ...]}` objects; their values are
/// listed one per line. Anything that isn't a JSON object is passed through trimmed.
fn explain_rejection(body: &str) -> String {
    fn render(value: &::serde_json::Value) -> String {
        match value {
            ::serde_json::Value::String(string) => string.clone(),
            ::serde_json::Value::Array(values) => values.iter().map(render).collect::<Vec<_>>().join(","),
            value => value.to_string(),
        }
    }

    match ::serde_json::from_str::<::serde_json::Value>(body) {
        Ok(::serde_json::Value::Object(fields)) => fields.values().map(render).collect::<Vec<_>>().join("\n"),
        Ok(::serde_json::Value::String(string)) => string,
        _ => body.trim().to_owned(),
    }
}
