use ::async_trait::async_trait;
use ::domain::YoutubeId;
use ::use_cases::gateways::MetadataLookup;
use ::use_cases::models::descriptors::VideoMetadata;
use ::use_cases::models::errors::GatewayError;
use ::use_cases::models::errors::GatewayResult;

pub const YOUTUBE_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(::bon::Builder)]
#[builder(on(_, into))]
pub struct OembedLookup {
    endpoint: ::url::Url,

    #[builder(default)]
    client: ::reqwest::Client,
}

impl OembedLookup {
    fn request_url(&self, id: &YoutubeId) -> ::url::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &id.watch_url())
            .append_pair("format", "json");

        url
    }
}

#[derive(::serde::Deserialize)]
struct OembedBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl From<OembedBody> for VideoMetadata {
    fn from(body: OembedBody) -> Self {
        Self {
            title: body.title.map(Into::into),
            thumbnail_url: body.thumbnail_url.map(Into::into),
        }
    }
}

#[async_trait]
impl MetadataLookup for OembedLookup {
    async fn lookup(self: ::std::sync::Arc<Self>, id: YoutubeId) -> GatewayResult<VideoMetadata> {
        let response = self
            .client
            .get(self.request_url(&id))
            .send()
            .await
            .map_err(::anyhow::Error::from)?;

        let status = response.status();

        if !status.is_success() {
            return Err(GatewayError::Rejected { status: status.as_u16(), body: "".into() });
        }

        let body: OembedBody = response.json().await.map_err(::anyhow::Error::from)?;

        Ok(body.into())
    }
}
