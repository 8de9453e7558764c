use ::once_cell::sync::Lazy;

use crate::utils::aliases::MaybeOwnedString;

/// Canonical YouTube video identifier, always exactly [`YoutubeId::LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YoutubeId(MaybeOwnedString);

impl YoutubeId {
    pub const LENGTH: usize = 11;

    pub fn new(candidate: impl Into<MaybeOwnedString>) -> Option<Self> {
        let candidate = candidate.into();

        (candidate.chars().count() == Self::LENGTH).then_some(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        let mut url = WATCH_ENDPOINT.clone();
        url.query_pairs_mut().append_pair("v", self.as_str());

        url.into()
    }
}

impl ::std::fmt::Display for YoutubeId {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for YoutubeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

const SHORT_LINK_MARKER: &str = "youtu.be/";
const WATCH_HOST_MARKER: &str = "youtube.com";

static FALLBACK_PATTERN: Lazy<::regex::Regex> = Lazy::new(|| {
    ::regex::Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
        .expect("Should be able to parse the fallback video id pattern")
});

static WATCH_ENDPOINT: Lazy<::url::Url> = Lazy::new(|| {
    ::url::Url::parse("https://www.youtube.com/watch").expect("Should be able to parse the watch endpoint")
});

static EMBED_ENDPOINT: Lazy<::url::Url> = Lazy::new(|| {
    ::url::Url::parse("https://www.youtube.com/embed/").expect("Should be able to parse the embed endpoint")
});

/// Extracts a video identifier from a share link, a watch link or a bare id.
///
/// Rules are tried in a fixed order and the first applicable one decides:
/// `youtu.be/` short links, then anything mentioning `youtube.com` (parsed as a
/// URL, `v` query parameter), then bare 11-character input, then a loose
/// pattern match. Whatever candidate comes out must be exactly 11 characters.
pub fn resolve(input: &str) -> Option<YoutubeId> {
    let candidate = if let Some((_, rest)) = input.split_once(SHORT_LINK_MARKER) {
        let segment = rest.split(SHORT_LINK_MARKER).next().unwrap_or_default();
        segment.split(['?', '&']).next().unwrap_or_default().to_owned()
    } else if input.contains(WATCH_HOST_MARKER) {
        let url = ::url::Url::parse(input).ok()?;

        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    } else if input.chars().count() == YoutubeId::LENGTH {
        input.to_owned()
    } else {
        FALLBACK_PATTERN
            .captures(input)
            .and_then(|captures| captures.get(1))
            .map(|capture| capture.as_str().to_owned())
            .unwrap_or_default()
    };

    YoutubeId::new(candidate)
}

const PLAYER_PARAMETERS: &[(&str, &str)] = &[
    ("playsinline", "1"),
    ("modestbranding", "1"),
    ("rel", "0"),
    ("origin", "https://www.youtube.com"),
    ("enablejsapi", "1"),
    ("autoplay", "0"),
    ("controls", "1"),
    ("showinfo", "0"),
    ("iv_load_policy", "3"),
    ("fs", "1"),
    ("hl", "en"),
    ("cc_load_policy", "0"),
    ("disablekb", "1"),
    ("mute", "0"),
    ("loop", "0"),
];

/// Iframe player source for `id`, with the identifier percent-encoded.
pub fn embed_url(id: &YoutubeId) -> String {
    let mut url = EMBED_ENDPOINT.clone();

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(id.as_str());
    }

    url.query_pairs_mut()
        .extend_pairs(PLAYER_PARAMETERS)
        .append_pair("playlist", id.as_str())
        .append_pair("widgetid", "1");

    url.into()
}

/// Standalone page hosting the inline iframe player for `id`.
pub fn build_embed_document(id: &YoutubeId) -> String {
    let source = embed_url(id).replace('&', "&amp;");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <style>
      body {{ margin: 0; background-color: black; }}
      .video-container {{ position: relative; width: 100%; height: 100vh; overflow: hidden; }}
      iframe {{ position: absolute; top: 0; left: 0; width: 100%; height: 100%; border: 0; }}
    </style>
  </head>
  <body>
    <div class="video-container">
      <iframe
        src="{source}"
        allow="accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share"
        allowfullscreen
        frameborder="0"
      ></iframe>
    </div>
  </body>
</html>
"#
    )
}
