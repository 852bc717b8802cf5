use reqwest::Url;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Converts a YouTube watch URL into its embeddable form.
///
/// `https://www.youtube.com/watch?v=XXX` becomes `https://www.youtube.com/embed/XXX`.
/// Anything without a `v` parameter is returned unchanged.
pub fn youtube_embed_url(youtube_url: &str) -> String {
    let video_id = Url::parse(youtube_url).ok().and_then(|url| {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    });

    match video_id {
        Some(id) if !id.is_empty() => format!("{}{}", YOUTUBE_EMBED_BASE, id),
        _ => youtube_url.to_string(),
    }
}
