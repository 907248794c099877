//! Markup stripping for scraped and API-provided text

/// Strip HTML tags and collapse line breaks into single spaces.
///
/// Text content of the stripped elements is kept. Entities that the HTML
/// serializer re-escapes are decoded again so extraction sees plain text.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let stripped = ammonia::Builder::empty().clean(text).to_string();

    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    decoded
        .replace("\r\n", " ")
        .replace('\n', " ")
        .trim()
        .to_string()
}
