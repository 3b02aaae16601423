/// Base endpoint of the Dialogflow v1 REST API.
pub const BASE_URL: &str = "https://api.dialogflow.com/v1";

/// Protocol version sent as `v=` on every request.
///
/// See <https://dialogflow.com/docs/reference/agent/#protocol_version>.
pub const PROTOCOL_VERSION: &str = "20150910";

/// Name of the query parameter carrying [`PROTOCOL_VERSION`].
pub(crate) const VERSION_PARAM: &str = "v";

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Formats the `Authorization` header value for a bearer token.
pub(crate) fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

/// Joins a relative resource path onto the base endpoint.
///
/// Exactly one `/` separates the two regardless of trailing or leading slashes.
/// The protocol version is added separately as a query parameter.
pub(crate) fn construct_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encodes a caller-supplied id or name for use as a path segment.
pub(crate) fn path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
