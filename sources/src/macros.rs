//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - plain GET, any credentials are already in the URL
///
#[macro_export]
macro_rules! http_get {
    ($client:ident, $url:ident) => {
        $client
            .get($url)
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .header("accept", "application/json")
            .send()
    };
}
