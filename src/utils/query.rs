/// Appends `pairs` to `endpoint` as a form-encoded query string. No `?` is
/// added when there is nothing to send.
pub fn with_query(endpoint: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return endpoint.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", endpoint, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pairs_leave_endpoint_alone() {
        assert_eq!(with_query("/candidates", &[]), "/candidates");
    }

    #[test]
    fn encodes_like_a_browser_form() {
        assert_eq!(
            with_query(
                "/candidates",
                &[("status", "approved".into()), ("search", "ann lee&co".into())]
            ),
            "/candidates?status=approved&search=ann+lee%26co"
        );
    }
}
