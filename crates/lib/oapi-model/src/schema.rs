pub const SOURCE_KIND_REGISTRY: &str = "registry";
pub const SOURCE_KIND_URL: &str = "url";
pub const SOURCE_KIND_FOLDER: &str = "folder";

pub const PLACEHOLDER_TITLE: &str = "No title";
pub const PLACEHOLDER_VERSION: &str = "No version";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description";
pub const UNKNOWN_VERSION: &str = "unknown";

pub const NORMALIZED_PARAM: &str = "{id}";

pub const INCONSISTENCY_AUTHENTICATION: &str = "authentication";

/// HTTP verbs counted as operations under a path item.
pub const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"];

/// Returns the upper-cased verb when `key` names a recognized HTTP method.
pub fn recognized_method(key: &str) -> Option<&'static str> {
    HTTP_METHODS
        .iter()
        .copied()
        .find(|method| method.eq_ignore_ascii_case(key))
}

/// Qualifies a security scheme name with the spec that declares it.
pub fn make_scheme_key(spec_id: &str, scheme_name: &str) -> String {
    format!("{spec_id}: {scheme_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_method_ignores_case() {
        assert_eq!(recognized_method("get"), Some("GET"));
        assert_eq!(recognized_method("Patch"), Some("PATCH"));
        assert_eq!(recognized_method("parameters"), None);
        assert_eq!(recognized_method("trace"), None);
    }

    #[test]
    fn scheme_key_is_spec_qualified() {
        assert_eq!(make_scheme_key("petstore.json", "api_key"), "petstore.json: api_key");
    }
}
