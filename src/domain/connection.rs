// Connection to a Simple JSON datasource

/// Base URL of a datasource. Immutable and freely shared between calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    url: String,
}

impl Connection {
    pub fn new<S: Into<String>>(url: S) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Full request URL for an endpoint path such as `/search`
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

impl From<&str> for Connection {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Connection {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
