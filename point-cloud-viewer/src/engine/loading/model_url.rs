use thiserror::Error;

/// Asset source serving files by their path on the page's own origin.
pub const PAGE_ASSET_SOURCE: &str = "page";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelUrlError {
    #[error("model URL '{0}' is not on this page's origin")]
    CrossOrigin(String),

    #[error("model URL '{0}' points above the site root")]
    AboveRoot(String),

    #[error("model URL '{0}' names no file")]
    NoFile(String),
}

/// Where the hosting page was served from, as `location.origin` and
/// `location.pathname` report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub path: String,
}

impl PageLocation {
    /// Resolve a `data-model-path` URL the way the browser would for this
    /// page and return it as an asset path on the `page` source.
    ///
    /// Relative URLs resolve against the page's directory, `/` paths against
    /// the site root. Absolute URLs must share the page's origin. Query and
    /// fragment are dropped.
    pub fn model_asset_path(&self, url: &str) -> Result<String, ModelUrlError> {
        let trimmed = url.trim();
        let without_suffix = trimmed.split(['?', '#']).next().unwrap_or_default();

        let site_path = if without_suffix.starts_with("//") {
            return Err(ModelUrlError::CrossOrigin(trimmed.to_string()));
        } else if without_suffix.contains("://") {
            match without_suffix.strip_prefix(self.origin.as_str()) {
                Some(rest) if rest.starts_with('/') => rest.to_string(),
                _ => return Err(ModelUrlError::CrossOrigin(trimmed.to_string())),
            }
        } else if without_suffix.starts_with('/') {
            without_suffix.to_string()
        } else {
            let directory = match self.path.rfind('/') {
                Some(end) => &self.path[..=end],
                None => "/",
            };
            format!("{directory}{without_suffix}")
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in site_path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(ModelUrlError::AboveRoot(trimmed.to_string()));
                    }
                }
                name => segments.push(name),
            }
        }
        if segments.is_empty() || site_path.ends_with('/') {
            return Err(ModelUrlError::NoFile(trimmed.to_string()));
        }

        Ok(format!("{PAGE_ASSET_SOURCE}://{}", segments.join("/")))
    }
}
