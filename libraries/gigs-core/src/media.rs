//! Media URL normalization.
//!
//! Uploaded files are stored server-side under a storage-relative path such
//! as `/uploads/profile_pictures/abc.png` and served beneath a known base
//! URL. Moving between the two forms is pure string prefixing/stripping.

/// Host of the placeholder image service used for missing avatars
pub const PLACEHOLDER_HOST: &str = "placehold.co";

/// Storage base location for uploaded media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBase {
    base_url: String,
}

impl MediaBase {
    /// Create a media base; trailing slashes are removed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// The normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Rewrite a storage-relative path into an absolute, loadable URL.
    ///
    /// Absolute URLs and empty input are returned unchanged.
    pub fn absolutize(&self, path: &str) -> String {
        if path.is_empty() || is_absolute(path) {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Strip the base URL from an absolute URL, yielding the storage form.
    ///
    /// URLs hosted elsewhere are returned unchanged.
    pub fn relativize(&self, url: &str) -> String {
        match url.strip_prefix(self.base_url.as_str()) {
            Some(rest) if rest.starts_with('/') && !self.base_url.is_empty() => rest.to_string(),
            _ => url.to_string(),
        }
    }
}

/// Whether `url` carries an `http://` or `https://` scheme
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether `url` points at the placeholder image service
pub fn is_placeholder(url: &str) -> bool {
    url.contains(PLACEHOLDER_HOST)
}
