//! Output file naming. Everything that needs to know where a resolved URL
//! lands on disk, or whether it is already there, goes through here.

use std::path::{Path, PathBuf};
use url::Url;

use super::FetchError;

/// Where a resolved document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub file_name: String,
    pub path: PathBuf,
}

impl OutputTarget {
    pub fn for_url(url: &str, output_dir: &Path) -> Result<Self, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let file_name =
            output_file_name(&parsed).ok_or_else(|| FetchError::NoFileName(url.to_string()))?;
        let path = output_dir.join(&file_name);

        Ok(Self { file_name, path })
    }

    pub fn exists(&self) -> bool {
        is_downloaded(&self.path)
    }
}

/// Last path segment of `url`, percent-decoded, with a `.pdf` suffix forced.
pub fn output_file_name(url: &Url) -> Option<String> {
    let last = url.path().trim_end_matches('/').rsplit('/').next()?;
    let decoded = urlencoding::decode(last).ok()?;

    if decoded.is_empty()
        || decoded == "."
        || decoded == ".."
        || decoded.contains(['/', '\\', '\0'])
    {
        return None;
    }

    let mut name = decoded.into_owned();
    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    Some(name)
}

/// A regular file at `path` marks the document as downloaded.
pub fn is_downloaded(path: &Path) -> bool {
    path.is_file()
}
