use async_trait::async_trait;
use regex::Regex;
use url::Url;

use super::{Resolution, ResolveError, Resolver};
use crate::config::StorageConfig;

pub const DEFAULT_STORAGE_DOMAIN: &str = "documentcloud.org";
pub const DEFAULT_STORAGE_HOST: &str = "s3.documentcloud.org";

/// Rewrites `<domain>/documents/<id>-<slug>` references into
/// `https://<host>/documents/<id>/<slug>.pdf` without any network access.
#[derive(Debug, Clone)]
pub struct PatternResolver {
    storage_host: String,
    document_re: Regex,
}

impl PatternResolver {
    pub fn new(storage_domain: &str, storage_host: &str) -> Result<Self, regex::Error> {
        let document_re = Regex::new(&format!(
            r"{}/documents/([0-9]+)-([a-zA-Z0-9_\-]+)",
            regex::escape(storage_domain)
        ))?;

        Ok(Self {
            storage_host: storage_host.to_string(),
            document_re,
        })
    }

    pub fn from_config(storage: &StorageConfig) -> Result<Self, regex::Error> {
        Self::new(&storage.domain, &storage.host)
    }

    /// Returns the storage URL for `candidate`, or `None` when it is not a
    /// recognizable document reference.
    ///
    /// Scheme-less references such as `www.documentcloud.org/documents/1-a`
    /// or `//www.documentcloud.org/documents/1-a` skip the storage host check
    /// and go straight to the document pattern.
    pub fn resolve_url(&self, candidate: &str) -> Option<String> {
        match Url::parse(candidate) {
            Ok(parsed) => {
                if parsed
                    .host_str()
                    .is_some_and(|host| host.contains(&self.storage_host))
                {
                    return Some(candidate.to_string());
                }
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {}
            Err(_) => return None,
        }

        let captures = self.document_re.captures(candidate)?;
        let doc_id = captures.get(1)?.as_str();
        let slug = captures.get(2)?.as_str();

        Some(format!(
            "https://{}/documents/{}/{}.pdf",
            self.storage_host, doc_id, slug
        ))
    }
}

impl Default for PatternResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_DOMAIN, DEFAULT_STORAGE_HOST)
            .expect("Failed to compile default document pattern")
    }
}

#[async_trait]
impl Resolver for PatternResolver {
    async fn resolve(&self, candidate: &str) -> Result<Resolution, ResolveError> {
        self.resolve_url(candidate)
            .map(Resolution::Located)
            .ok_or_else(|| ResolveError::Unrecognized(candidate.to_string()))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_document_page_to_storage_url() {
        let resolver = PatternResolver::default();

        let resolved = resolver.resolve_url(
            "https://www.documentcloud.org/documents/23461534-200301254_redactedclosingreport_redacted",
        );
        assert_eq!(
            resolved.as_deref(),
            Some(
                "https://s3.documentcloud.org/documents/23461534/200301254_redactedclosingreport_redacted.pdf"
            )
        );
    }

    #[test]
    fn test_storage_urls_are_returned_unchanged() {
        let resolver = PatternResolver::default();

        let url = "https://s3.documentcloud.org/documents/1/a.pdf";
        assert_eq!(resolver.resolve_url(url).as_deref(), Some(url));

        // Anything on the storage host counts, even without the usual layout
        let odd = "https://s3.documentcloud.org/whatever?x=1";
        assert_eq!(resolver.resolve_url(odd).as_deref(), Some(odd));
    }

    #[test]
    fn test_any_host_under_the_domain_matches() {
        let resolver = PatternResolver::default();

        let resolved =
            resolver.resolve_url("https://beta.documentcloud.org/documents/42-use-of-force-report");
        assert_eq!(
            resolved.as_deref(),
            Some("https://s3.documentcloud.org/documents/42/use-of-force-report.pdf")
        );

        // Trailing path and query after the slug are ignored
        let resolved = resolver
            .resolve_url("https://www.documentcloud.org/documents/7-memo.html?embed=true#p2");
        assert_eq!(
            resolved.as_deref(),
            Some("https://s3.documentcloud.org/documents/7/memo.pdf")
        );
    }

    #[test]
    fn test_scheme_less_references_resolve() {
        let resolver = PatternResolver::default();
        let expected = Some("https://s3.documentcloud.org/documents/23461534/slug.pdf");

        assert_eq!(
            resolver
                .resolve_url("www.documentcloud.org/documents/23461534-slug")
                .as_deref(),
            expected
        );
        assert_eq!(
            resolver
                .resolve_url("//www.documentcloud.org/documents/23461534-slug")
                .as_deref(),
            expected
        );
        assert_eq!(resolver.resolve_url("www.example.com/documents/1-a"), None);
    }

    #[test]
    fn test_malformed_absolute_urls_are_unresolved() {
        let resolver = PatternResolver::default();

        // Bad port: the pattern is present but the URL itself is broken
        assert_eq!(
            resolver.resolve_url("https://www.documentcloud.org:99999/documents/1-a"),
            None
        );
    }

    #[test]
    fn test_unrecognized_candidates() {
        let resolver = PatternResolver::default();

        assert_eq!(resolver.resolve_url("not a url at all"), None);
        assert_eq!(resolver.resolve_url(""), None);
        assert_eq!(resolver.resolve_url("https://example.com/documents/1-a"), None);
        // Missing slug
        assert_eq!(
            resolver.resolve_url("https://www.documentcloud.org/documents/123"),
            None
        );
        assert_eq!(
            resolver.resolve_url("https://www.documentcloud.org/documents/123-"),
            None
        );
        // Non-numeric id
        assert_eq!(
            resolver.resolve_url("https://www.documentcloud.org/documents/abc-report"),
            None
        );
    }

    #[test]
    fn test_custom_storage_location() {
        let resolver = PatternResolver::new("docs.example.org", "files.example.org").unwrap();

        assert_eq!(
            resolver
                .resolve_url("https://docs.example.org/documents/9-x")
                .as_deref(),
            Some("https://files.example.org/documents/9/x.pdf")
        );
        // The domain is matched literally, dots included
        assert_eq!(
            resolver.resolve_url("https://docsXexampleXorg/documents/9-x"),
            None
        );
    }

    #[tokio::test]
    async fn test_resolver_trait_reports_unrecognized() {
        let resolver = PatternResolver::default();

        let resolution = resolver
            .resolve("https://www.documentcloud.org/documents/5-five")
            .await
            .unwrap();
        assert!(matches!(resolution, Resolution::Located(_)));
        assert_eq!(
            resolution.url(),
            "https://s3.documentcloud.org/documents/5/five.pdf"
        );

        let err = resolver.resolve("not a url at all").await.unwrap_err();
        assert!(matches!(err, ResolveError::Unrecognized(_)));
    }
}
