//! Version-to-release resolution.
//!
//! Walks the paginated release listing until every requested version has
//! been matched or the listing is exhausted. The reserved identifier
//! `latest` resolves to the first entry of page 1 without needing its
//! literal tag.

use std::collections::HashSet;
use std::fmt;

use crate::error::PackageResult;
use crate::github::{Release, ReleaseListing};

/// Reserved version identifier meaning "the most recent release".
pub const LATEST_SENTINEL: &str = "latest";

/// A caller-supplied version identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionRequest {
    /// The most recently published release.
    Latest,
    /// A literal release tag.
    Tag(String),
}

impl VersionRequest {
    /// Parse a caller-supplied identifier, recognizing the `latest` sentinel.
    pub fn parse(identifier: &str) -> Self {
        if identifier == LATEST_SENTINEL {
            Self::Latest
        } else {
            Self::Tag(identifier.to_string())
        }
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST_SENTINEL),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

/// One resolved entry: the request that asked for it and the release found.
///
/// `latest` and a literal tag naming the same release resolve to two
/// entries mapping to the same release.
#[derive(Debug, Clone)]
pub struct ResolvedRelease {
    pub request: VersionRequest,
    pub release: Release,
}

/// Resolve requested versions against the paginated release listing.
///
/// Pages are requested starting at 1 and traversal stops as soon as every
/// request is matched; no page is requested beyond that point. When the
/// listing reports its page boundary before all requests are matched, the
/// matched subset is returned and the unmatched identifiers are logged as a
/// warning but do not fail resolution.
///
/// A non-boundary listing failure is fatal and aborts the whole resolution.
pub async fn resolve<L: ReleaseListing>(
    listing: &L,
    requests: &[VersionRequest],
) -> PackageResult<Vec<ResolvedRelease>> {
    let mut needed: HashSet<VersionRequest> = requests.iter().cloned().collect();
    let mut resolved = Vec::new();
    let mut page: u32 = 1;

    while !needed.is_empty() {
        tracing::info!(page, "requesting release page");

        let Some(releases) = listing.page(page).await? else {
            tracing::debug!(page, "release listing exhausted");
            break;
        };

        if page == 1 && needed.contains(&VersionRequest::Latest) {
            // An empty first page leaves `latest` unmatched, so it still
            // shows up in the warning below.
            if let Some(first) = releases.first() {
                needed.remove(&VersionRequest::Latest);
                resolved.push(ResolvedRelease {
                    request: VersionRequest::Latest,
                    release: first.clone(),
                });
            }
        }

        for release in &releases {
            let request = VersionRequest::Tag(release.tag_name.clone());
            // First matching occurrence wins; tags are not expected to repeat.
            if needed.remove(&request) {
                resolved.push(ResolvedRelease {
                    request,
                    release: release.clone(),
                });
            }
        }

        page += 1;
    }

    if !needed.is_empty() {
        let unmatched: Vec<String> = needed.iter().map(|r| r.to_string()).collect();
        tracing::warn!(
            unmatched = ?unmatched,
            "some requested versions were not found in the release listing"
        );
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackageError;
    use crate::github::{release, MockReleaseListing};

    fn requests(identifiers: &[&str]) -> Vec<VersionRequest> {
        identifiers.iter().map(|s| VersionRequest::parse(s)).collect()
    }

    #[test]
    fn test_version_request_parse() {
        assert_eq!(VersionRequest::parse("latest"), VersionRequest::Latest);
        assert_eq!(
            VersionRequest::parse("v1.0.0"),
            VersionRequest::Tag("v1.0.0".to_string())
        );
    }

    #[tokio::test]
    async fn test_latest_binds_first_entry_of_page_one() {
        let listing = MockReleaseListing::new(vec![vec![
            release("v2.0.0", vec![]),
            release("v1.0.0", vec![]),
        ]]);

        let resolved = resolve(&listing, &requests(&["latest"])).await.unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].request, VersionRequest::Latest);
        assert_eq!(resolved[0].release.tag_name, "v2.0.0");
        assert_eq!(listing.request_count(), 1);
    }

    #[tokio::test]
    async fn test_latest_and_literal_tag_both_resolve() {
        let listing = MockReleaseListing::new(vec![vec![
            release("v2.0.0", vec![]),
            release("v1.0.0", vec![]),
        ]]);

        let resolved = resolve(&listing, &requests(&["latest", "v2.0.0"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert!(resolved
            .iter()
            .all(|entry| entry.release.tag_name == "v2.0.0"));
    }

    #[tokio::test]
    async fn test_latest_with_empty_first_page_stays_unmatched() {
        let listing = MockReleaseListing::new(vec![vec![], vec![release("v1.0.0", vec![])]]);

        let resolved = resolve(&listing, &requests(&["latest"])).await.unwrap();

        // `latest` binds only to the first entry of page 1; an empty first
        // page never binds it to a later page's entry.
        assert!(resolved.is_empty());
        assert_eq!(listing.request_count(), 3);
    }

    #[tokio::test]
    async fn test_no_more_pages_requested_than_necessary() {
        let listing = MockReleaseListing::new(vec![
            vec![release("v3.0.0", vec![])],
            vec![release("v2.0.0", vec![])],
            vec![release("v1.0.0", vec![])],
        ]);

        let resolved = resolve(&listing, &requests(&["v3.0.0"])).await.unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(listing.request_count(), 1);
    }

    #[tokio::test]
    async fn test_resolves_across_pages() {
        let listing = MockReleaseListing::new(vec![
            vec![release("v3.0.0", vec![]), release("v1.0.0", vec![])],
            vec![release("v0.9.0", vec![])],
            vec![release("v2.0.0", vec![])],
        ]);

        let resolved = resolve(&listing, &requests(&["v1.0.0", "v2.0.0"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].release.tag_name, "v1.0.0");
        assert_eq!(resolved[1].release.tag_name, "v2.0.0");
        assert_eq!(listing.request_count(), 3);
    }

    #[tokio::test]
    async fn test_unmatched_identifiers_are_silently_absent() {
        let listing = MockReleaseListing::new(vec![
            vec![release("v2.0.0", vec![])],
            vec![release("v1.0.0", vec![])],
        ]);

        let resolved = resolve(&listing, &requests(&["doesnotexist"]))
            .await
            .unwrap();

        assert!(resolved.is_empty());
        // Two real pages plus the boundary page
        assert_eq!(listing.request_count(), 3);
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let listing = MockReleaseListing::new(vec![
            vec![release("v2.0.0", vec![])],
            vec![release("v1.0.0", vec![])],
        ])
        .failing_at(2, 500);

        let err = resolve(&listing, &requests(&["v1.0.0"])).await.unwrap_err();

        assert!(matches!(
            err,
            PackageError::ListingFetch {
                page: 2,
                status: 500
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_requests_make_no_page_requests() {
        let listing = MockReleaseListing::new(vec![vec![release("v1.0.0", vec![])]]);

        let resolved = resolve(&listing, &[]).await.unwrap();

        assert!(resolved.is_empty());
        assert_eq!(listing.request_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_requests_resolve_once() {
        let listing = MockReleaseListing::new(vec![vec![release("v1.0.0", vec![])]]);

        let resolved = resolve(&listing, &requests(&["v1.0.0", "v1.0.0"]))
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
    }
}
