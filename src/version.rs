use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Prerelease, Version};

/// A release tag parsed into a semantic version.
///
/// Remembers whether the tag carried a leading `v` so the bumped tag can be
/// rendered in the same style.
#[derive(Debug, Clone, PartialEq)]
pub struct TagVersion {
    pub prefixed: bool,
    pub version: Version,
}

impl TagVersion {
    /// Parses a version from a release tag string.
    ///
    /// Strips a single leading `v` (only lowercase) and parses the remainder as
    /// `MAJOR.MINOR.PATCH[-PRE][+BUILD]`.
    ///
    /// # Example
    /// ```ignore
    /// let tag = TagVersion::parse("v1.2.3")?;
    /// assert!(tag.prefixed);
    /// assert_eq!(tag.version, semver::Version::new(1, 2, 3));
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        let (prefixed, text) = match tag.strip_prefix('v') {
            Some(rest) => (true, rest),
            None => (false, tag),
        };

        let version = Version::parse(text).map_err(|source| ReleaseError::Parse {
            tag: tag.to_string(),
            source,
        })?;

        Ok(TagVersion { prefixed, version })
    }

    /// Increments the patch component by one.
    ///
    /// Major and minor are left as they are. Pre-release and build metadata
    /// are cleared, so `1.2.3-rc.1` becomes `1.2.4`.
    pub fn bump_patch(mut self) -> Self {
        self.version.patch += 1;
        self.version.pre = Prerelease::EMPTY;
        self.version.build = BuildMetadata::EMPTY;
        self
    }
}

impl std::fmt::Display for TagVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prefixed {
            write!(f, "v{}", self.version)
        } else {
            write!(f, "{}", self.version)
        }
    }
}

/// Computes the tag that follows `tag` by a patch bump.
pub fn next_patch_tag(tag: &str) -> Result<String> {
    Ok(TagVersion::parse(tag)?.bump_patch().to_string())
}
