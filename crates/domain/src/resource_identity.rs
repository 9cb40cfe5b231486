//! Storage object identity derived from an audited resource name.
//!
//! Resource names follow
//! `projects/<project>/buckets/<bucket>/objects/<segment>/.../<file>`.

use serde::Serialize;

use crate::error::{LogEventError, ResourceNameDefect};

/// Minimum `/`-delimited segment count of an extractable resource name.
pub const MIN_RESOURCE_NAME_SEGMENTS: usize = 8;

const SHAPE_MARKERS: [(usize, &str); 3] = [(0, "projects"), (2, "buckets"), (4, "objects")];
const BUCKET_SEGMENT: usize = 3;
const OBJECT_FIRST_SEGMENT: usize = 5;

/// Bucket, object path and key of one audited storage object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceIdentity {
    bucket: String,
    object_path: String,
    key: String,
}

impl ResourceIdentity {
    /// Parses a fully qualified resource name.
    ///
    /// The key is the part of the final segment before its first `.`.
    pub fn parse(resource_name: &str) -> Result<Self, LogEventError> {
        let malformed = |defect| LogEventError::MalformedResourceName {
            resource_name: resource_name.to_owned(),
            defect,
        };

        let segments: Vec<&str> = resource_name.split('/').collect();
        if segments.len() < MIN_RESOURCE_NAME_SEGMENTS {
            return Err(malformed(ResourceNameDefect::TooFewSegments(segments.len())));
        }

        for (index, expected) in SHAPE_MARKERS {
            if segments[index] != expected {
                return Err(malformed(ResourceNameDefect::UnexpectedMarker { index, expected }));
            }
        }

        let bucket = segments[BUCKET_SEGMENT];
        if bucket.is_empty() {
            return Err(malformed(ResourceNameDefect::EmptyBucket));
        }

        let file_name = segments.last().copied().unwrap_or_default();
        let key = file_name
            .split_once('.')
            .map_or(file_name, |(stem, _)| stem);
        if key.is_empty() {
            return Err(malformed(ResourceNameDefect::EmptyKey));
        }

        Ok(Self {
            bucket: bucket.to_owned(),
            object_path: segments[OBJECT_FIRST_SEGMENT..].join("/"),
            key: key.to_owned(),
        })
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.bucket.as_str()
    }

    /// Returns the object path inside the bucket.
    #[must_use]
    pub fn object_path(&self) -> &str {
        self.object_path.as_str()
    }

    /// Returns the extension-less object key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Consumes the identity into `(bucket, object_path, key)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, String) {
        (self.bucket, self.object_path, self.key)
    }
}
