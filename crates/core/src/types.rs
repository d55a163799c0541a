//! Track and document types
//!
//! The catalog owner hands us `TrackRecord`s (an id plus a nested tag
//! structure). Each record is projected into a flat `Document` holding only
//! the three searchable fields; every other key on the record is ignored.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// DocumentId
// ============================================================================

/// Opaque, caller-supplied track identifier.
///
/// Catalogs use integer, floating-point or string ids; all are accepted and
/// returned to the caller exactly as received. Integers that fit `i64` are
/// always `Int`; `UInt` only holds values above `i64::MAX`.
///
/// Ordering is total: integers sort before floats, floats before strings.
/// Integers compare numerically across `Int` and `UInt`, floats by
/// `f64::total_cmp`, strings lexicographically. Search results use it to
/// break score ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    /// Signed integer id
    Int(i64),
    /// Integer id above `i64::MAX`
    UInt(u64),
    /// Non-integral numeric id
    Float(FloatId),
    /// String id
    Str(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Int(n) => write!(f, "{}", n),
            DocumentId::UInt(n) => write!(f, "{}", n),
            DocumentId::Float(x) => write!(f, "{:?}", x.get()),
            DocumentId::Str(s) => f.write_str(s),
        }
    }
}

/// Floating-point id with bitwise equality and a total order
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatId(f64);

impl FloatId {
    /// Wrap a float id
    pub fn new(value: f64) -> Self {
        FloatId(value)
    }

    /// The id as received
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatId {}

impl Hash for FloatId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Ord for FloatId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for FloatId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for DocumentId {
    fn from(n: i64) -> Self {
        DocumentId::Int(n)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::Str(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId::Str(s)
    }
}

// ============================================================================
// Field
// ============================================================================

/// Searchable text field of a track.
///
/// All fields contribute to relevance with equal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Album name
    Album,
    /// Artist name
    Artist,
    /// Track title
    Title,
}

impl Field {
    /// Every field, in index order
    pub const ALL: [Field; 3] = [Field::Album, Field::Artist, Field::Title];

    /// Number of fields
    pub const COUNT: usize = 3;

    /// Dense position of this field, usable as an array index
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            Field::Album => 0,
            Field::Artist => 1,
            Field::Title => 2,
        }
    }

    /// Field name as it appears in track tags
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Album => "album",
            Field::Artist => "artist",
            Field::Title => "title",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Document
// ============================================================================

/// One track's searchable projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-supplied identifier
    pub id: DocumentId,
    /// Album text (possibly empty)
    #[serde(default)]
    pub album: String,
    /// Artist text (possibly empty)
    #[serde(default)]
    pub artist: String,
    /// Title text (possibly empty)
    #[serde(default)]
    pub title: String,
}

impl Document {
    /// Create a document with all three fields
    pub fn new(
        id: impl Into<DocumentId>,
        album: impl Into<String>,
        artist: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Document {
            id: id.into(),
            album: album.into(),
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Text of the given field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Album => &self.album,
            Field::Artist => &self.artist,
            Field::Title => &self.title,
        }
    }
}

impl From<TrackRecord> for Document {
    fn from(record: TrackRecord) -> Self {
        let TrackTags {
            album,
            artist,
            title,
        } = record.tags;
        Document {
            id: record.id,
            album: album.unwrap_or_default(),
            artist: artist.unwrap_or_default(),
            title: title.unwrap_or_default(),
        }
    }
}

// ============================================================================
// TrackRecord
// ============================================================================

/// Tag block of an external track record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackTags {
    /// Album tag
    #[serde(default)]
    pub album: Option<String>,
    /// Artist tag
    #[serde(default)]
    pub artist: Option<String>,
    /// Title tag
    #[serde(default)]
    pub title: Option<String>,
}

/// Track record as owned by the catalog.
///
/// Unknown keys (file paths, durations, ...) are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Track identifier
    pub id: DocumentId,
    /// Nested tag structure; missing tags project to empty fields
    #[serde(default)]
    pub tags: TrackTags,
}

impl TrackRecord {
    /// Create a record from tag values
    pub fn new(
        id: impl Into<DocumentId>,
        album: impl Into<String>,
        artist: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        TrackRecord {
            id: id.into(),
            tags: TrackTags {
                album: Some(album.into()),
                artist: Some(artist.into()),
                title: Some(title.into()),
            },
        }
    }
}

// ============================================================================
// TrackPayload
// ============================================================================

/// Rebuild input: already-structured records or their serialized JSON form.
///
/// `null` (and a serialized `"null"`) stand for an empty catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackPayload {
    /// No collection supplied
    Missing,
    /// JSON text that must be decoded into a record array
    Serialized(String),
    /// Structured records
    Records(Vec<TrackRecord>),
}

impl TrackPayload {
    /// Decode the payload into track records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if serialized text is not a JSON array of
    /// track records (or `null`).
    pub fn into_records(self) -> Result<Vec<TrackRecord>> {
        match self {
            TrackPayload::Missing => Ok(Vec::new()),
            TrackPayload::Records(records) => Ok(records),
            TrackPayload::Serialized(text) => {
                let decoded: Option<Vec<TrackRecord>> = serde_json::from_str(&text)?;
                Ok(decoded.unwrap_or_default())
            }
        }
    }

    /// Decode the payload and project every record into a `Document`.
    pub fn into_documents(self) -> Result<Vec<Document>> {
        Ok(self
            .into_records()?
            .into_iter()
            .map(Document::from)
            .collect())
    }
}

impl From<Vec<TrackRecord>> for TrackPayload {
    fn from(records: Vec<TrackRecord>) -> Self {
        TrackPayload::Records(records)
    }
}

impl From<String> for TrackPayload {
    fn from(text: String) -> Self {
        TrackPayload::Serialized(text)
    }
}

impl From<&str> for TrackPayload {
    fn from(text: &str) -> Self {
        TrackPayload::Serialized(text.to_string())
    }
}
