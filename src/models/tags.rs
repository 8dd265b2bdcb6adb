use serde::{Deserialize, Serialize};

/// Normalized ticket tags.
///
/// Deserializes from either a comma-joined string (`"music, jazz"`, what the
/// frontend's tag input produces) or a JSON array of strings. Entries are trimmed and
/// empty entries dropped, so `""` becomes an empty list rather than `[""]`. Order and
/// duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTags", into = "Vec<String>")]
pub struct TagList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    Joined(String),
    List(Vec<String>),
}

impl From<RawTags> for TagList {
    fn from(raw: RawTags) -> Self {
        match raw {
            RawTags::Joined(joined) => Self::parse(&joined),
            RawTags::List(list) => Self::from_iter(list),
        }
    }
}

impl From<TagList> for Vec<String> {
    fn from(tags: TagList) -> Self {
        tags.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )
    }
}

impl TagList {
    /// Splits a comma-joined tag string.
    pub fn parse(joined: &str) -> Self {
        joined.split(',').collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
