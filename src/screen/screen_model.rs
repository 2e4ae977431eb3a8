use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::dom::geometry::Rect;

/// Attributes and state flags extracted from one element.
///
/// Serialized keys follow the DOM attribute spelling the automation driver
/// expects (`className`, `data-testid`, `aria-label`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDetails {
    pub tag: String,
    pub id: Option<String>,
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
    pub href: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "data-testid")]
    pub data_testid: Option<String>,
    #[serde(rename = "data-test")]
    pub data_test: Option<String>,
    #[serde(rename = "aria-label")]
    pub aria_label: Option<String>,
    #[serde(rename = "aria-labelledby")]
    pub aria_labelledby: Option<String>,
    /// Rendered text, trimmed, at most `MAX_TEXT_CHARS` characters.
    pub text: String,
    pub visible: bool,
    pub enabled: bool,
    pub required: bool,
    pub checked: bool,
    pub selected: bool,
}

impl ElementDetails {
    /// Bare details for `tag` with every attribute absent; handy for scoring.
    pub fn for_tag(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class_name: None,
            name: None,
            input_type: None,
            value: None,
            placeholder: None,
            title: None,
            alt: None,
            href: None,
            role: None,
            data_testid: None,
            data_test: None,
            aria_label: None,
            aria_labelledby: None,
            text: String::new(),
            visible: true,
            enabled: true,
            required: false,
            checked: false,
            selected: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl From<Rect> for RecordRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            w: r.width,
            h: r.height,
        }
    }
}

impl From<RecordRect> for Rect {
    fn from(r: RecordRect) -> Self {
        Rect::new(r.x, r.y, r.w, r.h)
    }
}

/// One addressable entry of a snapshot: one element box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Discovery index, stable across calls on an unchanged page.
    pub index: usize,
    pub xpath: String,
    #[serde(flatten)]
    pub details: ElementDetails,
    pub rect: RecordRect,
    pub priority: u32,
}

/// Records ordered by descending priority, discovery order breaking ties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: Vec<ElementRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<ElementRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementRecord> {
        self.records.iter()
    }

    /// Record with discovery index `index`, wherever it sorted to.
    pub fn by_index(&self, index: usize) -> Option<&ElementRecord> {
        self.records.iter().find(|r| r.index == index)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// SHA-1 of the serialized snapshot; equal pages give equal fingerprints.
    pub fn fingerprint(&self) -> String {
        let json = self.to_json().unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ElementRecord;
    type IntoIter = std::slice::Iter<'a, ElementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of running both classifier predicates on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub interactive: bool,
    pub textual: bool,
}

impl Classification {
    pub fn qualifies(&self) -> bool {
        self.interactive || self.textual
    }
}
