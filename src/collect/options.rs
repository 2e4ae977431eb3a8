use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::screen::classifier::ClassifierMode;

/// Fully resolved options for one collection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectOptions {
    /// Draw the debug overlay.
    pub highlight: bool,
    /// Drop elements with no rect touching the (expanded) viewport.
    pub viewport_only: bool,
    /// Px added to every side of the viewport for the on-screen test.
    pub viewport_expansion: f64,
    /// Emit diagnostic logging for the pass.
    pub debug: bool,
    /// Keep only the record with this discovery index; negative disables.
    pub focus_index: i64,
    pub mode: ClassifierMode,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            viewport_only: true,
            viewport_expansion: 0.0,
            debug: false,
            focus_index: -1,
            mode: ClassifierMode::Full,
        }
    }
}

impl CollectOptions {
    pub fn focus(&self) -> Option<usize> {
        usize::try_from(self.focus_index).ok()
    }
}

/// Caller-supplied options bag; absent keys keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_expansion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ClassifierMode>,
}

impl OptionsPatch {
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        serde_json::from_str(json).map_err(|e| IndexError::JsonParse {
            context: "options bag".into(),
            source: e,
        })
    }

    pub fn apply_to(&self, base: &CollectOptions) -> CollectOptions {
        CollectOptions {
            highlight: self.highlight.unwrap_or(base.highlight),
            viewport_only: self.viewport_only.unwrap_or(base.viewport_only),
            viewport_expansion: self
                .viewport_expansion
                .unwrap_or(base.viewport_expansion)
                .max(0.0),
            debug: self.debug.unwrap_or(base.debug),
            focus_index: self.focus_index.unwrap_or(base.focus_index),
            mode: self.mode.unwrap_or(base.mode),
        }
    }

    /// Later patch wins key by key.
    pub fn merge(&self, over: &OptionsPatch) -> OptionsPatch {
        OptionsPatch {
            highlight: over.highlight.or(self.highlight),
            viewport_only: over.viewport_only.or(self.viewport_only),
            viewport_expansion: over.viewport_expansion.or(self.viewport_expansion),
            debug: over.debug.or(self.debug),
            focus_index: over.focus_index.or(self.focus_index),
            mode: over.mode.or(self.mode),
        }
    }

    pub fn highlight(mut self, on: bool) -> Self {
        self.highlight = Some(on);
        self
    }

    pub fn viewport_only(mut self, on: bool) -> Self {
        self.viewport_only = Some(on);
        self
    }

    pub fn viewport_expansion(mut self, px: f64) -> Self {
        self.viewport_expansion = Some(px);
        self
    }

    pub fn debug(mut self, on: bool) -> Self {
        self.debug = Some(on);
        self
    }

    pub fn focus_index(mut self, index: i64) -> Self {
        self.focus_index = Some(index);
        self
    }

    pub fn mode(mut self, mode: ClassifierMode) -> Self {
        self.mode = Some(mode);
        self
    }
}
