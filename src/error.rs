use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Reading or writing a page dump, config or report failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed (page dump or options bag)
    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed (snapshot or page dump)
    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing failed (page dump)
    #[error("YAML parse error ({context}): {source}")]
    YamlParse {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Page dump was well-formed but structurally unusable
    #[error("Invalid page fixture: {0}")]
    InvalidFixture(String),

    /// The page has no live root container to collect from
    #[error("Document is detached: no root container to collect from")]
    DetachedDocument,
}

impl IndexError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }
}
