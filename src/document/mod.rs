//! Site document — the single aggregate record the service persists.
//!
//! DESIGN
//! ======
//! The persisted unit is the raw JSON document, not the typed
//! [`SiteConfiguration`]. Published and imported documents are accepted as
//! long as they parse as JSON, so a partial document must survive storage
//! and export unchanged. The typed view is derived on demand and a failure
//! to derive it is reported, never enforced.
//!
//! Every edit here mutates a whole document; callers clone the current
//! document, apply the edit, then save the result wholesale.

pub mod defaults;
pub mod model;

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use model::SiteConfiguration;

const VAULT_ID_LEN: usize = 9;
const VAULT_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const IMAGE_PREVIEW_CHARS: usize = 30;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("document root is not an object")]
    NotAnObject,

    #[error("empty field path")]
    EmptyPath,

    #[error("path segment `{segment}` cannot be traversed")]
    PathConflict { segment: String },

    #[error("index `{segment}` out of range")]
    IndexOutOfRange { segment: String },

    #[error("vault item not found: {0}")]
    VaultItemNotFound(String),

    #[error("subscriber name and email are required")]
    InvalidSubscriber,

    #[error("document does not match the site schema: {0}")]
    Shape(String),

    #[error("document is null")]
    Empty,
}

impl DocumentError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "E_INVALID_JSON",
            Self::NotAnObject => "E_NOT_AN_OBJECT",
            Self::EmptyPath => "E_EMPTY_PATH",
            Self::PathConflict { .. } => "E_PATH_CONFLICT",
            Self::IndexOutOfRange { .. } => "E_INDEX_OUT_OF_RANGE",
            Self::VaultItemNotFound(_) => "E_VAULT_ITEM_NOT_FOUND",
            Self::InvalidSubscriber => "E_INVALID_SUBSCRIBER",
            Self::Shape(_) => "E_SHAPE",
            Self::Empty => "E_EMPTY_DOCUMENT",
        }
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Counts logged when a document is resolved or saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub roster: usize,
    pub catalog: usize,
    pub vault: usize,
    /// Leading characters of the first roster image, to tell URLs from data blobs.
    pub first_roster_image: Option<String>,
}

// =============================================================================
// DOCUMENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteDocument(Value);

impl SiteDocument {
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse document text. Any valid JSON is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidJson`] if `text` is not JSON.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        Ok(Self(serde_json::from_str(text)?))
    }

    /// Encode a typed configuration as a raw document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidJson`] if serialization fails.
    pub fn from_configuration(config: &SiteConfiguration) -> Result<Self, DocumentError> {
        Ok(Self(serde_json::to_value(config)?))
    }

    /// The compiled-in default document.
    ///
    /// # Errors
    ///
    /// Returns an error only if the default configuration fails to encode.
    pub fn builtin() -> Result<Self, DocumentError> {
        Self::from_configuration(&defaults::default_configuration())
    }

    /// A `null` document stands for "no document" and is never persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    #[cfg(test)]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[cfg(test)]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON, the form written to the store.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidJson`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Two-space indented JSON, the form of the downloadable publish file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidJson`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Derive the typed view.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Shape`] when required fields are missing or
    /// carry the wrong type.
    pub fn typed(&self) -> Result<SiteConfiguration, DocumentError> {
        serde_json::from_value(self.0.clone()).map_err(|e| DocumentError::Shape(e.to_string()))
    }

    /// The admin credential, falling back to the default when unset or empty.
    #[must_use]
    pub fn admin_password(&self) -> &str {
        self.0
            .get("adminPassword")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults::DEFAULT_ADMIN_PASSWORD)
    }

    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        let len_of = |key: &str| self.0.get(key).and_then(Value::as_array).map_or(0, Vec::len);
        let first_roster_image = self
            .0
            .pointer("/roster/0/image")
            .and_then(Value::as_str)
            .map(|image| image.chars().take(IMAGE_PREVIEW_CHARS).collect());

        DocumentSummary {
            roster: len_of("roster"),
            catalog: len_of("catalog"),
            vault: len_of("assetLibrary"),
            first_roster_image,
        }
    }

    // =========================================================================
    // EDITS
    // =========================================================================

    /// Set a nested value, creating missing intermediate objects.
    ///
    /// Numeric segments index into arrays and must be in range. When
    /// `archive` is set and the value is an image data blob or an http(s)
    /// URL, the value is also prepended to the asset vault.
    ///
    /// # Errors
    ///
    /// Returns a path error if a segment cannot be traversed, or
    /// [`DocumentError::NotAnObject`] if the root is not an object.
    pub fn set_field(&mut self, path: &[String], value: Value, archive: bool) -> Result<(), DocumentError> {
        let Some((last, parents)) = path.split_last() else {
            return Err(DocumentError::EmptyPath);
        };
        if !self.0.is_object() {
            return Err(DocumentError::NotAnObject);
        }

        let archived_url = match &value {
            Value::String(url) if archive && is_archivable(url) => Some(url.clone()),
            _ => None,
        };

        let mut target = &mut self.0;
        for segment in parents {
            let slot = child_mut(target, segment)?;
            if is_falsy(slot) {
                *slot = Value::Object(Map::new());
            }
            target = slot;
        }

        match target {
            Value::Object(map) => {
                map.insert(last.clone(), value);
            }
            Value::Array(items) => {
                let slot = index_mut(items, last)?;
                *slot = value;
            }
            _ => return Err(DocumentError::PathConflict { segment: last.clone() }),
        }

        if let Some(url) = archived_url {
            self.push_vault_item(url, path.join(" > "))?;
        }
        Ok(())
    }

    /// Prepend an asset to the vault and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnObject`] if the root is not an object.
    pub fn push_vault_item(&mut self, url: String, label: String) -> Result<String, DocumentError> {
        let root = self.0.as_object_mut().ok_or(DocumentError::NotAnObject)?;
        let id = generate_vault_id();
        let item = serde_json::json!({
            "id": id,
            "url": url,
            "label": label,
            "timestamp": now_ms(),
        });

        let library = root.entry("assetLibrary").or_insert_with(|| Value::Array(Vec::new()));
        if !library.is_array() {
            *library = Value::Array(Vec::new());
        }
        if let Value::Array(items) = library {
            items.insert(0, item);
        }
        Ok(id)
    }

    /// Remove the vault item with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::VaultItemNotFound`] if no item carries `id`.
    pub fn remove_vault_item(&mut self, id: &str) -> Result<(), DocumentError> {
        let items = self
            .0
            .get_mut("assetLibrary")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| DocumentError::VaultItemNotFound(id.to_owned()))?;

        let before = items.len();
        items.retain(|item| item.get("id").and_then(Value::as_str) != Some(id));
        if items.len() == before {
            return Err(DocumentError::VaultItemNotFound(id.to_owned()));
        }
        Ok(())
    }

    /// Append a newsletter subscriber. Name and email are trimmed and must
    /// both be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSubscriber`] for blank input, or
    /// [`DocumentError::NotAnObject`] if the root is not an object.
    pub fn add_subscriber(&mut self, name: &str, email: &str) -> Result<(), DocumentError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(DocumentError::InvalidSubscriber);
        }

        let root = self.0.as_object_mut().ok_or(DocumentError::NotAnObject)?;
        let newsletter = root.entry("newsletter").or_insert_with(|| Value::Object(Map::new()));
        if !newsletter.is_object() {
            *newsletter = Value::Object(Map::new());
        }
        let Value::Object(newsletter) = newsletter else {
            return Err(DocumentError::NotAnObject);
        };

        let subscribers = newsletter.entry("subscribers").or_insert_with(|| Value::Array(Vec::new()));
        if !subscribers.is_array() {
            *subscribers = Value::Array(Vec::new());
        }
        if let Value::Array(list) = subscribers {
            list.push(serde_json::json!({ "name": name, "email": email, "timestamp": now_ms() }));
        }
        Ok(())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn child_mut<'a>(target: &'a mut Value, segment: &str) -> Result<&'a mut Value, DocumentError> {
    match target {
        Value::Object(map) => Ok(map.entry(segment.to_owned()).or_insert(Value::Null)),
        Value::Array(items) => index_mut(items, segment),
        _ => Err(DocumentError::PathConflict { segment: segment.to_owned() }),
    }
}

fn index_mut<'a>(items: &'a mut [Value], segment: &str) -> Result<&'a mut Value, DocumentError> {
    let index: usize = segment
        .parse()
        .map_err(|_| DocumentError::PathConflict { segment: segment.to_owned() })?;
    items
        .get_mut(index)
        .ok_or_else(|| DocumentError::IndexOutOfRange { segment: segment.to_owned() })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_archivable(value: &str) -> bool {
    value.starts_with("data:image") || value.starts_with("http")
}

pub(crate) fn generate_vault_id() -> String {
    let mut rng = rand::rng();
    (0..VAULT_ID_LEN)
        .map(|_| char::from(VAULT_ID_ALPHABET[rng.random_range(0..VAULT_ID_ALPHABET.len())]))
        .collect()
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
