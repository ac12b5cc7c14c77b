//! Typed view of the site configuration document.
//!
//! Field names follow the camelCase wire format of the published
//! `site_data.json`, so a typed value serializes to the same shape the
//! raw document carries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// THEME
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTheme {
    pub background: String,
    pub surface: String,
    pub primary: String,
    pub accent: String,
}

// =============================================================================
// CONTENT BLOCKS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroBlock {
    pub title: String,
    pub subtitle: String,
    pub badge: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionBlock {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub image: String,
}

/// A newsletter sign-up captured from the public form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub name: String,
    pub email: String,
    /// Epoch milliseconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterBlock {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<Vec<Subscriber>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

// =============================================================================
// ENTERPRISE GROUPS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseSection {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub items: Vec<PortfolioItem>,
}

// =============================================================================
// ROSTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterItem {
    pub id: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
}

// =============================================================================
// AUDIO CATALOG
// =============================================================================

/// An audio track with optional rights and release metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub territories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishing_splits: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Archive,
    Stream,
}

// =============================================================================
// ASSET VAULT
// =============================================================================

/// A previously generated or uploaded media asset kept for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetVaultItem {
    pub id: String,
    /// An http(s) URL or an embedded `data:` blob.
    pub url: String,
    /// Epoch milliseconds.
    pub timestamp: u64,
    pub label: String,
}

// =============================================================================
// SITE CONFIGURATION
// =============================================================================

/// The whole site document, as the editing surface and renderer see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfiguration {
    pub theme: SiteTheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_playlist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_audio_source: Option<AudioSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_directives: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_library: Option<Vec<AssetVaultItem>>,
    pub hero: HeroBlock,
    pub vision: VisionBlock,
    pub enterprise_sections: Vec<EnterpriseSection>,
    pub roster: Vec<RosterItem>,
    pub newsletter: NewsletterBlock,
    pub custom_sections: Vec<CustomSection>,
    pub catalog: Vec<AudioTrack>,
}
