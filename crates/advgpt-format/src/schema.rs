//! Serde structs for the `.advgpt` game document.
//!
//! These structs define the on-disk shape of a game: metadata, the location
//! graph, item definitions, flag defaults and the embedded player state.
//! Keyed collections are [`IndexMap`]s so a document keeps its key order
//! through a load/save cycle.
//!
//! Fields the validator requires are plain fields; everything else carries a
//! serde default so hand-written files that omit them still load. Keys none
//! of the structs declare are collected into each struct's `extra` map and
//! written back on save, after the declared fields.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flag conditions or effects keyed by flag name. Values are usually booleans
/// but the format leaves their interpretation to the consumer.
pub type FlagMap = IndexMap<String, Value>;

/// Default value of every game-wide flag, keyed by flag name.
pub type FlagDefaults = IndexMap<String, bool>;

/// Undeclared keys of an object, kept verbatim for round-tripping.
pub type ExtraFields = IndexMap<String, Value>;

// ===========================================================================
// Document
// ===========================================================================

/// The root of an `.advgpt` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDocument {
    pub meta: Meta,
    /// Identifier of the location the game starts in.
    pub start_location: String,
    pub locations: IndexMap<String, Location>,
    pub inventory_items: IndexMap<String, Item>,
    pub game_flags: FlagDefaults,
    pub player: PlayerState,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl GameDocument {
    /// Look up a location by identifier.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Look up an item definition by identifier.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.inventory_items.get(id)
    }

    /// Whether a location with this identifier exists.
    pub fn contains_location(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }
}

// ===========================================================================
// Metadata
// ===========================================================================

/// Descriptive metadata about the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    /// Creation timestamp. Free-form; [`Meta::touch`] writes RFC 3339.
    #[serde(default)]
    pub created: String,
    /// Last-modified timestamp. Free-form; [`Meta::touch`] writes RFC 3339.
    #[serde(default)]
    pub modified: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Meta {
    /// Stamp `modified` with `now`, and `created` too if it is still blank.
    ///
    /// Nothing in this crate calls this implicitly; saving never rewrites
    /// timestamps behind the caller's back.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        if self.created.is_empty() {
            self.created = stamp.clone();
        }
        self.modified = stamp;
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            title: "Untitled Adventure".to_string(),
            author: "Unknown".to_string(),
            description: String::new(),
            version: "1.0".to_string(),
            created: String::new(),
            modified: String::new(),
            extra: ExtraFields::new(),
        }
    }
}

// ===========================================================================
// Locations
// ===========================================================================

/// A node in the game's navigable graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub description: String,
    /// Path of the image shown for this location; empty means no image.
    #[serde(default)]
    pub image: String,
    /// Direction label (e.g. `"north"`) to target location identifier.
    pub exits: IndexMap<String, String>,
    /// Identifiers of items lying here.
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub flags_required: FlagMap,
    #[serde(default)]
    pub flags_set: FlagMap,
    #[serde(default)]
    pub first_visit_text: String,
    #[serde(default)]
    pub visited: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ===========================================================================
// Items
// ===========================================================================

/// A takeable and/or usable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub takeable: bool,
    #[serde(default)]
    pub useable: bool,
    #[serde(default)]
    pub use_text: String,
    #[serde(default)]
    pub use_flags_required: FlagMap,
    #[serde(default)]
    pub use_flags_set: FlagMap,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

fn default_true() -> bool {
    true
}

// ===========================================================================
// Player
// ===========================================================================

/// Player state embedded in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Identifiers of the items currently held, in pickup order.
    pub inventory: Vec<String>,
    pub current_location: String,
    /// Player-local flags, distinct from [`GameDocument::game_flags`].
    pub flags: FlagDefaults,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
