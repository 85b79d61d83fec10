//! Constructors for game documents and their entities.
//!
//! The builders only produce values. Registering a location or item under
//! its identifier is left to the caller, either directly on the maps or via
//! the operations in [`crate::edit`].

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::{ExtraFields, FlagMap, GameDocument, Item, Location, Meta, PlayerState};

/// Identifier of the single location in a fresh game.
pub const START_LOCATION_ID: &str = "start";

/// Create a new game with one `start` location and the player standing in it.
///
/// Timestamps are left blank; see [`Meta::touch`].
pub fn create_empty_game() -> GameDocument {
    let start = create_location(
        START_LOCATION_ID,
        "Starting Location",
        "You are at the beginning of your adventure.",
    );
    let (start_id, start) = start.into_entry();

    let mut locations = IndexMap::new();
    locations.insert(start_id.clone(), start);

    GameDocument {
        meta: Meta::default(),
        start_location: start_id.clone(),
        locations,
        inventory_items: IndexMap::new(),
        game_flags: IndexMap::new(),
        player: PlayerState {
            inventory: Vec::new(),
            current_location: start_id,
            flags: IndexMap::new(),
            extra: ExtraFields::new(),
        },
        extra: ExtraFields::new(),
    }
}

// ===========================================================================
// Locations
// ===========================================================================

/// Start building a location. Unset optional fields default to empty.
pub fn create_location(
    id: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
) -> LocationBuilder {
    LocationBuilder {
        id: id.into(),
        location: Location {
            title: title.into(),
            description: description.into(),
            image: String::new(),
            exits: IndexMap::new(),
            items: Vec::new(),
            flags_required: FlagMap::new(),
            flags_set: FlagMap::new(),
            first_visit_text: String::new(),
            visited: false,
            extra: ExtraFields::new(),
        },
    }
}

/// Builder returned by [`create_location`].
#[derive(Debug, Clone)]
pub struct LocationBuilder {
    id: String,
    location: Location,
}

impl LocationBuilder {
    /// Set the image path shown for the location.
    pub fn image(mut self, path: impl Into<String>) -> Self {
        self.location.image = path.into();
        self
    }

    /// Add an exit. A repeated direction replaces the earlier target.
    pub fn exit(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.location.exits.insert(direction.into(), target.into());
        self
    }

    /// Add several exits in order.
    pub fn exits<D, T>(mut self, exits: impl IntoIterator<Item = (D, T)>) -> Self
    where
        D: Into<String>,
        T: Into<String>,
    {
        self.location
            .exits
            .extend(exits.into_iter().map(|(d, t)| (d.into(), t.into())));
        self
    }

    /// Place an item identifier in the location.
    pub fn item(mut self, item_id: impl Into<String>) -> Self {
        self.location.items.push(item_id.into());
        self
    }

    /// Place several item identifiers, keeping their order.
    pub fn items<I: Into<String>>(mut self, items: impl IntoIterator<Item = I>) -> Self {
        self.location.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Require `flag` to hold `value` before the location can be entered.
    pub fn flag_required(mut self, flag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.location.flags_required.insert(flag.into(), value.into());
        self
    }

    /// Set `flag` to `value` when the player enters.
    pub fn flag_set(mut self, flag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.location.flags_set.insert(flag.into(), value.into());
        self
    }

    /// Text shown only on the first visit.
    pub fn first_visit_text(mut self, text: impl Into<String>) -> Self {
        self.location.first_visit_text = text.into();
        self
    }

    /// The identifier the entry will be registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Finish the location, dropping its identifier.
    pub fn build(self) -> Location {
        self.location
    }

    /// Consume the builder into the `(id, location)` pair to insert into
    /// [`GameDocument::locations`].
    pub fn into_entry(self) -> (String, Location) {
        (self.id, self.location)
    }
}

// ===========================================================================
// Items
// ===========================================================================

/// Start building an item. Items are takeable and not usable by default.
pub fn create_item(
    id: impl Into<String>,
    name: impl Into<String>,
    description: impl Into<String>,
) -> ItemBuilder {
    ItemBuilder {
        id: id.into(),
        item: Item {
            name: name.into(),
            description: description.into(),
            takeable: true,
            useable: false,
            use_text: String::new(),
            use_flags_required: FlagMap::new(),
            use_flags_set: FlagMap::new(),
            extra: ExtraFields::new(),
        },
    }
}

/// Builder returned by [`create_item`].
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    id: String,
    item: Item,
}

impl ItemBuilder {
    /// Whether the player can pick the item up.
    pub fn takeable(mut self, takeable: bool) -> Self {
        self.item.takeable = takeable;
        self
    }

    /// Whether the item can be used.
    pub fn useable(mut self, useable: bool) -> Self {
        self.item.useable = useable;
        self
    }

    /// Text shown when the item is used.
    pub fn use_text(mut self, text: impl Into<String>) -> Self {
        self.item.use_text = text.into();
        self
    }

    /// Require `flag` to hold `value` before the item can be used.
    pub fn use_flag_required(mut self, flag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.item.use_flags_required.insert(flag.into(), value.into());
        self
    }

    /// Set `flag` to `value` when the item is used.
    pub fn use_flag_set(mut self, flag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.item.use_flags_set.insert(flag.into(), value.into());
        self
    }

    /// The identifier the entry will be registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Finish the item, dropping its identifier.
    pub fn build(self) -> Item {
        self.item
    }

    /// Consume the builder into the `(id, item)` pair.
    pub fn into_entry(self) -> (String, Item) {
        (self.id, self.item)
    }
}
