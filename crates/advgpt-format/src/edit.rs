//! Editing operations over an explicitly passed document.
//!
//! These are the mutations an editing surface needs (adding and removing
//! locations, exits, items and flags). Each one keeps referential integrity:
//! a document that validates before an operation still validates after it.

use crate::schema::{GameDocument, Item, Location};

/// Errors returned by editing operations. The document is left unchanged
/// whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("location '{id}' already exists")]
    DuplicateLocation { id: String },

    #[error("location '{id}' not found")]
    UnknownLocation { id: String },

    /// The location is the start location or the player's current location.
    #[error("location '{id}' is the {role} and cannot be removed")]
    LocationInUse { id: String, role: &'static str },

    #[error("location '{location}' has no exit '{direction}'")]
    UnknownExit { location: String, direction: String },

    #[error("item '{id}' already exists")]
    DuplicateItem { id: String },

    #[error("item '{id}' not found")]
    UnknownItem { id: String },

    #[error("game flag '{name}' not found")]
    UnknownFlag { name: String },
}

fn require_location(doc: &GameDocument, id: &str) -> Result<(), EditError> {
    if doc.contains_location(id) {
        Ok(())
    } else {
        Err(EditError::UnknownLocation { id: id.to_string() })
    }
}

// ===========================================================================
// Locations
// ===========================================================================

/// First free identifier of the form `location_N`, counting from the number
/// of existing locations plus one.
pub fn next_location_id(doc: &GameDocument) -> String {
    (doc.locations.len() + 1..)
        .map(|n| format!("location_{n}"))
        .find(|id| !doc.contains_location(id))
        .unwrap_or_default()
}

/// Register a location under `id`.
pub fn add_location(
    doc: &mut GameDocument,
    id: impl Into<String>,
    location: Location,
) -> Result<(), EditError> {
    let id = id.into();
    if doc.contains_location(&id) {
        return Err(EditError::DuplicateLocation { id });
    }
    doc.locations.insert(id, location);
    Ok(())
}

/// Remove a location and every exit that leads to it.
///
/// The start location and the player's current location cannot be removed;
/// move them first with [`set_start_location`] or by editing the player.
pub fn remove_location(doc: &mut GameDocument, id: &str) -> Result<Location, EditError> {
    require_location(doc, id)?;
    if doc.start_location == id {
        return Err(EditError::LocationInUse {
            id: id.to_string(),
            role: "start location",
        });
    }
    if doc.player.current_location == id {
        return Err(EditError::LocationInUse {
            id: id.to_string(),
            role: "player's current location",
        });
    }

    let removed = doc
        .locations
        .shift_remove(id)
        .ok_or_else(|| EditError::UnknownLocation { id: id.to_string() })?;
    for location in doc.locations.values_mut() {
        location.exits.retain(|_, target| *target != id);
    }
    Ok(removed)
}

/// Give a location a new identifier, rewriting every reference to it.
/// The location keeps its position in the document.
pub fn rename_location(doc: &mut GameDocument, from: &str, to: &str) -> Result<(), EditError> {
    require_location(doc, from)?;
    if from == to {
        return Ok(());
    }
    if doc.contains_location(to) {
        return Err(EditError::DuplicateLocation { id: to.to_string() });
    }

    doc.locations = std::mem::take(&mut doc.locations)
        .into_iter()
        .map(|(id, location)| {
            if id == from {
                (to.to_string(), location)
            } else {
                (id, location)
            }
        })
        .collect();

    for location in doc.locations.values_mut() {
        for target in location.exits.values_mut() {
            if *target == from {
                *target = to.to_string();
            }
        }
    }
    if doc.start_location == from {
        doc.start_location = to.to_string();
    }
    if doc.player.current_location == from {
        doc.player.current_location = to.to_string();
    }
    Ok(())
}

/// Make an existing location the start location.
pub fn set_start_location(doc: &mut GameDocument, id: &str) -> Result<(), EditError> {
    require_location(doc, id)?;
    doc.start_location = id.to_string();
    Ok(())
}

// ===========================================================================
// Exits
// ===========================================================================

/// Add or replace the exit `direction` of `from`, returning the previous
/// target if there was one.
pub fn add_exit(
    doc: &mut GameDocument,
    from: &str,
    direction: impl Into<String>,
    to: &str,
) -> Result<Option<String>, EditError> {
    require_location(doc, to)?;
    let location = doc
        .locations
        .get_mut(from)
        .ok_or_else(|| EditError::UnknownLocation {
            id: from.to_string(),
        })?;
    Ok(location.exits.insert(direction.into(), to.to_string()))
}

/// Remove the exit `direction` of `from`, returning its target.
pub fn remove_exit(doc: &mut GameDocument, from: &str, direction: &str) -> Result<String, EditError> {
    let location = doc
        .locations
        .get_mut(from)
        .ok_or_else(|| EditError::UnknownLocation {
            id: from.to_string(),
        })?;
    location
        .exits
        .shift_remove(direction)
        .ok_or_else(|| EditError::UnknownExit {
            location: from.to_string(),
            direction: direction.to_string(),
        })
}

// ===========================================================================
// Items
// ===========================================================================

/// Register an item definition under `id`.
pub fn add_item(doc: &mut GameDocument, id: impl Into<String>, item: Item) -> Result<(), EditError> {
    let id = id.into();
    if doc.inventory_items.contains_key(&id) {
        return Err(EditError::DuplicateItem { id });
    }
    doc.inventory_items.insert(id, item);
    Ok(())
}

/// Remove an item definition along with every placement of it and every
/// copy in the player's inventory.
pub fn remove_item(doc: &mut GameDocument, id: &str) -> Result<Item, EditError> {
    let removed = doc
        .inventory_items
        .shift_remove(id)
        .ok_or_else(|| EditError::UnknownItem { id: id.to_string() })?;
    for location in doc.locations.values_mut() {
        location.items.retain(|item| item != id);
    }
    doc.player.inventory.retain(|item| item != id);
    Ok(removed)
}

/// Put a defined item into a location's item list.
pub fn place_item(doc: &mut GameDocument, location: &str, item: &str) -> Result<(), EditError> {
    if !doc.inventory_items.contains_key(item) {
        return Err(EditError::UnknownItem {
            id: item.to_string(),
        });
    }
    let target = doc
        .locations
        .get_mut(location)
        .ok_or_else(|| EditError::UnknownLocation {
            id: location.to_string(),
        })?;
    target.items.push(item.to_string());
    Ok(())
}

// ===========================================================================
// Flags
// ===========================================================================

/// Declare a game flag, or change its default. Returns the previous default.
pub fn set_game_flag(doc: &mut GameDocument, name: impl Into<String>, default: bool) -> Option<bool> {
    doc.game_flags.insert(name.into(), default)
}

/// Remove a game flag, returning its default.
pub fn remove_game_flag(doc: &mut GameDocument, name: &str) -> Result<bool, EditError> {
    doc.game_flags
        .shift_remove(name)
        .ok_or_else(|| EditError::UnknownFlag {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_empty_game, create_item, create_location};
    use crate::validation::validate;

    fn two_room_game() -> GameDocument {
        let mut game = create_empty_game();
        let (id, loc) = create_location("hall", "Hall", "A hall.")
            .exit("south", "start")
            .into_entry();
        add_location(&mut game, id, loc).unwrap();
        add_exit(&mut game, "start", "north", "hall").unwrap();
        game
    }

    #[test]
    fn next_location_id_skips_taken_names() {
        let mut game = create_empty_game();
        assert_eq!(next_location_id(&game), "location_2");
        let loc = create_location("x", "X", "x").build();
        add_location(&mut game, "location_2", loc).unwrap();
        assert_eq!(next_location_id(&game), "location_3");
    }

    #[test]
    fn add_location_rejects_duplicates() {
        let mut game = create_empty_game();
        let loc = create_location("start", "Again", "again").build();
        assert_eq!(
            add_location(&mut game, "start", loc),
            Err(EditError::DuplicateLocation { id: "start".into() })
        );
        assert_eq!(game.locations["start"].title, "Starting Location");
    }

    #[test]
    fn remove_location_drops_incoming_exits() {
        let mut game = two_room_game();
        let removed = remove_location(&mut game, "hall").unwrap();
        assert_eq!(removed.title, "Hall");
        assert!(game.locations["start"].exits.is_empty());
        assert!(validate(&game).is_empty());
    }

    #[test]
    fn remove_location_refuses_start_and_current() {
        let mut game = two_room_game();
        assert!(matches!(
            remove_location(&mut game, "start"),
            Err(EditError::LocationInUse { .. })
        ));

        set_start_location(&mut game, "hall").unwrap();
        assert!(matches!(
            remove_location(&mut game, "start"),
            Err(EditError::LocationInUse {
                role: "player's current location",
                ..
            })
        ));
        assert_eq!(game.locations.len(), 2);
    }

    #[test]
    fn rename_location_rewrites_references() {
        let mut game = two_room_game();
        rename_location(&mut game, "start", "gate").unwrap();

        let ids: Vec<&str> = game.locations.keys().map(String::as_str).collect();
        assert_eq!(ids, ["gate", "hall"]);
        assert_eq!(game.start_location, "gate");
        assert_eq!(game.player.current_location, "gate");
        assert_eq!(game.locations["hall"].exits["south"], "gate");
        assert!(validate(&game).is_empty());
    }

    #[test]
    fn rename_location_refuses_taken_name() {
        let mut game = two_room_game();
        assert_eq!(
            rename_location(&mut game, "start", "hall"),
            Err(EditError::DuplicateLocation { id: "hall".into() })
        );
    }

    #[test]
    fn add_exit_requires_both_ends() {
        let mut game = create_empty_game();
        assert_eq!(
            add_exit(&mut game, "start", "up", "roof"),
            Err(EditError::UnknownLocation { id: "roof".into() })
        );
        assert_eq!(
            add_exit(&mut game, "cellar", "up", "start"),
            Err(EditError::UnknownLocation { id: "cellar".into() })
        );
    }

    #[test]
    fn add_exit_replaces_direction() {
        let mut game = two_room_game();
        let previous = add_exit(&mut game, "start", "north", "start").unwrap();
        assert_eq!(previous.as_deref(), Some("hall"));
        assert_eq!(game.locations["start"].exits["north"], "start");
    }

    #[test]
    fn remove_exit_reports_unknown_direction() {
        let mut game = two_room_game();
        assert_eq!(remove_exit(&mut game, "start", "north").unwrap(), "hall");
        assert!(matches!(
            remove_exit(&mut game, "start", "north"),
            Err(EditError::UnknownExit { .. })
        ));
    }

    #[test]
    fn remove_item_clears_placements_and_inventory() {
        let mut game = two_room_game();
        let (id, item) = create_item("lamp", "Lamp", "Brass.").into_entry();
        add_item(&mut game, id, item).unwrap();
        place_item(&mut game, "hall", "lamp").unwrap();
        game.player.inventory.push("lamp".into());

        let removed = remove_item(&mut game, "lamp").unwrap();
        assert_eq!(removed.name, "Lamp");
        assert!(game.locations["hall"].items.is_empty());
        assert!(game.player.inventory.is_empty());
    }

    #[test]
    fn place_item_requires_definition() {
        let mut game = create_empty_game();
        assert_eq!(
            place_item(&mut game, "start", "sword"),
            Err(EditError::UnknownItem { id: "sword".into() })
        );
    }

    #[test]
    fn game_flags() {
        let mut game = create_empty_game();
        assert_eq!(set_game_flag(&mut game, "door_open", false), None);
        assert_eq!(set_game_flag(&mut game, "door_open", true), Some(false));
        assert_eq!(remove_game_flag(&mut game, "door_open"), Ok(true));
        assert!(matches!(
            remove_game_flag(&mut game, "door_open"),
            Err(EditError::UnknownFlag { .. })
        ));
    }
}
