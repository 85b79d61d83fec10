/// Human-readable description of the `.advgpt` layout, for help screens.
pub const FORMAT_REFERENCE: &str = r#"AdventureGPT game format (.advgpt)
==================================

An .advgpt file is a UTF-8 JSON document describing one text adventure.

{
  "meta": {
    "title": "Game Title",                  required
    "author": "Author Name",                required
    "description": "Game description",
    "version": "1.0",                       required
    "created": "2024-01-01T00:00:00Z",
    "modified": "2024-01-01T00:00:00Z"
  },
  "start_location": "location_id",          must name a location
  "locations": {
    "location_id": {
      "title": "Location Title",            required
      "description": "What the player sees", required
      "image": "images/location.png",
      "exits": {                            required, may be empty
        "north": "other_location_id"        target must name a location
      },
      "items": ["item_id"],
      "flags_required": {"flag_name": true},
      "flags_set": {"flag_name": true},
      "first_visit_text": "Shown on the first visit only",
      "visited": false
    }
  },
  "inventory_items": {
    "item_id": {
      "name": "Item Name",
      "description": "Item description",
      "takeable": true,
      "useable": false,
      "use_text": "Shown when the item is used",
      "use_flags_required": {"flag_name": true},
      "use_flags_set": {"flag_name": true}
    }
  },
  "game_flags": {"flag_name": false},
  "player": {
    "inventory": ["item_id"],               required
    "current_location": "location_id",      required, must name a location
    "flags": {"personal_flag": true}        required
  }
}

Locations are joined by exits keyed by a free-form direction (north, up,
through the door, ...). Items are placed in locations and picked up into the
player's inventory. Flags gate access to locations and item use, and are set
by visiting locations or using items. Image paths are relative to the game
file and ship alongside it.
"#;

/// The format reference text.
pub fn format_reference() -> &'static str {
    FORMAT_REFERENCE
}
