//! A small complete game built with the factories.

use crate::factory::{create_empty_game, create_item, create_location};
use crate::schema::GameDocument;

/// "Tower of Dreams": three stacked locations and a key waiting at the top.
pub fn tower_of_dreams() -> GameDocument {
    let mut game = create_empty_game();

    game.meta.title = "Tower of Dreams".to_string();
    game.meta.author = "AdventureGPT".to_string();
    game.meta.description = "A simple adventure in an ancient tower.".to_string();

    let start = &mut game.locations["start"];
    start.title = "Tower Base".to_string();
    start.description = "A massive stone tower looms above you.".to_string();
    start.exits.insert("north".into(), "tower_stairs".into());

    let (id, stairs) = create_location(
        "tower_stairs",
        "Tower Stairs",
        "Ancient stone stairs spiral upward into darkness.",
    )
    .image("tower_stairs.png")
    .exits([("down", "start"), ("up", "tower_top")])
    .into_entry();
    game.locations.insert(id, stairs);

    let (id, top) = create_location(
        "tower_top",
        "Tower Top",
        "You stand atop the ancient tower, with a magnificent view of the lands below.",
    )
    .image("tower_top.png")
    .exit("down", "tower_stairs")
    .item("ancient_key")
    .into_entry();
    game.locations.insert(id, top);

    let (id, key) = create_item(
        "ancient_key",
        "Ancient Key",
        "A weathered bronze key with mysterious runes.",
    )
    .useable(true)
    .use_text("The key glows briefly with magical energy.")
    .into_entry();
    game.inventory_items.insert(id, key);

    game
}
