//! Browser bindings for the organizer page.

use wasm_bindgen::prelude::*;

use crate::submission::allocate_value;

/// Allocates decks from an array of flat submission objects
/// (`PlayerName`, `Deck1` .. `DeckN`) and returns the allocation result.
#[wasm_bindgen]
pub fn allocate(
    submissions: JsValue,
    expected_participants: Option<usize>,
    seed: Option<u64>,
) -> Result<JsValue, JsValue> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(submissions)?;
    let result = allocate_value(value, expected_participants, seed)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
