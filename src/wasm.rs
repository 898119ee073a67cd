use crate::aggregate::{self, GroupAvailability, MemberSnapshot};
use crate::config::GridConfig;
use crate::recommend;
use wasm_bindgen::prelude::*;

/// `members` is `[{ id, name, timeBlocks: [{ dayOfWeek, startTime, endTime }] }]`.
/// `grid` is an optional `{ displayStartHour, displayEndHour }`; without it the
/// default display window is used. Returns `{ totalMembers, availability }`.
#[wasm_bindgen(js_name = computeAvailability)]
pub fn compute_availability(members: JsValue, grid: JsValue) -> Result<JsValue, JsValue> {
    let members: Vec<MemberSnapshot> = serde_wasm_bindgen::from_value(members)?;
    let grid: Option<GridConfig> = if grid.is_undefined() || grid.is_null() {
        None
    } else {
        Some(serde_wasm_bindgen::from_value(grid)?)
    };

    let availability = aggregate::compute_grid_availability(&members, grid.as_ref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(serde_wasm_bindgen::to_value(&availability)?)
}

/// Takes the output of `computeAvailability` and returns up to three
/// `{ label, durationMinutes, dayOfWeek, startTime, endTime }`.
#[wasm_bindgen(js_name = recommendTimes)]
pub fn recommend_times(availability: JsValue) -> Result<JsValue, JsValue> {
    let availability: GroupAvailability = serde_wasm_bindgen::from_value(availability)?;

    Ok(serde_wasm_bindgen::to_value(&recommend::recommend(&availability))?)
}
