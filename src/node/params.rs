//! Slot value arrays
//!
//! Body parameters track the template's placeholder count; URL button
//! parameters are pinned to the three-slot button window.

use crate::template::buttons::URL_BUTTON_SLOTS;

/// Reproject slot values onto a new length.
///
/// Values keep their position; new slots are empty and surplus slots are
/// dropped. A vector that already has the target length is returned as-is.
#[must_use]
pub fn resize_params(mut current: Vec<String>, target_len: usize) -> Vec<String> {
    if current.len() != target_len {
        current.resize(target_len, String::new());
    }
    current
}

/// Reproject URL button values onto the fixed three-slot window.
#[must_use]
pub fn resize_url_params(current: Vec<String>) -> [String; URL_BUTTON_SLOTS] {
    let mut values = resize_params(current, URL_BUTTON_SLOTS).into_iter();
    std::array::from_fn(|_| values.next().unwrap_or_default())
}
