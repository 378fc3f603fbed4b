//! Dynamic button matching
//!
//! A button is dynamic when it is URL-capable, its target URL carries a
//! `{{...}}` token, and its index fits the three-slot URL button window.
//! Dynamic buttons need a per-node URL parameter; all other buttons render
//! statically and never ask for input.

use crate::template::model::Button;

/// Number of URL button parameter slots a node carries
pub const URL_BUTTON_SLOTS: usize = 3;

/// Returns true when the button's type or sub-type marks it as a URL button.
#[must_use]
pub fn is_url_capable(button: &Button) -> bool {
    button.kind.trim().to_uppercase() == "URL" || button.sub_type.trim().to_lowercase() == "url"
}

/// The button's index as a URL parameter slot, if it lies in `0..3`.
#[must_use]
pub fn slot_index(button: &Button) -> Option<usize> {
    button
        .index
        .and_then(|index| usize::try_from(index).ok())
        .filter(|&index| index < URL_BUTTON_SLOTS)
}

/// Returns true when the button needs a runtime URL parameter.
#[must_use]
pub fn is_dynamic(button: &Button) -> bool {
    is_url_capable(button) && button.parameter_value.contains("{{") && slot_index(button).is_some()
}

/// Select dynamic buttons, ordered by index.
///
/// The sort is stable, so duplicated indices keep their template order.
#[must_use]
pub fn select_dynamic_buttons(buttons: &[Button]) -> Vec<&Button> {
    let mut dynamic: Vec<&Button> = buttons.iter().filter(|b| is_dynamic(b)).collect();
    dynamic.sort_by_key(|b| slot_index(b));
    dynamic
}

/// Whether a button is ready to send.
///
/// Static buttons are always ready. A dynamic button is ready once its URL
/// parameter slot holds a non-blank value.
#[must_use]
pub fn button_readiness(button: &Button, url_params: &[String; URL_BUTTON_SLOTS]) -> bool {
    if !is_dynamic(button) {
        return true;
    }
    slot_index(button)
        .and_then(|index| url_params.get(index))
        .is_some_and(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{quick_reply_button, url_button};

    fn params(values: [&str; 3]) -> [String; 3] {
        values.map(str::to_string)
    }

    #[test]
    fn test_url_type_is_case_and_whitespace_insensitive() {
        let mut button = url_button(0, "https://a.com/{{1}}");
        button.kind = "  url ".to_string();
        assert!(is_url_capable(&button));
    }

    #[test]
    fn test_sub_type_url_is_url_capable() {
        let button = Button {
            kind: "BUTTON".to_string(),
            sub_type: " URL".to_string(),
            index: Some(1),
            parameter_value: "https://a.com/{{1}}".to_string(),
            ..Button::default()
        };
        assert!(is_url_capable(&button));
        assert!(is_dynamic(&button));
    }

    #[test]
    fn test_static_url_is_not_dynamic() {
        let button = url_button(0, "https://a.com/fixed");
        assert!(is_url_capable(&button));
        assert!(!is_dynamic(&button));
    }

    #[test]
    fn test_quick_reply_with_token_is_not_dynamic() {
        let mut button = quick_reply_button(0);
        button.parameter_value = "{{1}}".to_string();
        assert!(!is_dynamic(&button));
    }

    #[test]
    fn test_index_out_of_window_rejected() {
        assert!(!is_dynamic(&url_button(3, "https://a.com/{{1}}")));
        assert!(!is_dynamic(&url_button(-1, "https://a.com/{{1}}")));

        let mut missing = url_button(0, "https://a.com/{{1}}");
        missing.index = None;
        assert!(!is_dynamic(&missing));
    }

    #[test]
    fn test_select_sorts_by_index() {
        let buttons = vec![
            url_button(2, "https://c.com/{{1}}"),
            quick_reply_button(1),
            url_button(0, "https://a.com/{{1}}"),
            url_button(7, "https://z.com/{{1}}"),
        ];
        let selected = select_dynamic_buttons(&buttons);
        let indices: Vec<_> = selected.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_select_is_stable_for_duplicate_indices() {
        let mut first = url_button(1, "https://a.com/{{1}}");
        first.text = "first".to_string();
        let mut second = url_button(1, "https://b.com/{{1}}");
        second.text = "second".to_string();
        let buttons = vec![first, second];

        let selected = select_dynamic_buttons(&buttons);
        assert_eq!(selected[0].text, "first");
        assert_eq!(selected[1].text, "second");
    }

    #[test]
    fn test_select_empty() {
        assert!(select_dynamic_buttons(&[]).is_empty());
    }

    #[test]
    fn test_static_button_always_ready() {
        let button = quick_reply_button(1);
        assert!(button_readiness(&button, &params(["", "", ""])));
    }

    #[test]
    fn test_dynamic_button_ready_only_with_value() {
        let button = url_button(1, "https://a.com/{{1}}");
        assert!(!button_readiness(&button, &params(["x", "", "x"])));
        assert!(!button_readiness(&button, &params(["", "   ", ""])));
        assert!(button_readiness(&button, &params(["", "abc", ""])));
    }
}
