//! Immediate show/hide helpers.
//!
//! Hiding remembers the element's visible `display` value in the
//! [`DISPLAY_ATTRIBUTE`] attribute so that showing it again restores the
//! same layout mode. Elements that were never hidden this way are shown as
//! `block`.

mod guard;

pub use guard::VisibilityGuard;

use crate::core::StyleProperty;
use crate::host::Host;

/// Attribute holding the display value of a hidden element.
pub const DISPLAY_ATTRIBUTE: &str = "data-display";

const DEFAULT_DISPLAY: &str = "block";
const NONE: &str = "none";

/// Whether `element` currently has a visible inline display value.
pub fn is_visible<H: Host>(host: &H, element: &H::Element) -> bool {
    let display = host.style(element, StyleProperty::Display);
    !display.is_empty() && display != NONE
}

/// Show `element`, restoring the display value saved by [`hide`].
///
/// Does nothing if the element is already visible.
pub fn show<H: Host>(host: &H, element: &H::Element) {
    if is_visible(host, element) {
        return;
    }
    let display = host
        .attribute(element, DISPLAY_ATTRIBUTE)
        .unwrap_or_else(|| DEFAULT_DISPLAY.to_string());
    host.remove_attribute(element, DISPLAY_ATTRIBUTE);
    host.set_style(element, StyleProperty::Display, &display);
}

/// Hide `element`, remembering its visible display value.
pub fn hide<H: Host>(host: &H, element: &H::Element) {
    if is_visible(host, element) {
        let display = host.style(element, StyleProperty::Display);
        host.set_attribute(element, DISPLAY_ATTRIBUTE, &display);
    }
    host.set_style(element, StyleProperty::Display, NONE);
}

/// Hide a visible element or show a hidden one. Returns the new visibility.
pub fn toggle<H: Host>(host: &H, element: &H::Element) -> bool {
    if is_visible(host, element) {
        hide(host, element);
        false
    } else {
        show(host, element);
        true
    }
}

/// Show every element `guard` accepts and hide the rest.
///
/// Returns how many elements were shown.
pub fn show_if<'a, H, I>(host: &H, elements: I, guard: &VisibilityGuard<H::Element>) -> usize
where
    H: Host,
    I: IntoIterator<Item = &'a H::Element>,
{
    let mut shown = 0;
    for element in elements {
        if guard.check(element) {
            show(host, element);
            shown += 1;
        } else {
            hide(host, element);
        }
    }
    log::trace!("show_if: {shown} shown");
    shown
}

/// Remove every element `guard` rejects from the document.
///
/// Accepted elements are left untouched. Returns how many elements were
/// checked, kept or removed.
pub fn keep_if<'a, H, I>(host: &H, elements: I, guard: &VisibilityGuard<H::Element>) -> usize
where
    H: Host,
    I: IntoIterator<Item = &'a H::Element>,
{
    let mut processed = 0;
    let mut removed = 0;
    for element in elements {
        if !guard.check(element) {
            host.remove_element(element);
            removed += 1;
        }
        processed += 1;
    }
    log::trace!("keep_if: {removed} of {processed} removed");
    processed
}
