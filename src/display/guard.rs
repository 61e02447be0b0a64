//! Visibility predicates for conditional display.
//!
//! A guard decides per element whether it should be shown, or kept in the
//! document at all. Guards are plain
//! Rust predicates; no markup-supplied expression is ever evaluated.

use crate::host::Host;

/// Predicate deciding whether an element should be visible.
///
/// # Example
///
/// ```rust
/// use segue::display::VisibilityGuard;
///
/// let even = VisibilityGuard::new(|n: &u32| n % 2 == 0);
/// let small = VisibilityGuard::new(|n: &u32| *n < 10);
/// let guard = even.and(small);
///
/// assert!(guard.check(&4));
/// assert!(!guard.check(&12));
/// assert!(!guard.check(&3));
/// ```
pub struct VisibilityGuard<E> {
    predicate: Box<dyn Fn(&E) -> bool>,
}

impl<E: 'static> VisibilityGuard<E> {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        VisibilityGuard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that accepts every element.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Guard that accepts elements whose attribute `name` equals `value`.
    ///
    /// A missing attribute never matches.
    pub fn attribute_equals<H>(host: H, name: &str, value: &str) -> Self
    where
        H: Host<Element = E>,
    {
        let name = name.to_string();
        let value = value.to_string();
        Self::new(move |el| host.attribute(el, &name).as_deref() == Some(value.as_str()))
    }

    /// Guard that accepts elements carrying attribute `name`, whatever its
    /// value.
    pub fn has_attribute<H>(host: H, name: &str) -> Self
    where
        H: Host<Element = E>,
    {
        let name = name.to_string();
        Self::new(move |el| host.attribute(el, &name).is_some())
    }

    pub fn check(&self, element: &E) -> bool {
        (self.predicate)(element)
    }

    pub fn and(self, other: Self) -> Self {
        Self::new(move |el| self.check(el) && other.check(el))
    }

    pub fn or(self, other: Self) -> Self {
        Self::new(move |el| self.check(el) || other.check(el))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::new(move |el| !self.check(el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryDocument;

    #[test]
    fn guard_allows_matching_elements() {
        let guard = VisibilityGuard::new(|n: &u32| *n == 1);

        assert!(guard.check(&1));
        assert!(!guard.check(&2));
    }

    #[test]
    fn combinators_compose() {
        let positive = VisibilityGuard::new(|n: &i32| *n > 0);
        let guard = positive.not().or(VisibilityGuard::new(|n: &i32| *n == 5));

        assert!(guard.check(&-3));
        assert!(guard.check(&5));
        assert!(!guard.check(&4));
        assert!(VisibilityGuard::<i32>::always().check(&0));
    }

    #[test]
    fn attribute_guards_read_through_the_host() {
        let doc = MemoryDocument::new();
        let admin = doc.create_element("div");
        let guest = doc.create_element("div");
        let bare = doc.create_element("div");
        doc.set_attribute(&admin, "data-role", "admin");
        doc.set_attribute(&guest, "data-role", "guest");

        let is_admin = VisibilityGuard::attribute_equals(doc.clone(), "data-role", "admin");
        assert!(is_admin.check(&admin));
        assert!(!is_admin.check(&guest));
        assert!(!is_admin.check(&bare));

        let has_role = VisibilityGuard::has_attribute(doc, "data-role");
        assert!(has_role.check(&guest));
        assert!(!has_role.check(&bare));
    }
}
