//! Contact-name slot binding
//!
//! At most one body slot can be reserved for the recipient's contact name.
//! The binding is re-derived after every change so it always converges to
//! the same fixed point.

/// The reconciled contact-name binding of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBinding {
    /// Whether a slot is reserved for the contact name
    pub use_profile_name: bool,
    /// 1-based slot reserved for the contact name (inert when disabled)
    pub profile_name_slot: usize,
}

/// Reconcile the contact-name binding against the placeholder count.
///
/// With no placeholders the binding is switched off. The slot is always
/// clamped into `1..=max(placeholder_count, 1)`.
#[must_use]
pub fn reconcile_profile(
    use_profile_name: bool,
    profile_name_slot: usize,
    placeholder_count: usize,
) -> ProfileBinding {
    ProfileBinding {
        use_profile_name: use_profile_name && placeholder_count > 0,
        profile_name_slot: profile_name_slot.clamp(1, placeholder_count.max(1)),
    }
}
