//! Selection-group exclusivity
//!
//! Radio-button fields whose keys carry the reserved prefix form one
//! mutually exclusive group; the option chosen there (e.g. which payment
//! method) is tracked in a single slot per group rather than derived
//! from the member booleans.

use std::collections::HashMap;

/// Reserved key prefix marking membership of the payment-method group.
pub const PAYMENT_GROUP_PREFIX: &str = "forma_pago_";

/// Group name under which the payment-method selection is tracked.
pub const PAYMENT_GROUP: &str = "forma_pago";

/// Split a field key into its `(group, option)` pair if the key follows
/// the reserved naming convention.
pub fn group_of(key: &str) -> Option<(&'static str, &str)> {
    key.strip_prefix(PAYMENT_GROUP_PREFIX)
        .filter(|option| !option.is_empty())
        .map(|option| (PAYMENT_GROUP, option))
}

/// Single-slot-per-group selection state.
///
/// The slot is only ever mutated through `select`/`deselect`, both driven
/// by toggle operations on member instances; readers get a consistent
/// answer regardless of how many members were flipped along the way.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveGroups {
    selected: HashMap<String, String>,
}

impl ExclusiveGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected option of a group
    pub fn get(&self, group: &str) -> Option<&str> {
        self.selected.get(group).map(String::as_str)
    }

    /// Record `option` as the selected member of `group`
    pub fn select(&mut self, group: &str, option: &str) {
        self.selected.insert(group.to_string(), option.to_string());
    }

    /// Clear the slot, but only if `option` is the member holding it
    pub fn deselect(&mut self, group: &str, option: &str) {
        if self.get(group) == Some(option) {
            self.selected.remove(group);
        }
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
