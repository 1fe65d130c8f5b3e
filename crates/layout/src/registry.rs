//! Field Layout Registry
//!
//! Owns the live field instances created from a geometry specification
//! and the selection-group slot. Instances survive hot-reloads: a
//! reloaded specification repositions existing fields in place instead
//! of recreating them, so values entered so far are never lost.

use crate::group::{group_of, ExclusiveGroups, PAYMENT_GROUP, PAYMENT_GROUP_PREFIX};
use crate::renderer::RenderRequest;
use crate::{load_fields, FieldError, FieldKind, FieldSpec, Result};
use log::info;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Current value of a live field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// The zero value for a field kind (`""` / unchecked)
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Checkbox | FieldKind::RadioButton => FieldValue::Checked(false),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }

    /// Whether this value would produce visible output: non-blank text
    /// or a set toggle.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Checked(checked) => *checked,
        }
    }
}

/// Live, mutable counterpart of a [`FieldSpec`]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
    pub spec: FieldSpec,
    pub value: FieldValue,
}

/// The set of live field instances plus the selection-group slot.
#[derive(Debug, Default)]
pub struct Registry {
    fields: Vec<FieldInstance>,
    groups: ExclusiveGroups,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from freshly parsed specs.
    pub fn from_specs(specs: Vec<FieldSpec>) -> Self {
        let mut registry = Self::new();
        registry.reconcile(specs);
        registry
    }

    /// Bring the live instances in line with a reloaded specification.
    ///
    /// Keys already present are updated in place (rect, max length,
    /// alignment) and keep their value; new keys get a fresh instance at
    /// its zero value; keys no longer present are dropped. Applying the
    /// same specs twice changes nothing the second time.
    pub fn reconcile(&mut self, specs: Vec<FieldSpec>) {
        let keys: HashSet<&str> = specs.iter().map(|spec| spec.key.as_str()).collect();
        self.fields
            .retain(|field| keys.contains(field.spec.key.as_str()));

        // A vanished member cannot stay the selected option
        if let Some(option) = self.groups.get(PAYMENT_GROUP).map(str::to_string) {
            let member_key = format!("{PAYMENT_GROUP_PREFIX}{option}");
            if !keys.contains(member_key.as_str()) {
                self.groups.deselect(PAYMENT_GROUP, &option);
            }
        }

        for spec in specs {
            match self.position_of(&spec.key) {
                Some(index) => {
                    let instance = &mut self.fields[index];
                    if instance.spec.kind != spec.kind {
                        // The old value's type no longer makes sense
                        instance.value = FieldValue::zero(spec.kind);
                    } else if let FieldValue::Text(ref mut text) = instance.value {
                        truncate_chars(text, spec.max_length);
                    }
                    instance.spec = spec;
                }
                None => {
                    self.fields.push(FieldInstance {
                        value: FieldValue::zero(spec.kind),
                        spec,
                    });
                }
            }
        }
    }

    /// Re-read the geometry resource and reconcile.
    ///
    /// On a parse failure the current instances are left untouched and
    /// the error is returned for the caller to surface.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let specs = load_fields(path)?;
        self.reconcile(specs);
        Ok(())
    }

    /// Set the value of a text field, truncated to its max length.
    pub fn set_text(&mut self, key: &str, text: &str) -> std::result::Result<(), FieldError> {
        let index = self
            .position_of(key)
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))?;
        let instance = &mut self.fields[index];

        if instance.spec.kind != FieldKind::Text {
            return Err(FieldError::NotText(key.to_string()));
        }

        let mut text = text.to_string();
        truncate_chars(&mut text, instance.spec.max_length);
        instance.value = FieldValue::Text(text);
        Ok(())
    }

    /// Set the checked state of a checkbox or radio button.
    ///
    /// Checking a selection-group member clears its siblings and moves
    /// the group slot to this member's option; unchecking it directly
    /// releases the slot only if this member was holding it.
    pub fn set_checked(&mut self, key: &str, checked: bool) -> std::result::Result<(), FieldError> {
        let index = self
            .position_of(key)
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))?;
        let kind = self.fields[index].spec.kind;

        if kind == FieldKind::Text {
            return Err(FieldError::NotToggle(key.to_string()));
        }

        if kind == FieldKind::RadioButton {
            if let Some((group, option)) = group_of(key).map(|(g, o)| (g, o.to_string())) {
                if checked {
                    for field in &mut self.fields {
                        if field.spec.kind == FieldKind::RadioButton
                            && group_of(&field.spec.key).map(|(g, _)| g) == Some(group)
                        {
                            field.value = FieldValue::Checked(false);
                        }
                    }
                    self.fields[index].value = FieldValue::Checked(true);
                    self.groups.select(group, &option);
                } else {
                    self.fields[index].value = FieldValue::Checked(false);
                    self.groups.deselect(group, &option);
                }
                return Ok(());
            }
        }

        self.fields[index].value = FieldValue::Checked(checked);
        Ok(())
    }

    /// Read-only snapshot of every field's current value.
    pub fn values(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .map(|field| (field.spec.key.clone(), field.value.clone()))
            .collect()
    }

    /// Currently selected option of a group, if any.
    pub fn selected(&self, group: &str) -> Option<&str> {
        self.groups.get(group)
    }

    /// Reset every field to its zero value and drop group selections.
    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.value = FieldValue::zero(field.spec.kind);
        }
        self.groups.clear();
        info!("all fields cleared");
    }

    /// Capture everything one render action needs.
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            fields: self.fields.clone(),
            selected: self.selected(PAYMENT_GROUP).map(str::to_string),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldInstance> {
        self.fields.iter().find(|field| field.spec.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldInstance> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.spec.key == key)
    }
}

/// Truncate a string to at most `max` characters; 0 means unlimited.
fn truncate_chars(text: &mut String, max: usize) {
    if max == 0 {
        return;
    }
    if let Some((byte_index, _)) = text.char_indices().nth(max) {
        text.truncate(byte_index);
    }
}
