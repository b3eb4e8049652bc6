use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::{
    document::{FormDocument, Selector},
    payload::BookingPayload,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldTableError {
    #[error("field mapping has an empty name")]
    EmptyName,
    #[error("field `{0}` is mapped more than once")]
    Duplicate(String),
    #[error("booking field `{0}` has no mapping")]
    Missing(String),
}

/// Where one logical booking field is read from.
///
/// `selector` and `fallbacks` are tried in order and the first control that
/// exists supplies the value, even when that value is empty. `alternates`
/// are only consulted when that value came back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub name: String,
    pub selector: Selector,
    pub fallbacks: Vec<Selector>,
    pub alternates: Vec<Selector>,
}

impl FieldMapping {
    /// Maps `name` to the control carrying the same `name` attribute.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: Selector::name(name),
            fallbacks: Vec::new(),
            alternates: Vec::new(),
        }
    }

    pub fn fallback(mut self, selector: Selector) -> Self {
        self.fallbacks.push(selector);
        self
    }

    pub fn alternate(mut self, selector: Selector) -> Self {
        self.alternates.push(selector);
        self
    }

    /// Never fails: a field with no matching control reads as `""`.
    pub fn resolve(&self, doc: &FormDocument) -> String {
        let primary = std::iter::once(&self.selector)
            .chain(&self.fallbacks)
            .find_map(|sel| doc.select(sel))
            .map(|c| c.value.clone())
            .unwrap_or_default();
        if !primary.is_empty() {
            return primary;
        }

        self.alternates
            .iter()
            .filter_map(|sel| doc.select(sel))
            .map(|c| c.value.clone())
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }
}

/// Checked set of field mappings, built once when the handler is set up.
#[derive(Debug, Clone)]
pub struct FieldTable {
    mappings: Vec<FieldMapping>,
}

impl FieldTable {
    pub fn new(mappings: Vec<FieldMapping>) -> Result<Self, FieldTableError> {
        let mut seen = HashSet::new();
        for mapping in &mappings {
            if mapping.name.is_empty() {
                return Err(FieldTableError::EmptyName);
            }
            if !seen.insert(mapping.name.as_str()) {
                return Err(FieldTableError::Duplicate(mapping.name.clone()));
            }
        }
        if let Some(missing) = BookingPayload::FORM_FIELDS
            .iter()
            .find(|name| !seen.contains(**name))
        {
            return Err(FieldTableError::Missing(missing.to_string()));
        }
        Ok(Self { mappings })
    }

    /// The booking page layout: inputs carry both `name` and `id`, the colour
    /// picker may be `colour`, `#colour_select` or `colour_selection`.
    pub fn booking() -> Self {
        let by_id = |name: &str| FieldMapping::new(name).fallback(Selector::id(name));
        let mappings = vec![
            by_id("first_name"),
            by_id("surname"),
            by_id("club_school"),
            by_id("contact_number"),
            by_id("contact_email"),
            FieldMapping::new("payment_option"),
            FieldMapping::new("costing"),
            FieldMapping::new("colour")
                .fallback(Selector::id("colour_select"))
                .alternate(Selector::name("colour_selection")),
            by_id("additional_notes"),
            by_id("logo_select"),
        ];
        Self { mappings }
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn extract(&self, doc: &FormDocument) -> BTreeMap<String, String> {
        self.mappings
            .iter()
            .map(|m| (m.name.clone(), m.resolve(doc)))
            .collect()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        Self::booking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::document::Control;

    #[test]
    fn booking_table_passes_its_own_checks() {
        let table = FieldTable::booking();
        assert!(FieldTable::new(table.mappings().to_vec()).is_ok());
    }

    #[test]
    fn absent_fields_read_as_empty() {
        let fields = FieldTable::booking().extract(&FormDocument::with_form("f"));
        assert_eq!(fields.len(), BookingPayload::FORM_FIELDS.len());
        assert!(fields.values().all(String::is_empty));
    }

    #[test]
    fn falls_back_to_id_when_name_is_missing() {
        let doc = FormDocument::with_form("f").control(Control::with_id("surname", "Doe"));
        let fields = FieldTable::booking().extract(&doc);
        assert_eq!(fields["surname"], "Doe");
    }

    #[test]
    fn empty_colour_uses_colour_selection() {
        let doc = FormDocument::with_form("f")
            .control(Control::named("colour", ""))
            .control(Control::choice("colour_selection", "Galaxy (+ R180)", true));
        assert_eq!(FieldTable::booking().extract(&doc)["colour"], "Galaxy (+ R180)");
    }

    #[test]
    fn found_but_empty_control_does_not_fall_back() {
        let doc = FormDocument::with_form("f")
            .control(Control::named("surname", ""))
            .control(Control::with_id("surname", "Other"));
        assert_eq!(FieldTable::booking().extract(&doc)["surname"], "");
    }

    #[test]
    fn rejects_duplicate_and_missing_mappings() {
        let mut mappings = FieldTable::booking().mappings().to_vec();
        mappings.push(FieldMapping::new("costing"));
        assert_eq!(
            FieldTable::new(mappings).unwrap_err(),
            FieldTableError::Duplicate("costing".into())
        );

        let partial = vec![FieldMapping::new("first_name")];
        assert_eq!(
            FieldTable::new(partial).unwrap_err(),
            FieldTableError::Missing("surname".into())
        );
        assert_eq!(
            FieldTable::new(vec![FieldMapping::new("")]).unwrap_err(),
            FieldTableError::EmptyName
        );
    }
}
