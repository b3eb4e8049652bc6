use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::ProxyOrder;

/// Booking as posted by the form handler. Every field is optional on the wire;
/// validation decides what is actually required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct OrderRequest {
    pub id: Option<String>,
    pub impression: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub club_school: Option<String>,
    pub contact_number: Option<String>,
    pub contact_email: Option<String>,
    pub payment_option: Option<String>,
    pub costing: Option<String>,
    pub colour: Option<String>,
    pub colour_selection: Option<String>,
    pub logo_image: Option<String>,
    pub additional_notes: Option<String>,
}

impl OrderRequest {
    /// `colour` wins over `colour_selection`; blank values fall through.
    pub fn colour(&self) -> Option<&str> {
        [self.colour.as_deref(), self.colour_selection.as_deref()]
            .into_iter()
            .flatten()
            .find(|c| !c.is_empty())
    }
}

/// Partial update. The outer `Option` tells whether the key was sent at all;
/// an explicit `null` clears the field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderUpdate {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub first_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub surname: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub club_school: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_number: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub contact_email: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub payment_option: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub costing: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub colour: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub colour_selection: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub logo_image: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub additional_notes: Option<Option<String>>,
}

impl OrderUpdate {
    /// Present when either colour key was sent; a blank or null `colour`
    /// falls through to `colour_selection`.
    pub fn colour(&self) -> Option<&str> {
        if self.colour.is_none() && self.colour_selection.is_none() {
            return None;
        }
        let pick = [&self.colour, &self.colour_selection]
            .into_iter()
            .filter_map(|c| c.as_ref().and_then(|v| v.as_deref()))
            .find(|c| !c.is_empty());
        Some(pick.unwrap_or_default())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderList {
    pub count: usize,
    pub orders: Vec<ProxyOrder>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    pub id: String,
    pub stored_fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedOrder {
    pub id: String,
    pub updated: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Kpis {
    pub total_orders: usize,
    pub distinct_costing_types: usize,
    pub costing_breakdown: BTreeMap<String, usize>,
    pub example_popular_costing: Option<String>,
}
