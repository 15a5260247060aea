use serde::{Deserialize, Serialize};

use super::Denomination;

/// A stamp as listed by `/api/stamps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    #[serde(rename = "stamp_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "stampSKU", default)]
    pub sku: Option<i64>,
    #[serde(default)]
    pub meta: StampMeta,
    pub release: StampRelease,
    #[serde(default)]
    pub images: StampImages,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampMeta {
    #[serde(default)]
    pub denomination: Option<Denomination>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub perforation: Option<bool>,
    #[serde(default)]
    pub stamps_per_pane: Option<i32>,
    #[serde(default)]
    pub themes: Option<String>,
    #[serde(default)]
    pub europa: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampRelease {
    pub year: i32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub print_quantity: Option<i64>,
    #[serde(rename = "isMassIssue", default)]
    pub is_mass_issue: Option<bool>,
    #[serde(rename = "isAvailable", default)]
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StampImages {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub pane: Option<String>,
}
