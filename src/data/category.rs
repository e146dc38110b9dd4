//! Category groups and their categories

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named group owning categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A budget category
///
/// For lookups a category is identified by its name, optionally qualified by
/// the name of its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category_group_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
