//! Category model: folders and articles in one self-referencing table.

use blog_core::tree::TreeNode;
use blog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
///
/// `children` is never stored; it is filled in by the tree builder.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DbId>,
    pub sort_order: i32,
    pub description: String,
    pub tags: Vec<String>,
    pub url: String,
    pub img_url: String,
    #[serde(with = "blog_core::datetime")]
    pub created_at: Timestamp,
    #[serde(with = "blog_core::datetime")]
    pub updated_at: Timestamp,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Category>,
}

impl TreeNode for Category {
    type SortKey = (i32, DbId);

    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.sort_order, self.id)
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

/// Body for both create and update. Updates replace every field, so an
/// absent `parent_id` moves the category to the top level.
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub img_url: String,
}

/// Filters for listing categories. `None` means "no filter".
#[derive(Debug, Default, Clone)]
pub struct CategoryFilter {
    pub parent_id: Option<DbId>,
    pub category_type: Option<String>,
    pub keyword: Option<String>,
}

/// A tag and the number of categories carrying it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HotTag {
    pub name: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: DbId, parent_id: Option<DbId>) -> Category {
        Category {
            id,
            name: format!("c{id}"),
            category_type: "folder".to_string(),
            parent_id,
            sort_order: 0,
            description: String::new(),
            tags: Vec::new(),
            url: String::new(),
            img_url: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            children: Vec::new(),
        }
    }

    #[test]
    fn leaf_omits_children_and_root_omits_parent() {
        let json = serde_json::to_value(category(1, None)).unwrap();
        assert!(json.get("children").is_none());
        assert!(json.get("parent_id").is_none());
        assert_eq!(json["type"], "folder");
    }

    #[test]
    fn built_tree_serializes_nested_children() {
        let roots = blog_core::tree::build_tree(vec![category(1, None), category(2, Some(1))]);
        let json = serde_json::to_value(&roots).unwrap();
        assert_eq!(json[0]["children"][0]["id"], 2);
        assert_eq!(json[0]["children"][0]["parent_id"], 1);
    }

    #[test]
    fn input_defaults_optional_fields() {
        let input: CategoryInput = serde_json::from_str(r#"{"name":"Rust"}"#).unwrap();
        assert_eq!(input.category_type, None);
        assert_eq!(input.sort_order, 0);
        assert!(input.tags.is_empty());
    }
}
