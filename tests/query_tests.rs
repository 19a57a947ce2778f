//! Integration tests for query building
//!
//! These tests drive the public builder API over derived models and check
//! the rendered GraphQL text.

use assert_matches::assert_matches;
use graphql_builder::{
    ArgumentKind, GraphQLEnum, GraphQLModel, PropertyKind, Query, QueryError, ROOT_ARGUMENTS,
    resolve,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Models
// ============================================================================

#[derive(GraphQLEnum, Clone, Copy, Debug, Default, PartialEq)]
enum Category {
    #[default]
    News,
    Art,
}

#[derive(GraphQLModel, Debug, Default)]
#[graphql(schema_type = "blog_post")]
struct BlogPost {
    #[graphql(field = "title")]
    title: String,

    #[graphql(field = "category")]
    category: Category,

    #[graphql(field = "author")]
    author: Author,

    unmapped_field: String,
}

#[derive(GraphQLModel, Debug, Default)]
struct Author {
    #[graphql(field = "display_name")]
    display_name: String,
}

#[derive(GraphQLModel, Debug, Default)]
#[graphql(rename_all = "camelCase")]
struct Comment {
    #[graphql(field)]
    comment_body: String,

    #[graphql(field)]
    like_count: u32,

    #[graphql(field = "secret", ignore)]
    moderation_note: String,

    #[graphql(field)]
    pinned: bool,

    #[graphql(field)]
    attachments: Vec<String>,

    #[graphql(skip)]
    #[allow(dead_code)]
    cache: std::collections::HashMap<String, String>,
}

// ============================================================================
// Field mapping
// ============================================================================

mod field_mapping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_maps_property_name_to_field_name() {
        let query = Query::<BlogPost>::new().build().unwrap();
        assert!(query.contains("title"));
    }

    #[test]
    fn test_does_not_contain_unmapped_properties() {
        let query = Query::<BlogPost>::new().build().unwrap();
        assert!(!query.to_lowercase().contains("unmapped"));
    }

    #[test]
    fn test_full_document() {
        let query = Query::<BlogPost>::new().build().unwrap();
        assert_eq!(
            query,
            "blog_post {\n    title\n    category\n    author {\n        display_name\n    }\n}\n"
        );
    }

    #[test]
    fn test_map_uses_property_without_attribute() {
        let query = Query::<BlogPost>::new()
            .add_field_mapping("unmapped_field", "unmapped_field")
            .unwrap()
            .build()
            .unwrap();
        assert!(query.contains("    unmapped_field\n"));
    }

    #[test]
    fn test_ignore_removes_field() {
        let query = Query::<BlogPost>::new().ignore("title").unwrap().build().unwrap();
        assert!(!query.contains("title"));
        assert!(query.contains("category"));
    }

    #[test]
    fn test_ignore_whole_nested_selection() {
        let query = Query::<BlogPost>::new().ignore("author").unwrap().build().unwrap();
        assert!(!query.contains("author"));
        assert!(!query.contains("display_name"));
    }

    #[test]
    fn test_unknown_selector_fails() {
        assert_matches!(
            Query::<BlogPost>::new().ignore("subtitle"),
            Err(QueryError::PropertyResolution { ref model, .. }) if model == "BlogPost"
        );
    }

    #[test]
    fn test_rename_all_and_attribute_flags() {
        let query = Query::<Comment>::new().build().unwrap();
        assert_eq!(
            query,
            "comment {\n    commentBody\n    likeCount\n    attachments\n}\n"
        );
    }

    #[test]
    fn test_ignored_attribute_can_be_mapped_back() {
        let query = Query::<Comment>::new()
            .add_field_mapping("moderation_note", "secret")
            .unwrap()
            .build()
            .unwrap();
        assert!(query.contains("    secret\n"));
    }

    #[test]
    fn test_skipped_field_is_not_selectable() {
        assert_matches!(
            Query::<Comment>::new().add_field_mapping("cache", "cache"),
            Err(QueryError::PropertyResolution { .. })
        );
    }

    #[test]
    fn test_resolved_kinds() {
        let kinds: Vec<(String, PropertyKind)> = resolve::<Comment>()
            .into_iter()
            .map(|p| (p.field_name, p.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("commentBody".to_string(), PropertyKind::String),
                ("likeCount".to_string(), PropertyKind::Number),
                ("pinned".to_string(), PropertyKind::Unknown),
                ("attachments".to_string(), PropertyKind::Object),
            ]
        );

        let post = resolve::<BlogPost>();
        assert_eq!(post[1].kind, PropertyKind::Enum);
        assert_eq!(post[2].kind, PropertyKind::NestedType);
        assert_eq!(post[2].children[0].source_name, "display_name");
    }
}

// ============================================================================
// Type names and operations
// ============================================================================

mod naming {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_type_attribute_is_default() {
        let query = Query::<BlogPost>::new();
        assert_eq!(query.type_name(), "blog_post");
    }

    #[test]
    fn test_without_attribute_uses_lowercased_type_name() {
        let query = Query::<Author>::new().build().unwrap();
        assert!(query.starts_with("author {"));
    }

    #[test]
    fn test_override_replaces_type_name() {
        let query = Query::<BlogPost>::new()
            .set_type_name("overriden_type")
            .build()
            .unwrap();
        assert!(query.contains("overriden_type {"));
        assert!(!query.contains("blog_post"));
    }

    #[test]
    fn test_operation_name_adds_syntax() {
        let query = Query::<BlogPost>::new()
            .set_operation_name("GetBlogPosts")
            .build()
            .unwrap();
        assert!(query.starts_with("query GetBlogPosts {\n    blog_post {\n"));
        assert!(query.ends_with("    }\n}\n"));
    }
}

// ============================================================================
// Arguments
// ============================================================================

mod arguments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_argument_with_property() {
        let query = Query::<BlogPost>::new()
            .with_field_argument("title", "length", 5)
            .unwrap()
            .build()
            .unwrap();
        assert!(query.contains("title(length: 5)"));
    }

    #[test]
    fn test_argument_without_property() {
        let query = Query::<BlogPost>::new()
            .with_argument("id", 1)
            .build()
            .unwrap();
        assert!(query.contains("blog_post(id: 1)"));
    }

    #[test]
    fn test_multiple_root_arguments_keep_order() {
        let query = Query::<BlogPost>::new()
            .with_argument("id", 2)
            .with_argument("before", "8/31/2020")
            .build()
            .unwrap();
        assert!(query.contains("blog_post(id: 2, before: \"8/31/2020\") {"));
    }

    #[test]
    fn test_enum_argument_uses_name() {
        let query = Query::<BlogPost>::new()
            .with_argument("category", Category::Art)
            .build()
            .unwrap();
        assert!(query.contains("blog_post(category: Art)"));

        let query = Query::<BlogPost>::new()
            .add_argument(None, "category", Category::News)
            .unwrap();
        let arguments = query.arguments(ROOT_ARGUMENTS).unwrap();
        assert_eq!(arguments[0].kind(), ArgumentKind::Enum);
    }

    #[test]
    fn test_nested_field_argument() {
        let query = Query::<BlogPost>::new()
            .add_argument(Some("author"), "first", 3)
            .unwrap()
            .build()
            .unwrap();
        assert!(query.contains("    author(first: 3) {\n"));
    }

    #[test]
    fn test_object_argument_is_dropped() {
        let query = Query::<BlogPost>::new()
            .with_argument("where", serde_json::json!({"title": "x"}))
            .with_argument("id", 4)
            .build()
            .unwrap();
        assert!(query.contains("blog_post(id: 4) {"));
        assert!(!query.contains("where"));
    }
}

// ============================================================================
// Joined queries
// ============================================================================

mod joins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_with_aliases_includes_both_queries() {
        let news = Query::<BlogPost>::new()
            .set_alias("news_articles")
            .with_argument("category", Category::News);
        let art = Query::<BlogPost>::new()
            .set_alias("art_pieces")
            .with_argument("category", Category::Art);

        let query = news.join(art).build().unwrap();
        assert!(query.starts_with("{\n"));
        assert!(query.contains("    news_articles: blog_post(category: News) {\n"));
        assert!(query.contains("    art_pieces: blog_post(category: Art) {\n"));
        assert!(query.find("news_articles") < query.find("art_pieces"));
    }

    #[test]
    fn test_join_without_aliases_is_ambiguous() {
        let news = Query::<BlogPost>::new().with_argument("category", Category::News);
        let art = Query::<BlogPost>::new().with_argument("category", Category::Art);

        assert_matches!(
            news.join(art).build(),
            Err(QueryError::AmbiguousFields { ref type_names }) if type_names == &["blog_post".to_string()]
        );
    }

    #[test]
    fn test_join_different_models_under_operation() {
        let query = Query::<BlogPost>::new()
            .ignore("author")
            .unwrap()
            .set_operation_name("Dashboard")
            .join(Query::<Author>::new().with_argument("id", 9))
            .build()
            .unwrap();
        assert_eq!(
            query,
            "query Dashboard {\n    blog_post {\n        title\n        category\n    }\n    author(id: 9) {\n        display_name\n    }\n}\n"
        );
    }

    #[test]
    fn test_sibling_operation_name_is_not_read() {
        let query = Query::<Author>::new()
            .join(Query::<BlogPost>::new().set_operation_name("Ignored"))
            .build()
            .unwrap();
        assert!(!query.contains("Ignored"));
        assert!(query.starts_with("{\n"));
    }
}
