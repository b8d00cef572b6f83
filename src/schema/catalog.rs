//! The built-in FQL table catalog
//!
//! Static declaration of every queryable table, in documentation order.
//! Indexable columns are the only ones legal in a WHERE clause; the rest
//! may be selected but not filtered on.

use super::types::{Column, FqlType, Schema, TableDef};

impl Schema {
    /// The static FQL catalog. Built once at startup, never mutated.
    pub fn builtin() -> Schema {
        Schema::new(vec![
            TableDef::new(
                "user",
                vec![
                    Column::indexed("uid", FqlType::Int),
                    Column::indexed("username", FqlType::String),
                    Column::indexed("name", FqlType::String),
                    Column::new("first_name", FqlType::String),
                    Column::new("last_name", FqlType::String),
                    Column::new("pic_small", FqlType::String),
                    Column::new("pic_big", FqlType::String),
                    Column::new("pic_square", FqlType::String),
                    Column::new("pic", FqlType::String),
                    Column::new("affiliations", FqlType::Array),
                    Column::new("profile_update_time", FqlType::Int),
                    Column::new("timezone", FqlType::Int),
                    Column::new("birthday", FqlType::String),
                    Column::new("sex", FqlType::String),
                    Column::new("hometown_location", FqlType::Object),
                    Column::new("current_location", FqlType::Object),
                    Column::new("is_app_user", FqlType::Bool),
                    Column::new("has_added_app", FqlType::Bool),
                    Column::new("online_presence", FqlType::String),
                ],
            ),
            TableDef::new(
                "friend",
                vec![
                    Column::indexed("uid1", FqlType::Int),
                    Column::indexed("uid2", FqlType::Int),
                ],
            ),
            TableDef::new(
                "friendlist",
                vec![
                    Column::indexed("flid", FqlType::Int),
                    Column::indexed("owner", FqlType::Int),
                    Column::new("name", FqlType::String),
                ],
            ),
            TableDef::new(
                "friendlist_member",
                vec![
                    Column::indexed("flid", FqlType::Int),
                    Column::indexed("uid", FqlType::Int),
                ],
            ),
            TableDef::new(
                "page",
                vec![
                    Column::indexed("page_id", FqlType::Int),
                    Column::indexed("name", FqlType::String),
                    Column::indexed("username", FqlType::String),
                    Column::new("categories", FqlType::Array),
                    Column::new("pic_small", FqlType::String),
                    Column::new("pic_big", FqlType::String),
                    Column::new("pic", FqlType::String),
                    Column::new("fan_count", FqlType::Int),
                    Column::new("type", FqlType::String),
                    Column::new("website", FqlType::String),
                    Column::new("has_added_app", FqlType::Bool),
                ],
            ),
            TableDef::new(
                "album",
                vec![
                    Column::indexed("aid", FqlType::String),
                    Column::indexed("owner", FqlType::Int),
                    Column::new("cover_pid", FqlType::String),
                    Column::new("name", FqlType::String),
                    Column::new("created", FqlType::Int),
                    Column::new("modified", FqlType::Int),
                    Column::new("description", FqlType::String),
                    Column::new("location", FqlType::String),
                    Column::new("size", FqlType::Int),
                    Column::new("link", FqlType::String),
                    Column::new("visible", FqlType::String),
                ],
            ),
            TableDef::new(
                "photo",
                vec![
                    Column::indexed("pid", FqlType::String),
                    Column::indexed("aid", FqlType::String),
                    Column::indexed("owner", FqlType::Int),
                    Column::new("src_small", FqlType::String),
                    Column::new("src_big", FqlType::String),
                    Column::new("src", FqlType::String),
                    Column::new("link", FqlType::String),
                    Column::new("caption", FqlType::String),
                    Column::new("created", FqlType::Int),
                ],
            ),
            TableDef::new(
                "event",
                vec![
                    Column::indexed("eid", FqlType::Int),
                    Column::indexed("creator", FqlType::Int),
                    Column::new("name", FqlType::String),
                    Column::new("tagline", FqlType::String),
                    Column::new("pic", FqlType::String),
                    Column::new("host", FqlType::String),
                    Column::new("description", FqlType::String),
                    Column::new("event_type", FqlType::String),
                    Column::new("start_time", FqlType::Int),
                    Column::new("end_time", FqlType::Int),
                    Column::new("location", FqlType::String),
                    Column::new("venue", FqlType::Object),
                ],
            ),
            TableDef::new(
                "group",
                vec![
                    Column::indexed("gid", FqlType::Int),
                    Column::indexed("creator", FqlType::Int),
                    Column::new("name", FqlType::String),
                    Column::new("nid", FqlType::Int),
                    Column::new("pic", FqlType::String),
                    Column::new("description", FqlType::String),
                    Column::new("group_type", FqlType::String),
                    Column::new("update_time", FqlType::Int),
                    Column::new("office", FqlType::String),
                    Column::new("website", FqlType::String),
                    Column::new("venue", FqlType::Object),
                ],
            ),
            TableDef::new(
                "status",
                vec![
                    Column::indexed("uid", FqlType::Int),
                    Column::indexed("status_id", FqlType::Int),
                    Column::new("time", FqlType::Int),
                    Column::new("source", FqlType::Int),
                    Column::new("message", FqlType::String),
                ],
            ),
            TableDef::new(
                "comment",
                vec![
                    Column::indexed("xid", FqlType::String),
                    Column::indexed("post_id", FqlType::String),
                    Column::indexed("object_id", FqlType::Int),
                    Column::new("fromid", FqlType::Int),
                    Column::new("time", FqlType::Int),
                    Column::new("text", FqlType::String),
                ],
            ),
            TableDef::new(
                "checkin",
                vec![
                    Column::indexed("checkin_id", FqlType::Int),
                    Column::indexed("author_uid", FqlType::Int),
                    Column::indexed("page_id", FqlType::Int),
                    Column::new("app_id", FqlType::Int),
                    Column::new("post_id", FqlType::Int),
                    Column::new("coords", FqlType::Object),
                    Column::new("timestamp", FqlType::Int),
                    Column::new("tagged_uids", FqlType::Array),
                    Column::new("message", FqlType::String),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_present() {
        let schema = Schema::builtin();
        for table in [
            "user",
            "friend",
            "friendlist",
            "friendlist_member",
            "page",
            "album",
            "photo",
            "event",
            "group",
            "status",
            "comment",
            "checkin",
        ] {
            assert!(schema.table(table).is_some(), "missing table {table}");
        }
    }

    #[test]
    fn test_user_indexable_columns() {
        let schema = Schema::builtin();
        assert!(schema.lookup_column("user", "uid").unwrap().indexable);
        assert!(schema.lookup_column("user", "username").unwrap().indexable);
        assert!(!schema.lookup_column("user", "pic_big").unwrap().indexable);
        assert!(!schema.lookup_column("user", "sex").unwrap().indexable);
    }

    #[test]
    fn test_friend_edges_are_indexable() {
        let schema = Schema::builtin();
        assert!(schema.lookup_column("friend", "uid1").unwrap().indexable);
        assert!(schema.lookup_column("friend", "uid2").unwrap().indexable);
    }

    #[test]
    fn test_structured_column_types() {
        let schema = Schema::builtin();
        let affiliations = schema.lookup_column("user", "affiliations").unwrap();
        assert_eq!(affiliations.fql_type.type_name(), "array");
        let location = schema.lookup_column("user", "current_location").unwrap();
        assert_eq!(location.fql_type.type_name(), "object");
        let app_user = schema.lookup_column("user", "is_app_user").unwrap();
        assert_eq!(app_user.fql_type.type_name(), "bool");
    }
}
