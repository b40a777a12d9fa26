//! Model factories with standard test values.
//!
//! The returned models are not persisted, see [`data`](super::data) for insertion.

use chrono::NaiveDateTime;

use crate::{
    constant::TEST_TIMESTAMP,
    fixtures::news::NewsFixtures,
    model::{CommentModel, NewsModel, NewsTagParamModel, NewsTypeModel, TagModel},
};

/// The standard audit timestamp as a database value.
pub fn test_timestamp() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(TEST_TIMESTAMP, "%Y-%m-%d %H:%M:%S").unwrap_or_default()
}

impl<'a> NewsFixtures<'a> {
    pub fn mock_news_type(&self, id: i32) -> NewsTypeModel {
        NewsTypeModel {
            id,
            name: format!("News type {}", id),
            create_date: test_timestamp(),
            creator_id: None,
            update_date: test_timestamp(),
            updater_id: None,
        }
    }

    pub fn mock_news(&self, id: i32, news_type_id: i32) -> NewsModel {
        NewsModel {
            id,
            news_type_id,
            title: format!("News {}", id),
            body: format!("Body of news {}", id),
            is_published: false,
            create_date: test_timestamp(),
            creator_id: None,
            update_date: test_timestamp(),
            updater_id: None,
        }
    }

    pub fn mock_tag(&self, id: i32) -> TagModel {
        TagModel {
            id,
            name: format!("Tag {}", id),
            create_date: test_timestamp(),
            creator_id: None,
            update_date: test_timestamp(),
            updater_id: None,
        }
    }

    pub fn mock_comment(&self, id: i32, news_id: i32) -> CommentModel {
        CommentModel {
            id,
            news_id,
            body: format!("Comment {} on news {}", id, news_id),
            create_date: test_timestamp(),
            creator_id: None,
            update_date: test_timestamp(),
            updater_id: None,
        }
    }

    pub fn mock_news_tag_param(&self, id: i32, news_id: i32, tag_id: i32) -> NewsTagParamModel {
        NewsTagParamModel {
            id,
            news_id,
            tag_id,
            create_date: test_timestamp(),
            creator_id: None,
            update_date: test_timestamp(),
            updater_id: None,
        }
    }
}
