//! Database insertion of reference schema rows.
//!
//! Parent rows are created automatically when they do not exist so every insert keeps
//! referential integrity. Inserting an id that already exists returns the existing row.

use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    fixtures::news::NewsFixtures,
    model::{CommentModel, NewsModel, NewsTagParamModel, NewsTypeModel, TagModel},
};

/// News type used for news created implicitly as a parent.
const DEFAULT_NEWS_TYPE_ID: i32 = 1;

impl<'a> NewsFixtures<'a> {
    /// Insert a mock news type into the database.
    ///
    /// # Returns
    /// - `Ok(NewsTypeModel)` - The created or existing news type
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_news_type(&self, id: i32) -> Result<NewsTypeModel, TestError> {
        if let Some(existing) = entity::prelude::NewsType::find_by_id(id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let news_type = self.mock_news_type(id);

        Ok(
            entity::prelude::NewsType::insert(entity::news_type::ActiveModel {
                id: ActiveValue::Set(news_type.id),
                name: ActiveValue::Set(news_type.name),
                create_date: ActiveValue::Set(news_type.create_date),
                creator_id: ActiveValue::Set(news_type.creator_id),
                update_date: ActiveValue::Set(news_type.update_date),
                updater_id: ActiveValue::Set(news_type.updater_id),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a mock news item, creating its news type if needed.
    ///
    /// # Returns
    /// - `Ok(NewsModel)` - The created or existing news item
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_news(
        &self,
        id: i32,
        news_type_id: i32,
    ) -> Result<NewsModel, TestError> {
        if let Some(existing) = entity::prelude::News::find_by_id(id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        self.insert_mock_news_type(news_type_id).await?;
        let news = self.mock_news(id, news_type_id);

        Ok(entity::prelude::News::insert(entity::news::ActiveModel {
            id: ActiveValue::Set(news.id),
            news_type_id: ActiveValue::Set(news.news_type_id),
            title: ActiveValue::Set(news.title),
            body: ActiveValue::Set(news.body),
            is_published: ActiveValue::Set(news.is_published),
            create_date: ActiveValue::Set(news.create_date),
            creator_id: ActiveValue::Set(news.creator_id),
            update_date: ActiveValue::Set(news.update_date),
            updater_id: ActiveValue::Set(news.updater_id),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a mock tag into the database.
    pub async fn insert_mock_tag(&self, id: i32) -> Result<TagModel, TestError> {
        if let Some(existing) = entity::prelude::Tag::find_by_id(id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let tag = self.mock_tag(id);

        Ok(entity::prelude::Tag::insert(entity::tag::ActiveModel {
            id: ActiveValue::Set(tag.id),
            name: ActiveValue::Set(tag.name),
            create_date: ActiveValue::Set(tag.create_date),
            creator_id: ActiveValue::Set(tag.creator_id),
            update_date: ActiveValue::Set(tag.update_date),
            updater_id: ActiveValue::Set(tag.updater_id),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a mock comment, creating its news item if needed.
    pub async fn insert_mock_comment(
        &self,
        id: i32,
        news_id: i32,
    ) -> Result<CommentModel, TestError> {
        if let Some(existing) = entity::prelude::Comment::find_by_id(id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        self.insert_mock_news(news_id, DEFAULT_NEWS_TYPE_ID).await?;
        let comment = self.mock_comment(id, news_id);

        Ok(entity::prelude::Comment::insert(entity::comment::ActiveModel {
            id: ActiveValue::Set(comment.id),
            news_id: ActiveValue::Set(comment.news_id),
            body: ActiveValue::Set(comment.body),
            create_date: ActiveValue::Set(comment.create_date),
            creator_id: ActiveValue::Set(comment.creator_id),
            update_date: ActiveValue::Set(comment.update_date),
            updater_id: ActiveValue::Set(comment.updater_id),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a mock news-tag association, creating the news item and tag if needed.
    pub async fn insert_mock_news_tag_param(
        &self,
        id: i32,
        news_id: i32,
        tag_id: i32,
    ) -> Result<NewsTagParamModel, TestError> {
        if let Some(existing) = entity::prelude::NewsTagParam::find_by_id(id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        self.insert_mock_news(news_id, DEFAULT_NEWS_TYPE_ID).await?;
        self.insert_mock_tag(tag_id).await?;
        let param = self.mock_news_tag_param(id, news_id, tag_id);

        Ok(
            entity::prelude::NewsTagParam::insert(entity::news_tag_param::ActiveModel {
                id: ActiveValue::Set(param.id),
                news_id: ActiveValue::Set(param.news_id),
                tag_id: ActiveValue::Set(param.tag_id),
                create_date: ActiveValue::Set(param.create_date),
                creator_id: ActiveValue::Set(param.creator_id),
                update_date: ActiveValue::Set(param.update_date),
                updater_id: ActiveValue::Set(param.updater_id),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
