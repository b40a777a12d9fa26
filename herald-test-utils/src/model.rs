//! Type aliases for the reference schema models.

pub type NewsTypeModel = entity::news_type::Model;

pub type NewsModel = entity::news::Model;

pub type TagModel = entity::tag::Model;

pub type CommentModel = entity::comment::Model;

pub type NewsTagParamModel = entity::news_tag_param::Model;
