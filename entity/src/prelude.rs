pub use super::comment::Entity as Comment;
pub use super::news::Entity as News;
pub use super::news_tag_param::Entity as NewsTagParam;
pub use super::news_type::Entity as NewsType;
pub use super::tag::Entity as Tag;
