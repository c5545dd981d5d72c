use db::models::{ticket_comments::Model as CommentModel, user::Model as UserModel};
use serde::{Deserialize, Serialize};

use crate::routes::common::UserSummary;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CommentResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub content: String,
    pub is_internal: bool,
    pub author: Option<UserSummary>,
    pub created_at: String,
}

impl From<(CommentModel, Option<UserModel>)> for CommentResponse {
    fn from((comment, author): (CommentModel, Option<UserModel>)) -> Self {
        Self {
            id: comment.id,
            ticket_id: comment.ticket_id,
            content: comment.content,
            is_internal: comment.is_internal,
            author: author.as_ref().map(UserSummary::from),
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}
