use crate::error::{ServiceError, ServiceResult, require_text};
use crate::policy::{self, Actor};
use crate::ticket_service::TicketService;
use db::models::{ticket_comments::Model as CommentModel, user::Model as UserModel};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

pub struct CommentService;

impl CommentService {
    /// Comments on a visible ticket, oldest first, with their authors.
    /// Internal notes are dropped for roles that may not see them.
    pub async fn list(
        db: &DatabaseConnection,
        actor: Actor,
        ticket_id: i64,
    ) -> ServiceResult<Vec<(CommentModel, Option<UserModel>)>> {
        TicketService::get(db, actor, ticket_id).await?;

        let comments = CommentModel::find_all_for_ticket(db, ticket_id).await?;
        Ok(policy::visible_comments(actor.role, comments))
    }

    /// Posts a comment and returns it with its author.
    pub async fn add(
        db: &DatabaseConnection,
        actor: Actor,
        ticket_id: i64,
        content: &str,
        internal: bool,
    ) -> ServiceResult<(CommentModel, UserModel)> {
        require_text("content", content)?;

        let ticket = TicketService::get(db, actor, ticket_id).await?;
        if !policy::can_comment(actor, &ticket, internal) {
            debug!(ticket_id, user_id = actor.user_id, internal, "comment denied");
            return Err(ServiceError::forbidden("Only support staff can post internal comments"));
        }

        let author = UserModel::get_by_id(db, actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let comment = CommentModel::create(db, ticket_id, actor.user_id, content, internal).await?;
        info!(ticket_id, comment_id = comment.id, internal, "comment added");
        Ok((comment, author))
    }
}
