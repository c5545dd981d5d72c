use db::models::{
    category::Model as CategoryModel,
    tickets::{Model as TicketModel, TicketStatus, TicketWithRelations},
};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use services::policy::{self, Actor};

use crate::routes::common::UserSummary;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl From<CategoryModel> for CategorySummary {
    fn from(category: CategoryModel) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TicketResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub status_label: String,
    pub priority: String,
    pub created_by: i64,
    pub assigned_to: Option<i64>,
    pub category_id: Option<i64>,
    pub creator: UserSummary,
    pub assignee: Option<UserSummary>,
    pub category: Option<CategorySummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TicketWithRelations> for TicketResponse {
    fn from(loaded: TicketWithRelations) -> Self {
        let TicketWithRelations {
            ticket,
            creator,
            assignee,
            category,
        } = loaded;

        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status.to_string(),
            status_label: ticket.status.label().to_owned(),
            priority: ticket.priority.to_string(),
            created_by: ticket.created_by,
            assigned_to: ticket.assigned_to,
            category_id: ticket.category_id,
            creator: UserSummary::from(&creator),
            assignee: assignee.as_ref().map(UserSummary::from),
            category: category.map(CategorySummary::from),
            created_at: ticket.created_at.to_rfc3339(),
            updated_at: ticket.updated_at.to_rfc3339(),
        }
    }
}

/// What the caller may do with a ticket, so clients can hide actions
/// that would be refused.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TicketPermissions {
    pub can_manage: bool,
    pub can_assign: bool,
    pub can_comment_internal: bool,
    pub allowed_statuses: Vec<String>,
}

impl TicketPermissions {
    pub fn for_actor(actor: Actor, ticket: &TicketModel) -> Self {
        let can_manage = policy::can_manage(actor, ticket);
        let allowed_statuses = if can_manage {
            TicketStatus::iter()
                .filter(|to| policy::allowed_status_transition(actor.role, ticket.status, *to))
                .map(|to| to.to_string())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            can_manage,
            can_assign: can_manage && policy::can_assign(actor.role),
            can_comment_internal: policy::can_comment(actor, ticket, true),
            allowed_statuses,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TicketDetailResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub permissions: TicketPermissions,
}

impl TicketDetailResponse {
    pub fn new(actor: Actor, loaded: TicketWithRelations) -> Self {
        Self {
            permissions: TicketPermissions::for_actor(actor, &loaded.ticket),
            ticket: TicketResponse::from(loaded),
        }
    }
}
