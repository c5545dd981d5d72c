use crate::error::ServiceResult;
use crate::policy::{self, Actor};
use db::{
    filters::TicketFilter,
    models::{
        category::Model as CategoryModel,
        tickets::{Model as TicketModel, TicketStatus},
        user::{Model as UserModel, Role},
    },
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Per-role dashboard counters. Fields a role does not get are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub resolved: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_me: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_categories: Option<u64>,
}

impl DashboardStats {
    fn tally(actor: Actor, tickets: &[TicketModel]) -> Self {
        let mut stats = DashboardStats::default();
        let mut assigned = 0;

        for ticket in tickets {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::Closed => {}
            }
            if ticket.assigned_to == Some(actor.user_id) {
                assigned += 1;
            }
        }

        if actor.role.is_staff() {
            stats.assigned_to_me = Some(assigned);
        }
        stats
    }
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(db: &DatabaseConnection, actor: Actor) -> ServiceResult<DashboardStats> {
        let mut filter = TicketFilter::new();
        if !policy::can_view_all_tickets(actor.role) {
            filter = filter.with_created_by(actor.user_id);
        }

        let tickets = policy::visible_tickets(actor, TicketModel::find_all(db, &filter).await?);
        let mut stats = DashboardStats::tally(actor, &tickets);

        match actor.role {
            Role::Admin => {
                stats.total_users = Some(UserModel::count_all(db).await?);
                stats.total_categories = Some(CategoryModel::count_all(db).await?);
            }
            Role::Agent | Role::User => {}
        }

        Ok(stats)
    }
}
