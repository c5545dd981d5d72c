use crate::error::{ServiceError, ServiceResult, require_text};
use crate::policy::{self, Actor};
use db::{
    filters::{TicketFilter, TicketSort, parse_ticket_sort},
    models::{
        category::Model as CategoryModel,
        tickets::{Model as TicketModel, TicketPriority, TicketStatus, TicketWithRelations},
        user::{Model as UserModel, Role},
    },
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub priority: Option<TicketPriority>,
    pub category_id: Option<i64>,
}

/// Listing parameters. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<TicketStatus>,
    pub category_id: Option<i64>,
    pub assigned_to_me: bool,
    pub query: Option<String>,
    /// e.g. `-priority,created_at`
    pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TicketPage {
    pub tickets: Vec<TicketModel>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

pub struct TicketService;

impl TicketService {
    pub async fn create(
        db: &DatabaseConnection,
        actor: Actor,
        params: CreateTicket,
    ) -> ServiceResult<TicketModel> {
        require_text("title", &params.title)?;
        require_text("description", &params.description)?;

        if let Some(category_id) = params.category_id {
            if CategoryModel::get_by_id(db, category_id).await?.is_none() {
                return Err(ServiceError::not_found("Category"));
            }
        }

        let ticket = TicketModel::create(
            db,
            actor.user_id,
            &params.title,
            &params.description,
            params.priority.unwrap_or_default(),
            params.category_id,
        )
        .await?;

        info!(ticket_id = ticket.id, user_id = actor.user_id, "ticket created");
        Ok(ticket)
    }

    pub async fn get(db: &DatabaseConnection, actor: Actor, id: i64) -> ServiceResult<TicketModel> {
        let ticket = TicketModel::get_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket"))?;

        if !policy::can_view(actor, &ticket) {
            debug!(ticket_id = id, user_id = actor.user_id, "ticket view denied");
            return Err(ServiceError::forbidden("You do not have access to this ticket"));
        }

        Ok(ticket)
    }

    pub async fn list(
        db: &DatabaseConnection,
        actor: Actor,
        query: TicketQuery,
    ) -> ServiceResult<TicketPage> {
        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(ServiceError::invalid("page must be at least 1"));
        }
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ServiceError::invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }

        let sort = match query.sort.as_deref() {
            Some(raw) => parse_ticket_sort(raw)
                .ok_or_else(|| ServiceError::invalid(format!("invalid sort: {raw}")))?,
            None => vec![TicketSort::default()],
        };

        let mut filter = TicketFilter::new().with_sort(sort);
        if !policy::can_view_all_tickets(actor.role) {
            filter = filter.with_created_by(actor.user_id);
        }
        if query.assigned_to_me {
            filter = filter.with_assigned_to(actor.user_id);
        }
        if let Some(status) = query.status {
            filter = filter.with_status(status);
        }
        if let Some(category_id) = query.category_id {
            filter = filter.with_category_id(category_id);
        }
        if let Some(q) = query.query {
            filter = filter.with_query(q);
        }

        let (tickets, total) = TicketModel::find_page(db, &filter, page, per_page).await?;

        Ok(TicketPage {
            tickets: policy::visible_tickets(actor, tickets),
            page,
            per_page,
            total,
        })
    }

    pub async fn update_status(
        db: &DatabaseConnection,
        actor: Actor,
        id: i64,
        to: TicketStatus,
    ) -> ServiceResult<TicketModel> {
        let ticket = Self::get(db, actor, id).await?;

        if !policy::can_manage(actor, &ticket) {
            debug!(ticket_id = id, user_id = actor.user_id, "status change denied");
            return Err(ServiceError::forbidden("You cannot manage this ticket"));
        }
        if ticket.status == to {
            return Err(ServiceError::invalid(format!("Ticket is already {}", to.label())));
        }
        if !policy::allowed_status_transition(actor.role, ticket.status, to) {
            debug!(ticket_id = id, from = %ticket.status, to = %to, "transition denied");
            return Err(ServiceError::forbidden(format!(
                "Cannot move ticket from {} to {}",
                ticket.status.label(),
                to.label()
            )));
        }

        let updated = TicketModel::set_status(db, id, to).await?;
        info!(
            ticket_id = id,
            user_id = actor.user_id,
            from = %ticket.status,
            to = %to,
            "ticket status changed"
        );
        Ok(updated)
    }

    /// Sets or clears the assignee. An agent claiming an unassigned ticket
    /// passes their own id.
    pub async fn assign(
        db: &DatabaseConnection,
        actor: Actor,
        id: i64,
        assignee: Option<i64>,
    ) -> ServiceResult<TicketModel> {
        if !policy::can_assign(actor.role) {
            debug!(ticket_id = id, user_id = actor.user_id, "assign denied by role");
            return Err(ServiceError::forbidden("You cannot assign tickets"));
        }

        let ticket = Self::get(db, actor, id).await?;
        if !policy::can_manage(actor, &ticket) {
            debug!(ticket_id = id, user_id = actor.user_id, "assign denied, ticket claimed");
            return Err(ServiceError::forbidden("Ticket is assigned to another agent"));
        }

        if let Some(assignee_id) = assignee {
            let target = UserModel::get_by_id(db, assignee_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Assignee"))?;
            if !policy::is_assignable(target.role) {
                return Err(ServiceError::invalid(format!(
                    "{} cannot be assigned tickets",
                    target.role.display_name()
                )));
            }
        }

        let updated = TicketModel::set_assignee(db, id, assignee).await?;
        info!(
            ticket_id = id,
            user_id = actor.user_id,
            assignee = ?assignee,
            "ticket assignment changed"
        );
        Ok(updated)
    }

    /// Attaches creator, assignee and category to tickets the caller has
    /// already been allowed to see.
    pub async fn with_relations(
        db: &DatabaseConnection,
        tickets: Vec<TicketModel>,
    ) -> ServiceResult<Vec<TicketWithRelations>> {
        Ok(TicketModel::with_relations(db, tickets).await?)
    }

    pub async fn with_relations_one(
        db: &DatabaseConnection,
        ticket: TicketModel,
    ) -> ServiceResult<TicketWithRelations> {
        Self::with_relations(db, vec![ticket])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::not_found("Ticket"))
    }

    pub async fn assignable_agents(
        db: &DatabaseConnection,
        actor: Actor,
    ) -> ServiceResult<Vec<UserModel>> {
        if !policy::can_assign(actor.role) {
            return Err(ServiceError::forbidden("You cannot assign tickets"));
        }

        let staff = UserModel::find_with_roles(db, &[Role::Agent, Role::Admin]).await?;
        Ok(policy::assignable_candidates(staff))
    }
}
