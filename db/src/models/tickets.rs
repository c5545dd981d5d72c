use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{Condition, Order, PaginatorTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use strum::{Display, EnumString};

use super::{category::Model as CategoryModel, user::Model as UserModel};
use crate::filters::{TicketFilter, TicketSort, TicketSortField};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: String,

    pub status: TicketStatus,
    pub priority: TicketPriority,

    /// Set once at creation, never rewritten.
    pub created_by: i64,
    pub assigned_to: Option<i64>,
    pub category_id: Option<i64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "open")]
    Open,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "resolved")]
    Resolved,

    #[sea_orm(string_value = "closed")]
    Closed,
}

impl TicketStatus {
    /// `in_progress` → `in progress`.
    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_priority")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketPriority {
    #[sea_orm(string_value = "low")]
    Low,

    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,

    #[sea_orm(string_value = "high")]
    High,

    #[sea_orm(string_value = "urgent")]
    Urgent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AssignedTo",
        to = "super::user::Column::Id"
    )]
    Assignee,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,

    #[sea_orm(has_many = "super::ticket_comments::Entity")]
    Comments,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::ticket_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A ticket together with the rows its foreign keys point at.
#[derive(Clone, Debug, PartialEq)]
pub struct TicketWithRelations {
    pub ticket: Model,
    pub creator: UserModel,
    pub assignee: Option<UserModel>,
    pub category: Option<CategoryModel>,
}

/// Severity rank used for priority ordering; the raw column sorts alphabetically.
fn priority_rank() -> SimpleExpr {
    Expr::cust(
        "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 \
         WHEN 'high' THEN 2 WHEN 'urgent' THEN 3 END",
    )
    .into()
}

fn status_rank() -> SimpleExpr {
    Expr::cust(
        "CASE status WHEN 'open' THEN 0 WHEN 'in_progress' THEN 1 \
         WHEN 'resolved' THEN 2 WHEN 'closed' THEN 3 END",
    )
    .into()
}

/// Lowercased `LIKE` pattern matching `query` as a literal substring.
/// Backslash, `%` and `_` are escaped with a backslash.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        created_by: i64,
        title: &str,
        description: &str,
        priority: TicketPriority,
        category_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            title: Set(title.trim().to_owned()),
            description: Set(description.trim().to_owned()),
            status: Set(TicketStatus::Open),
            priority: Set(priority),
            created_by: Set(created_by),
            assigned_to: Set(None),
            category_id: Set(category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn set_status(
        db: &DatabaseConnection,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(ticket_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Ticket not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.status = Set(status);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub async fn set_assignee(
        db: &DatabaseConnection,
        ticket_id: i64,
        assignee: Option<i64>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(ticket_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Ticket not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.assigned_to = Set(assignee);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    fn filtered(filter: &TicketFilter) -> Select<Entity> {
        let mut condition = Condition::all();

        if let Some(user_id) = filter.created_by {
            condition = condition.add(Column::CreatedBy.eq(user_id));
        }
        if let Some(user_id) = filter.assigned_to {
            condition = condition.add(Column::AssignedTo.eq(user_id));
        }
        if let Some(status) = filter.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if let Some(category_id) = filter.category_id {
            condition = condition.add(Column::CategoryId.eq(category_id));
        }
        if let Some(query) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = contains_pattern(query);
            let contains = |column: Column| {
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.as_str()).escape('\\'))
            };
            condition = condition.add(
                Condition::any()
                    .add(contains(Column::Title))
                    .add(contains(Column::Description)),
            );
        }

        let mut query = Entity::find().filter(condition);

        let sorts = if filter.sort.is_empty() {
            vec![TicketSort::default()]
        } else {
            filter.sort.clone()
        };

        for sort in sorts {
            let order = if sort.ascending { Order::Asc } else { Order::Desc };
            query = match sort.field {
                TicketSortField::CreatedAt => query.order_by(Column::CreatedAt, order),
                TicketSortField::UpdatedAt => query.order_by(Column::UpdatedAt, order),
                TicketSortField::Priority => query.order_by(priority_rank(), order),
                TicketSortField::Status => query.order_by(status_rank(), order),
            };
        }

        // Stable tie-break for equal timestamps.
        query.order_by_desc(Column::Id)
    }

    /// Loads creator, assignee and category for each ticket, one query per
    /// table. Input order is kept.
    pub async fn with_relations(
        db: &DatabaseConnection,
        tickets: Vec<Model>,
    ) -> Result<Vec<TicketWithRelations>, DbErr> {
        if tickets.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: HashSet<i64> = tickets
            .iter()
            .flat_map(|t| std::iter::once(t.created_by).chain(t.assigned_to))
            .collect();
        let category_ids: HashSet<i64> = tickets.iter().filter_map(|t| t.category_id).collect();

        let users: HashMap<i64, UserModel> = super::user::Entity::find()
            .filter(super::user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let categories: HashMap<i64, CategoryModel> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            super::category::Entity::find()
                .filter(super::category::Column::Id.is_in(category_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        tickets
            .into_iter()
            .map(|ticket| {
                let creator = users.get(&ticket.created_by).cloned().ok_or_else(|| {
                    DbErr::RecordNotFound(format!("Creator of ticket {} not found", ticket.id))
                })?;
                let assignee = ticket.assigned_to.and_then(|id| users.get(&id).cloned());
                let category = ticket.category_id.and_then(|id| categories.get(&id).cloned());
                Ok(TicketWithRelations {
                    ticket,
                    creator,
                    assignee,
                    category,
                })
            })
            .collect()
    }

    /// Every ticket matching `filter`, unpaginated.
    pub async fn find_all(
        db: &DatabaseConnection,
        filter: &TicketFilter,
    ) -> Result<Vec<Model>, DbErr> {
        Self::filtered(filter).all(db).await
    }

    /// One page of tickets matching `filter` plus the total match count.
    ///
    /// `page` is 1-based.
    pub async fn find_page(
        db: &DatabaseConnection,
        filter: &TicketFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let paginator = Self::filtered(filter).paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((items, total))
    }
}
