use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder, TransactionTrait, sea_query::Expr};
use serde::Serialize;

/// Default color tag for categories created without one.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// A ticket category, managed by admins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// `#rrggbb` color tag.
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active = ActiveModel {
            name: Set(name.trim().to_owned()),
            description: Set(description.map(str::to_owned)),
            color: Set(color.unwrap_or(DEFAULT_COLOR).to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        name: &str,
        description: Option<&str>,
        color: &str,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Category not found".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name.trim().to_owned());
        active.description = Set(description.map(str::to_owned));
        active.color = Set(color.to_owned());
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All categories ordered by name.
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Name).all(db).await
    }

    pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// True if `name` belongs to a category other than `except_id`.
    pub async fn name_taken(
        db: &DatabaseConnection,
        name: &str,
        except_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Name.eq(name.trim()));
        if let Some(id) = except_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// Deletes a category after detaching it from every ticket that references it.
    ///
    /// Returns the number of tickets that were detached. Both steps share one
    /// transaction so a failed delete leaves the tickets untouched.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<u64, DbErr> {
        let txn = db.begin().await?;

        let exists = Entity::find_by_id(id).one(&txn).await?.is_some();
        if !exists {
            txn.rollback().await?;
            return Err(DbErr::RecordNotFound("Category not found".to_string()));
        }

        let detached = super::tickets::Entity::update_many()
            .col_expr(super::tickets::Column::CategoryId, Expr::value(Option::<i64>::None))
            .filter(super::tickets::Column::CategoryId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(detached)
    }
}
