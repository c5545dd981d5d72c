use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, Condition, QueryOrder, TransactionTrait, sea_query::Expr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique sign-in email.
    pub email: String,
    /// Unique handle, also accepted at sign-in.
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The only authorization axis in the system.
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Global user role.
///
/// Backed by a `user_role` enum column. Every mapping off a role is an
/// exhaustive `match` so that a new variant fails to compile until handled.
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
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "user")]
    User,

    #[sea_orm(string_value = "agent")]
    Agent,

    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Agent => "Support Agent",
            Role::Admin => "Administrator",
        }
    }

    /// Badge variant used by clients when rendering the role.
    pub fn badge(self) -> &'static str {
        match self {
            Role::User => "secondary",
            Role::Agent => "default",
            Role::Admin => "destructive",
        }
    }

    /// Agents and admins.
    pub fn is_staff(self) -> bool {
        match self {
            Role::User => false,
            Role::Agent | Role::Admin => true,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_comments::Entity")]
    TicketComments,
}

impl Related<super::ticket_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Profile fields a user may change on their own account.
///
/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub full_name: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active = ActiveModel {
            email: Set(email.trim().to_lowercase()),
            username: Set(username.trim().to_owned()),
            password_hash: Set(Self::hash_password(password)?),
            role: Set(role),
            full_name: Set(None),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Looks a user up by email (case-insensitive) or exact username.
    pub async fn find_by_login(
        db: &DatabaseConnection,
        login: &str,
    ) -> Result<Option<Model>, DbErr> {
        let login = login.trim();
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Email.eq(login.to_lowercase()))
                    .add(Column::Username.eq(login)),
            )
            .one(db)
            .await
    }

    pub async fn email_taken(db: &DatabaseConnection, email: &str) -> Result<bool, DbErr> {
        let found = Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .count(db)
            .await?;
        Ok(found > 0)
    }

    /// True if `username` belongs to someone other than `except_id`.
    pub async fn username_taken(
        db: &DatabaseConnection,
        username: &str,
        except_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Username.eq(username.trim()));
        if let Some(id) = except_id {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// All users, newest first.
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_with_roles(
        db: &DatabaseConnection,
        roles: &[Role],
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Role.is_in(roles.iter().copied()))
            .order_by_asc(Column::Username)
            .all(db)
            .await
    }

    pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// Changes a user's role.
    ///
    /// A user leaving the staff roles is unassigned from every ticket in the
    /// same transaction, so no ticket keeps a non-staff assignee. Returns the
    /// updated user and the number of tickets released.
    pub async fn set_role(
        db: &DatabaseConnection,
        id: i64,
        role: Role,
    ) -> Result<(Model, u64), DbErr> {
        let txn = db.begin().await?;

        let Some(model) = Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Err(DbErr::RecordNotFound("User not found".to_string()));
        };

        let released = if role.is_staff() {
            0
        } else {
            super::tickets::Entity::update_many()
                .col_expr(super::tickets::Column::AssignedTo, Expr::value(Option::<i64>::None))
                .col_expr(super::tickets::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(super::tickets::Column::AssignedTo.eq(id))
                .exec(&txn)
                .await?
                .rows_affected
        };

        let mut active: ActiveModel = model.into();
        active.role = Set(role);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok((updated, released))
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        id: i64,
        changes: ProfileChanges,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active: ActiveModel = model.into();
        if let Some(username) = changes.username {
            active.username = Set(username.trim().to_owned());
        }
        if let Some(full_name) = changes.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(avatar_url) = changes.avatar_url {
            active.avatar_url = Set(avatar_url);
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Best display string: full name, falling back to username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
