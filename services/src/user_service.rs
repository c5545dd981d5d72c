use crate::error::{ServiceError, ServiceResult, require_text};
use crate::policy::{self, Actor};
use db::models::user::{Model as UserModel, ProfileChanges, Role};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Self-service profile edit. `None` leaves a field as is; an empty string
/// clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct UserService;

impl UserService {
    /// Creates an account with role `user`.
    pub async fn register(
        db: &DatabaseConnection,
        params: RegisterUser,
    ) -> ServiceResult<UserModel> {
        require_text("email", &params.email)?;
        require_text("username", &params.username)?;
        if !params.email.contains('@') {
            return Err(ServiceError::invalid("email is not valid"));
        }
        if params.password.len() < MIN_PASSWORD_LEN {
            return Err(ServiceError::invalid(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if UserModel::email_taken(db, &params.email).await? {
            return Err(ServiceError::Conflict("A user with this email already exists".into()));
        }
        if UserModel::username_taken(db, &params.username, None).await? {
            return Err(ServiceError::Conflict("Username is already taken".into()));
        }

        let user = UserModel::create(
            db,
            &params.email,
            &params.username,
            &params.password,
            Role::User,
        )
        .await?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Resolves a login (email or username) and password to a user.
    ///
    /// Unknown logins and bad passwords fail identically.
    pub async fn authenticate(
        db: &DatabaseConnection,
        login: &str,
        password: &str,
    ) -> ServiceResult<Option<UserModel>> {
        let user = match UserModel::find_by_login(db, login).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if user.verify_password(password) {
            Ok(Some(user))
        } else {
            debug!(user_id = user.id, "password mismatch");
            Ok(None)
        }
    }

    pub async fn profile(db: &DatabaseConnection, id: i64) -> ServiceResult<UserModel> {
        UserModel::get_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    /// Updates the actor's own profile. Role is never touched here.
    pub async fn update_profile(
        db: &DatabaseConnection,
        actor: Actor,
        params: UpdateProfile,
    ) -> ServiceResult<UserModel> {
        let mut changes = ProfileChanges::default();

        if let Some(username) = params.username {
            require_text("username", &username)?;
            if UserModel::username_taken(db, &username, Some(actor.user_id)).await? {
                return Err(ServiceError::Conflict("Username is already taken".into()));
            }
            changes.username = Some(username);
        }
        changes.full_name = params.full_name.map(non_blank);
        changes.avatar_url = params.avatar_url.map(non_blank);

        let user = UserModel::update_profile(db, actor.user_id, changes)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotFound(_) => ServiceError::not_found("User"),
                other => other.into(),
            })?;

        info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    /// All users, newest first. Admin only.
    pub async fn list(db: &DatabaseConnection, actor: Actor) -> ServiceResult<Vec<UserModel>> {
        if !policy::can_manage_user_roles(actor.role) {
            debug!(user_id = actor.user_id, "user listing denied");
            return Err(ServiceError::forbidden("Only administrators can list users"));
        }
        Ok(UserModel::find_all(db).await?)
    }

    pub async fn set_role(
        db: &DatabaseConnection,
        actor: Actor,
        target_id: i64,
        role: Role,
    ) -> ServiceResult<UserModel> {
        if !policy::can_manage_user_roles(actor.role) {
            debug!(user_id = actor.user_id, "role change denied");
            return Err(ServiceError::forbidden("Only administrators can change roles"));
        }
        if target_id == actor.user_id && role != actor.role {
            return Err(ServiceError::invalid("You cannot change your own role"));
        }

        let target = Self::profile(db, target_id).await?;
        if target.role == role {
            return Ok(target);
        }

        let (updated, released) = UserModel::set_role(db, target_id, role).await?;
        info!(
            user_id = target_id,
            by = actor.user_id,
            from = %target.role,
            to = %role,
            released,
            "role changed"
        );
        Ok(updated)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
