use crate::error::{ServiceError, ServiceResult, require_text};
use crate::policy::{self, Actor};
use db::models::category::Model as CategoryModel;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    /// `#rrggbb`; defaults on create, kept on update when `None`.
    pub color: Option<String>,
}

pub struct CategoryService;

/// `#` followed by exactly six hex digits.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl CategoryService {
    pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<CategoryModel>> {
        Ok(CategoryModel::find_all(db).await?)
    }

    pub async fn create(
        db: &DatabaseConnection,
        actor: Actor,
        input: CategoryInput,
    ) -> ServiceResult<CategoryModel> {
        Self::authorize(actor)?;
        Self::validate(db, &input, None).await?;

        let category = CategoryModel::create(
            db,
            &input.name,
            input.description.as_deref(),
            input.color.as_deref(),
        )
        .await?;

        info!(category_id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn update(
        db: &DatabaseConnection,
        actor: Actor,
        id: i64,
        input: CategoryInput,
    ) -> ServiceResult<CategoryModel> {
        Self::authorize(actor)?;

        let existing = CategoryModel::get_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category"))?;
        Self::validate(db, &input, Some(id)).await?;

        let color = input.color.as_deref().unwrap_or(&existing.color);
        let category =
            CategoryModel::edit(db, id, &input.name, input.description.as_deref(), color).await?;

        info!(category_id = id, "category updated");
        Ok(category)
    }

    /// Deletes a category and returns how many tickets lost it.
    pub async fn delete(db: &DatabaseConnection, actor: Actor, id: i64) -> ServiceResult<u64> {
        Self::authorize(actor)?;

        let detached = CategoryModel::delete(db, id).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => ServiceError::not_found("Category"),
            other => ServiceError::Database(other),
        })?;

        info!(category_id = id, detached, "category deleted");
        Ok(detached)
    }

    fn authorize(actor: Actor) -> ServiceResult<()> {
        if !policy::can_manage_categories(actor.role) {
            debug!(user_id = actor.user_id, "category management denied");
            return Err(ServiceError::forbidden("Only administrators can manage categories"));
        }
        Ok(())
    }

    async fn validate(
        db: &DatabaseConnection,
        input: &CategoryInput,
        except_id: Option<i64>,
    ) -> ServiceResult<()> {
        require_text("name", &input.name)?;

        if let Some(color) = input.color.as_deref() {
            if !is_hex_color(color) {
                return Err(ServiceError::invalid("color must look like #rrggbb"));
            }
        }

        if CategoryModel::name_taken(db, &input.name, except_id).await? {
            return Err(ServiceError::Conflict(format!(
                "A category named '{}' already exists",
                input.name.trim()
            )));
        }

        Ok(())
    }
}
