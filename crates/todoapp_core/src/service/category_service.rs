//! Category use-case service.
//!
//! # Invariants
//! - Category names are unique case-insensitively; create and update check
//!   this before writing and raise `ServiceError::Conflict`.
//! - Stored names are trimmed.
//! - Deleting a category that still owns todos propagates
//!   `ServiceError::ReferentialConstraint`; todos are never reassigned.

use super::{ServiceError, ServiceResult};
use crate::dto::category::{
    CategoryDto, CategoryStats, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::dto::paging::{PageRequest, PagedResult};
use crate::model::category::Category;
use crate::model::{timestamp_now, EntityId};
use crate::repo::category_repo::CategoryRepository;
use log::{info, warn};

/// Category service facade over repository implementations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All categories in id order.
    pub fn list(&self) -> ServiceResult<Vec<CategoryDto>> {
        Ok(into_dtos(self.repo.get_all()?))
    }

    /// Active categories ordered by name.
    pub fn list_active(&self) -> ServiceResult<Vec<CategoryDto>> {
        Ok(into_dtos(self.repo.list_active()?))
    }

    pub fn get_by_id(&self, id: EntityId) -> ServiceResult<Option<CategoryDto>> {
        Ok(self.repo.get_by_id(id)?.map(CategoryDto::from))
    }

    /// Case-insensitive lookup by name.
    pub fn get_by_name(&self, name: &str) -> ServiceResult<Option<CategoryDto>> {
        Ok(self.repo.get_by_name(name)?.map(CategoryDto::from))
    }

    pub fn create(&self, request: &CreateCategoryRequest) -> ServiceResult<CategoryDto> {
        request.validate()?;
        self.ensure_name_available(&request.name, None)?;

        let mut category = Category::new(request.name.trim(), timestamp_now());
        category.description = request.description.clone();
        category.is_active = request.is_active;

        let created = self.repo.add(&category)?;
        info!(
            "event=category_create module=service status=ok category_id={}",
            created.id
        );
        Ok(created.into())
    }

    /// Replaces name, description and active flag. `None` when `id` is absent.
    pub fn update(
        &self,
        id: EntityId,
        request: &UpdateCategoryRequest,
    ) -> ServiceResult<Option<CategoryDto>> {
        request.validate()?;
        let Some(mut category) = self.repo.get_by_id(id)? else {
            return Ok(None);
        };
        self.ensure_name_available(&request.name, Some(id))?;

        category.name = request.name.trim().to_string();
        category.description = request.description.clone();
        category.is_active = request.is_active;
        self.repo.update(&category)?;
        info!("event=category_update module=service status=ok category_id={id}");
        Ok(Some(category.into()))
    }

    /// `false` when `id` is absent.
    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        if !self.repo.exists(id)? {
            return Ok(false);
        }
        if let Err(err) = self.repo.delete(id) {
            warn!("event=category_delete module=service status=error category_id={id} error={err}");
            return Err(err.into());
        }
        info!("event=category_delete module=service status=ok category_id={id}");
        Ok(true)
    }

    /// One id-ordered page of categories.
    pub fn get_paged(&self, request: &PageRequest) -> ServiceResult<PagedResult<CategoryDto>> {
        let page = request.normalize()?;
        let (items, total_count) = self.repo.get_paged(page.number, page.size)?;
        Ok(PagedResult::new(into_dtos(items), total_count, page))
    }

    /// Flips `is_active`. `None` when `id` is absent.
    pub fn toggle_status(&self, id: EntityId) -> ServiceResult<Option<CategoryDto>> {
        let Some(mut category) = self.repo.get_by_id(id)? else {
            return Ok(None);
        };
        category.is_active = !category.is_active;
        self.repo.update(&category)?;
        info!(
            "event=category_toggle module=service status=ok category_id={id} is_active={}",
            category.is_active
        );
        Ok(Some(category.into()))
    }

    pub fn stats(&self) -> ServiceResult<CategoryStats> {
        let categories = self.repo.get_all()?;
        let active = categories.iter().filter(|c| c.is_active).count() as u64;
        let total = categories.len() as u64;
        Ok(CategoryStats {
            total_categories: total,
            active_categories: active,
            inactive_categories: total - active,
        })
    }

    fn ensure_name_available(&self, name: &str, exclude_id: Option<EntityId>) -> ServiceResult<()> {
        match self.repo.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude_id => Err(ServiceError::Conflict(
                format!("category name already exists: {}", existing.name),
            )),
            _ => Ok(()),
        }
    }
}

fn into_dtos(categories: Vec<Category>) -> Vec<CategoryDto> {
    categories.into_iter().map(CategoryDto::from).collect()
}
