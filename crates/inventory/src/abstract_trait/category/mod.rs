mod repository;
mod service;

pub use self::repository::{CategoryRepositoryTrait, DynCategoryRepository};
pub use self::service::{CategoryServiceTrait, DynCategoryService};
