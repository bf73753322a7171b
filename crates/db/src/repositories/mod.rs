//! Entity-specific queries.
//!
//! Each module adds an `impl Repository<E>` block on top of the generic CRUD
//! in [`crate::repository`] and exports a `XxxRepo` alias.

use crate::executor::Executor;
use crate::repository::Repository;

pub mod contact_repo;
pub mod page_view_repo;
pub mod project_repo;
pub mod skill_repo;
pub mod technology_repo;
pub mod user_repo;

pub use contact_repo::ContactRepo;
pub use page_view_repo::PageViewRepo;
pub use project_repo::ProjectRepo;
pub use skill_repo::SkillRepo;
pub use technology_repo::TechnologyRepo;
pub use user_repo::UserRepo;

pub type CategoryRepo = Repository<crate::models::category::Category>;

/// One repository per table, all sharing a single executor.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub categories: CategoryRepo,
    pub projects: ProjectRepo,
    pub skills: SkillRepo,
    pub technologies: TechnologyRepo,
    pub contacts: ContactRepo,
    pub page_views: PageViewRepo,
    pub users: UserRepo,
}

impl Repositories {
    pub fn new(executor: Executor) -> Self {
        Self {
            categories: Repository::new(executor.clone()),
            projects: Repository::new(executor.clone()),
            skills: Repository::new(executor.clone()),
            technologies: Repository::new(executor.clone()),
            contacts: Repository::new(executor.clone()),
            page_views: Repository::new(executor.clone()),
            users: Repository::new(executor),
        }
    }
}
