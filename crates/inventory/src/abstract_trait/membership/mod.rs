mod repository;
mod service;

pub use self::repository::{
    DynMemberRepository, DynPlanRepository, MemberRepositoryTrait, PlanRepositoryTrait,
};
pub use self::service::{DynMembershipService, MembershipServiceTrait};
