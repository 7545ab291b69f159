pub mod access_jwt;
pub mod factory;
pub mod resolver;
pub mod role;
pub mod token;

pub use factory::build_role_resolver;
pub use resolver::{AuthorizationResult, RoleResolver};
pub use role::Role;
