pub mod auth;
pub mod blogs;
pub mod categories;
pub mod comments;
pub mod github_auth;
pub mod upload;
pub mod users;
pub mod visits;
