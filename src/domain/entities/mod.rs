pub mod feedback;
pub mod login_link;
pub mod user;
