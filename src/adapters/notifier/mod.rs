pub mod logging;
pub mod slack;
