use crate::{
    adapters::persistence::PostgresPersistence, infra::config::AppConfig, infra::db::init_db,
};

pub mod app;
pub mod config;
pub mod db;
pub mod login_link_cleanup;
pub mod setup;

pub async fn postgres_persistence(config: &AppConfig) -> anyhow::Result<PostgresPersistence> {
    let pool = init_db(config).await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
