//! Scheduling board for creative production work.
//!
//! The `data` feature exposes the board core together with the persistence
//! layer; `server` adds the JSON API on top.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::forms::work_entry::UPLOADS_PATH;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api::{
    list_clients, list_creative_templates, list_proposals, list_work_entries, save_work_entry,
    show_board,
};

#[cfg(feature = "data")]
pub mod board;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Role required to read the board.
pub const SERVICE_ACCESS_ROLE: &str = "board";
/// Role required to create or overwrite work entries.
pub const SERVICE_EDITOR_ROLE: &str = "board_editor";
/// Role required to list sales proposals.
pub const SERVICE_PROPOSALS_ROLE: &str = "board_proposals";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    std::fs::create_dir_all(&server_config.upload_dir).map_err(|e| {
        std::io::Error::other(format!(
            "Failed to create upload directory {}: {e}",
            server_config.upload_dir
        ))
    })?;

    // Keys and stores for identity and sessions.
    let secret_key = Key::derive_from(server_config.secret.as_bytes());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting board API on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new(UPLOADS_PATH, &server_config.upload_dir))
            .service(
                web::scope("/api")
                    .service(list_work_entries)
                    .service(save_work_entry)
                    .service(list_clients)
                    .service(list_creative_templates)
                    .service(list_proposals)
                    .service(show_board),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
