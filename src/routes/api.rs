use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::{SERVICE_ACCESS_ROLE, SERVICE_EDITOR_ROLE};
use crate::domain::auth::AuthenticatedUser;
use crate::dto::api::{
    BoardMonthView, BoardQuery, ProposalsQuery, SavedResponse, WorkEntriesQuery,
};
use crate::forms::work_entry::{SaveWorkEntryForm, store_upload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{board, catalog, ensure_role, proposals, work_entries};

#[get("/v1/work-entries")]
pub async fn list_work_entries(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<WorkEntriesQuery>,
) -> impl Responder {
    match work_entries::list_work_entries(repo.get_ref(), &user, query.client_id()) {
        Ok(rows) => HttpResponse::Ok().json(json!({ "rows": rows })),
        Err(err) => error_response(err, "list work entries"),
    }
}

#[post("/v1/work-entries")]
pub async fn save_work_entry(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<SaveWorkEntryForm>,
) -> impl Responder {
    if let Err(err) =
        ensure_role(&user, SERVICE_ACCESS_ROLE).and_then(|()| ensure_role(&user, SERVICE_EDITOR_ROLE))
    {
        return error_response(err, "save work entry");
    }

    let (payload, file) = form.into_parts();
    let mut request = match payload.into_request(None) {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    if let Some(file) = file {
        match store_upload(&file, Path::new(&server_config.upload_dir)) {
            Ok(path) => request.content_file = Some(path),
            Err(err) => {
                log::error!("Failed to store content file: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    match work_entries::save_work_entry(repo.get_ref(), &user, request) {
        Ok(stored) => HttpResponse::Ok().json(SavedResponse {
            date: stored.entry_date.format("%Y-%m-%d").to_string(),
            client_id: stored.client_id,
            content_file: stored.content_file,
        }),
        Err(err) => error_response(err, "save work entry"),
    }
}

#[get("/v1/clients")]
pub async fn list_clients(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::list_clients(repo.get_ref(), &user) {
        Ok(clients) => HttpResponse::Ok().json(clients),
        Err(err) => error_response(err, "list clients"),
    }
}

#[get("/v1/creative-templates")]
pub async fn list_creative_templates(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::list_creative_templates(repo.get_ref(), &user) {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(err) => error_response(err, "list creative templates"),
    }
}

#[get("/v1/proposals")]
pub async fn list_proposals(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    query: web::Query<ProposalsQuery>,
) -> impl Responder {
    let page = query.page.unwrap_or(1);
    match proposals::list_proposals_page(
        repo.get_ref(),
        &user,
        page,
        server_config.proposals_per_page,
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err, "list proposals"),
    }
}

#[get("/v1/board")]
pub async fn show_board(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    query: web::Query<BoardQuery>,
) -> impl Responder {
    let Some(month_query) = query.to_month_query() else {
        return HttpResponse::BadRequest().json(json!({ "error": "invalid month or client" }));
    };

    match board::load_board_month(
        repo.get_ref(),
        &user,
        month_query,
        server_config.proposals_per_page,
    )
    .await
    {
        Ok(month) => HttpResponse::Ok().json(BoardMonthView::from(month)),
        Err(err) => error_response(err, "load board"),
    }
}
