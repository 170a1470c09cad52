use actix_web::{delete, get, post, put, web, HttpMessage, HttpRequest, HttpResponse};
use database::{
    consts::consts::EntityId,
    database::request_manager::RequestManager,
    model::validation::{empty_object, validate_person},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Largest request body that will be read, anything bigger is an internal error
pub const MAX_BODY_SIZE: usize = 100 * 1024;

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

/// Registers the person routes, the not found fallback is added on the `App` with `default_service`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_SIZE))
        .service(list_people)
        .service(get_person)
        .service(create_person)
        .service(replace_person)
        .service(delete_person);
}

/// Only `application/json` bodies are read, everything else (including no body) is `{}`.
/// A JSON body that cannot be read or parsed is an internal error.
fn parse_body(
    req: &HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<Value, ApiError> {
    if !req.content_type().eq_ignore_ascii_case("application/json") {
        return Ok(empty_object());
    }

    let body = body?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(empty_object());
    }

    Ok(serde_json::from_slice(&body)?)
}

#[get("/person")]
async fn list_people(
    request_manager: web::Data<RequestManager>,
) -> Result<HttpResponse, ApiError> {
    let request_manager = request_manager.get_ref().clone();

    let people = web::block(move || request_manager.send_list()).await??;

    Ok(HttpResponse::Ok().json(people))
}

#[get("/person/{id}")]
async fn get_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let request_manager = request_manager.get_ref().clone();
    let id = EntityId(id.into_inner());

    let person = web::block(move || request_manager.send_get(id))
        .await??
        .ok_or(ApiError::PersonNotFound)?;

    Ok(HttpResponse::Ok().json(person))
}

/// Responds 200 rather than 201, existing clients depend on it
#[post("/person")]
async fn create_person(
    request_manager: web::Data<RequestManager>,
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    let fields = validate_person(parse_body(&req, body)?)?;
    let person = fields.into_person(EntityId::new());

    let request_manager = request_manager.get_ref().clone();

    let created = web::block(move || request_manager.send_add(person)).await??;

    Ok(HttpResponse::Ok().json(created))
}

/// Validation runs before the lookup, so an invalid body on an unknown id is a 400
#[put("/person/{id}")]
async fn replace_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    let fields = validate_person(parse_body(&req, body)?)?;
    let id = EntityId(id.into_inner());

    let request_manager = request_manager.get_ref().clone();

    let replaced = web::block(move || request_manager.send_replace(id, fields)).await??;

    Ok(HttpResponse::Ok().json(replaced))
}

#[delete("/person/{id}")]
async fn delete_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let request_manager = request_manager.get_ref().clone();
    let id = EntityId(id.into_inner());

    web::block(move || request_manager.send_remove(id)).await??;

    Ok(HttpResponse::Ok().json(MessageBody {
        message: "Person deleted successfully",
    }))
}

/// Fallback for every request that matches no route
pub async fn endpoint_not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::EndpointNotFound)
}
