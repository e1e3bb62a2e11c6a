//! `POST /register`: exchange a client secret and display name for a fresh
//! client id, gated by the server password.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::registry::UserStore;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "serverPassword")]
    pub server_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "clientID")]
    pub client_id: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Non-POST methods on the resource answer 405. Every payload problem,
    // wrong content type included, answers 400.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().finish())
            .into()
    });
    cfg.service(
        web::resource("/register")
            .app_data(json_config)
            .route(web::post().to(register)),
    );
}

async fn register(
    store: web::Data<UserStore>,
    config: web::Data<Config>,
    request: web::Json<RegisterRequest>,
) -> impl Responder {
    if request.server_password != config.server_password {
        debug!("registration rejected: wrong server password");
        return HttpResponse::Unauthorized().finish();
    }

    match store.register(&request.client_secret, &request.display_name) {
        Ok(client_id) => {
            debug!(%client_id, "registered user");
            HttpResponse::Ok().json(RegisterResponse { client_id })
        }
        Err(err) => {
            error!(%err, "failed to persist user");
            HttpResponse::InternalServerError().finish()
        }
    }
}
