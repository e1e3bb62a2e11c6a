//! HTTP routes (registration only; the game itself runs over the framed
//! table protocol).

use actix_web::web;

pub mod register;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(register::configure_routes);
}
