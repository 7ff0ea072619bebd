// Route exports
pub mod search;
pub mod suggestions;

use actix_web::web;

pub use suggestions::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(suggestions::configure)
            .configure(search::configure),
    );
}
