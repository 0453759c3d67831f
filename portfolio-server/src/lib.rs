//! Static delivery service for the portfolio site.
//!
//! Every request is resolved against a document root. Found files are
//! served with a one-day cache lifetime and validators; anything else gets
//! the root document so the client-side navigation can read the URL
//! fragment itself. A fixed set of security headers goes on every response.

#[macro_use]
extern crate rocket;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::http::Status;
use rocket::request::Request;
use rocket::{Build, Rocket};

pub mod compression_fairing;
pub mod config;
pub mod error;
pub mod policy;
pub mod security_headers_fairing;
pub mod static_files;
pub mod testing;

pub use config::{DeliveryConfig, figment};
pub use error::DeliveryError;
pub use policy::{DeliveryPolicy, FrameOptions};

use static_files::{Delivery, Preconditions};

const SERVER_ERROR_BODY: &str = "Something went wrong!";

/// Anything no route took (non-GET requests, rejected paths) still gets the
/// root document, with a 404 status.
#[catch(404)]
async fn not_found(req: &Request<'_>) -> Result<(Status, Delivery), (Status, &'static str)> {
    let Some(policy) = req.rocket().state::<DeliveryPolicy>() else {
        error!("No delivery policy while handling 404 for {}", req.uri());
        return Err((Status::InternalServerError, SERVER_ERROR_BODY));
    };

    match static_files::deliver_index(policy, &Preconditions::default()).await {
        Ok(delivery) => Ok((Status::NotFound, delivery)),
        Err(e) => {
            error!("Failed to serve fallback document for {}: {}", req.uri(), e);
            Err((Status::InternalServerError, SERVER_ERROR_BODY))
        }
    }
}

#[catch(500)]
fn internal_server_error(req: &Request) -> &'static str {
    error!("Internal server error: {} {}", req.method(), req.uri());
    SERVER_ERROR_BODY
}

fn startup_banner_fairing() -> AdHoc {
    AdHoc::on_liftoff("Startup Banner", |rocket| {
        Box::pin(async move {
            let config = rocket.config();
            info!("Portfolio server running!");
            info!("Local: http://localhost:{}", config.port);
            info!("Listening on {}:{}", config.address, config.port);
            info!("Press Ctrl+C to stop the server");
        })
    })
}

fn shutdown_notice_fairing() -> AdHoc {
    AdHoc::on_shutdown("Shutdown Notice", |_| {
        Box::pin(async move {
            info!("Shutdown signal received: closing HTTP server");
        })
    })
}

/// Assembles the server from an arbitrary figment. Tests use this with a
/// temporary document root.
pub fn build_rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(policy::delivery_policy_fairing())
        .attach(security_headers_fairing::SecurityHeaders)
        .attach(compression_fairing::GzipCompression)
        .attach(startup_banner_fairing())
        .attach(shutdown_notice_fairing())
        .register("/", catchers![not_found, internal_server_error])
        .mount("/", static_files::routes())
}

/// The server as configured from `Portfolio.toml` and the environment.
pub fn rocket() -> Rocket<Build> {
    build_rocket(figment())
}
