//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use backend::domain::{LedgerService, RedemptionService, SessionLifecycleService};
use backend::inbound::http::attendance::{
    delete_record, list_records, mark_attendance, session_status,
};
use backend::inbound::http::sessions::{close_session, open_session, resolve_session_by_code};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::middleware::RequestTrace;
use backend::outbound::persistence::{DieselAttendanceRepository, DieselSessionRepository};
#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP port bundle from configuration.
///
/// With a database pool, the real Diesel-backed services are wired up; the
/// fixture ports otherwise, so the surface still boots for tests and local
/// smoke runs.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let sessions = Arc::new(DieselSessionRepository::new(pool.clone()));
            let ledger = Arc::new(DieselAttendanceRepository::new(pool.clone()));
            let clock = Arc::new(DefaultClock);

            let lifecycle = Arc::new(SessionLifecycleService::new(
                sessions.clone(),
                clock.clone(),
            ));
            let redemption = Arc::new(RedemptionService::new(sessions, ledger.clone(), clock));
            let ledger_service = Arc::new(LedgerService::new(ledger));

            HttpState::new(HttpStatePorts {
                session_lifecycle: lifecycle.clone(),
                session_lookup: lifecycle,
                redemption: redemption.clone(),
                redemption_status: redemption,
                ledger: ledger_service.clone(),
                ledger_admin: ledger_service,
            })
        }
        None => HttpState::new(HttpStatePorts::default()),
    }
}

fn build_app(
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(state)
        .service(open_session)
        .service(close_session)
        .service(resolve_session_by_code)
        .service(mark_attendance)
        .service(session_status)
        .service(list_records)
        .service(delete_record);

    let app = App::new().wrap(RequestTrace).service(api);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run the HTTP server until shutdown.
///
/// # Errors
/// Returns the bind or accept-loop error from the underlying server.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_http_state(&config));
    let key = config.key.clone();
    let cookie_secure = config.cookie_secure;
    let same_site = config.same_site;
    let bind_addr = config.bind_addr();

    HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure, same_site))
        .bind(bind_addr)?
        .run()
        .await
}
