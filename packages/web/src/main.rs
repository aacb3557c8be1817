use dioxus::prelude::*;

use api::Uuid;
use ui::SessionProvider;
use views::{
    AppShell, ClientDashboard, ClientManagement, ClientProfile, Home, Login, LoginClient,
    LoginTrainer, Register, TrainerDashboard, TrainerProfile, TrainerRequests, WorkoutPlan,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/login-cliente")]
    LoginClient {},
    #[route("/login-trainer")]
    LoginTrainer {},
    #[route("/registrati")]
    Register {},
    #[layout(AppShell)]
        #[route("/trainer-dashboard")]
        TrainerDashboard {},
        #[route("/client-management/:client_id")]
        ClientManagement { client_id: Uuid },
        #[route("/trainer-requests")]
        TrainerRequests {},
        #[route("/trainer-profile")]
        TrainerProfile {},
        #[route("/client-dashboard")]
        ClientDashboard {},
        #[route("/workout-plan/:id")]
        WorkoutPlan { id: Uuid },
        #[route("/client-profile")]
        ClientProfile {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        init_tracing();
        let result: Result<(), Box<dyn std::error::Error>> = tokio::runtime::Runtime::new()
            .map_err(Into::into)
            .and_then(|runtime| runtime.block_on(launch_server()));
        if let Err(e) = result {
            tracing::error!("server stopped: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::{time, SameSite};
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    let config = api::config::ServerConfig::from_env()?;

    let pool = api::db::get_pool().await?;
    sqlx::migrate!("../api/migrations").run(pool).await?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::try_from(
            config.session_ttl,
        )?));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::views::VIEWS_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Unknown paths go back to the home page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!(path = %segments.join("/"), "unknown route");
    nav.replace(Route::Home {});
    rsx! {}
}
