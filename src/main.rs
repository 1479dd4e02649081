use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use graspify::clock::SystemClock;
use graspify::db::{self, SqliteSnapshots};
use graspify::game::GameStore;
use graspify::state::AppState;
use graspify::{config, handlers};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "graspify=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_path = config::load_database_path();
  let pool = db::init_db(&db_path).expect("Failed to initialize database");

  let mut store = GameStore::open(
    Box::new(SqliteSnapshots::new(pool, config::STORAGE_KEY)),
    Box::new(SystemClock),
  );

  // One check-in per session start
  if store.check_in_today().is_new_day() {
    store.reset_missions_for_new_day();
  }
  store.drain_events();

  let app = handlers::router(AppState::new(store)).layer(TraceLayer::new_for_http());

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
