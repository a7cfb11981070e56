use std::sync::{Arc, Mutex, PoisonError};

use actix_web::rt::time::sleep;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::client::RequestTemplate;
use crate::config::ServerConfig;
use crate::error::TriggerError;
use crate::executor::FloodEngine;
use crate::models::params::TriggerParams;
use crate::models::test_run::TestRun;

pub struct AppState {
    engine: FloodEngine,
    drain_stragglers: bool,
    current: Mutex<Option<Arc<TestRun>>>,
    // Held from draining the previous run until the next one is installed.
    launch: AsyncMutex<()>,
}

impl AppState {
    pub fn new(engine: FloodEngine, drain_stragglers: bool) -> Self {
        Self {
            engine,
            drain_stragglers,
            current: Mutex::new(None),
            launch: AsyncMutex::new(()),
        }
    }

    /// The most recently started run, live or finished.
    pub fn current_run(&self) -> Option<Arc<TestRun>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_run(&self, run: Arc<TestRun>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(run);
    }
}

pub fn routes(cfg: &mut web::ServiceConfig, path: &str) {
    cfg.route(path, web::get().to(trigger));
}

/// Starts a test run, waits out its duration and answers with the number of
/// attempts that completed inside the window.
pub async fn trigger(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, TriggerError> {
    let params = TriggerParams::from_query(req.query_string()).map_err(rejected)?;
    let template = RequestTemplate::parse(&params.url).map_err(rejected)?;

    info!(url = %params.url, duration = ?params.duration, "starting test run");

    let run = {
        let _launch = state.launch.lock().await;
        if state.drain_stragglers {
            if let Some(previous) = state.current_run() {
                previous.drain().await;
            }
        }

        let run = Arc::new(TestRun::new(template, params.duration));
        state.replace_run(Arc::clone(&run));
        state.engine.start(Arc::clone(&run));
        run
    };

    // Stops the run even if this future is dropped before the window ends.
    let stop = run.stop_signal().clone().drop_guard();
    sleep(run.duration()).await;
    drop(stop);

    let report = run.report();
    info!("{}", run.summary());

    Ok(HttpResponse::Ok().json(report))
}

fn rejected(err: TriggerError) -> TriggerError {
    warn!("{}", err);
    err
}

pub async fn serve(config: &ServerConfig, engine: FloodEngine) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(engine, config.drain_stragglers));
    let path = config.path.clone();

    HttpServer::new(move || {
        let path = path.clone();
        App::new()
            .app_data(state.clone())
            .configure(move |cfg| routes(cfg, &path))
    })
    .bind(config.listen.as_str())?
    .run()
    .await
}
