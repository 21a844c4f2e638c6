use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio::sync::mpsc;
use warp::Filter;

use log::{info, initialize_logger};
use planner::config::{get_variable, parse_variable, StoreKind};
use planner::environment::Environment;
use planner::routes;
use planner::store::{FileStore, MemoryStore, Store};
use planner::urls::Urls;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    #[cfg(feature = "env_logging")]
    let _env_logging_guard = log::initialize_env_logging();

    let logger = initialize_logger();

    let main_port: u16 = parse_variable("PLANNER_PORT");
    let admin_port: u16 = parse_variable("PLANNER_ADMIN_PORT");

    info!(logger, "Starting..."; "main_port" => main_port, "admin_port" => admin_port);
    let logger = Arc::new(logger);

    let store: Arc<dyn Store> = match StoreKind::from_env() {
        StoreKind::Memory => {
            info!(logger, "Keeping groups in memory");
            Arc::new(MemoryStore::new())
        }
        StoreKind::File(directory) => {
            info!(logger, "Keeping groups on disk"; "directory" => %directory.display());
            Arc::new(FileStore::open(directory)?)
        }
    };

    let urls = Arc::new(Urls::new(get_variable("PLANNER_BASE_URL"))?);

    let environment = Environment::new(logger.clone(), store, urls);

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            // the receiver only goes away once everything is shutting
            // down anyway
            let _ = termination_sender.send(()).await;
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let (_, main_server) = warp::serve(routes::make_routes(environment.clone()))
            .bind_with_graceful_shutdown(([0, 0, 0, 0], main_port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], admin_port), async {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
