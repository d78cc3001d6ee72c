use std::path::Path;
use std::sync::Arc;

mod audit;
mod config;
mod dispatch;
mod handler;
mod http;
mod logger;
mod request;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sizing the thread pool from the workers config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        println!("[CONFIG] Using {workers} worker threads");
    } else {
        println!("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(cfg));

    logger::log_server_start(&addr, &state.config);

    // The output directory is created lazily by the first audit write; the
    // proxy asset however has to be provisioned by hand, so say so early.
    if !Path::new(&state.config.harness.asset_path).is_file() {
        logger::log_warning(&format!(
            "Proxy asset '{}' not found; the proxy-static-file action will fail until it exists",
            state.config.harness.asset_path
        ));
    }

    server::run(listener, state).await
}
