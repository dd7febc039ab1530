use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use calproxy::cache::Cache;
use calproxy::client::Client;
use calproxy::config::Settings;
use calproxy::gateway::Gateway;
use calproxy::ical::IcalParser;
use calproxy::scheduler::Scheduler;
use calproxy::Provider;


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    let origin = settings.origin()?;
    let client = Client::new(settings.fetch_timeout())?;
    let provider = Provider::new(origin, client, IcalParser, &settings.free_busy_title);

    // Nothing would be worth serving if the origin cannot be read right now
    log::info!("starting initial fetch");
    let snapshot = match provider.build_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("Initial fetch failed: {}", err);
            return Err(err.into());
        },
    };
    log::info!("initial fetch successful");

    let cache = Arc::new(Cache::new(snapshot));
    let gateway = Gateway::new(&settings.secret, provider.origin(), Arc::clone(&cache));
    log::info!("calendar will be served at {}", gateway.full_path());
    log::info!("free/busy will be served at {}", gateway.free_busy_path());

    let mut scheduler = Scheduler::new(Arc::new(provider), cache);
    scheduler.start(settings.update_interval()).await?;

    let listen_addr = settings.listen_addr();
    let listener = TcpListener::bind(listen_addr).await?;
    log::info!("starting to listen on {}", listen_addr);
    gateway.serve(listener).await?;

    scheduler.stop().await;
    Ok(())
}
