use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use margad::{
    args::Args, logger, seed, server, JsonLlm, LlmTransitPlanner, OllamaChat, OpenWeather,
    OsmGeoGateway,
};
use marga_rs::{Collaborators, Engine, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let llm = Arc::new(OllamaChat::try_new(&args.ollama_url, &args.model)?);
    let json_llm: Arc<dyn JsonLlm> = llm.clone();
    let weather = Arc::new(OpenWeather::new(
        &args.weather_url,
        std::env::var("OPENWEATHER_API_KEY").ok(),
    ));
    let geo = Arc::new(OsmGeoGateway::new(
        Arc::clone(&json_llm),
        &args.nominatim_url,
        &args.overpass_url,
    )?);
    let routes = Arc::new(LlmTransitPlanner::new(json_llm));
    let seed = seed::load_goa()?;

    let ttl = (args.session_ttl_mins > 0)
        .then(|| Duration::from_secs(args.session_ttl_mins * 60));
    let mut engine = Engine::new(Collaborators {
        llm,
        weather,
        routes,
        geo,
        knowledge: Arc::new(seed.store),
    })
    .with_store(SessionStore::with_ttl(ttl));
    for (city, facts) in seed.trusted {
        engine = engine.trust_city(city, facts);
    }

    let app = server::router(Arc::new(engine));
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    tracing::info!(%addr, model = %args.model, "margad listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
