//! Serving daemon for the Marga travel companion.
//!
//! Wires the orchestration engine from `marga-rs` to its real
//! collaborators (an Ollama chat backend, OpenWeather, Nominatim and
//! Overpass for geo intelligence, an LLM-backed transit planner, and the
//! seeded city knowledge store) and exposes the turn endpoint over HTTP.

pub mod args;
pub mod logger;
pub mod ollama_chat;
pub mod open_weather;
pub mod osm;
pub mod prompts;
pub mod seed;
pub mod server;
pub mod transit_llm;

pub use args::Args;
pub use ollama_chat::{JsonLlm, OllamaChat};
pub use open_weather::OpenWeather;
pub use osm::OsmGeoGateway;
pub use seed::{load_goa, CitySeed};
pub use transit_llm::LlmTransitPlanner;
