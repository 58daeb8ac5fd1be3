use clap::Parser;

/// Command line arguments for the margad binary.
#[derive(Parser, Clone, Debug)]
pub struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
    #[arg(long = "ollama-url", default_value = "http://localhost:11434")]
    pub ollama_url: String,
    #[arg(long, default_value = "gemma3:27b")]
    pub model: String,
    #[arg(
        long = "weather-url",
        default_value = "https://api.openweathermap.org/data/2.5"
    )]
    pub weather_url: String,
    #[arg(
        long = "nominatim-url",
        default_value = "https://nominatim.openstreetmap.org"
    )]
    pub nominatim_url: String,
    #[arg(long = "overpass-url", default_value = "https://overpass-api.de")]
    pub overpass_url: String,
    /// Idle minutes before a session is evicted; 0 keeps sessions forever.
    #[arg(long = "session-ttl-mins", default_value_t = 24 * 60)]
    pub session_ttl_mins: u64,
}
