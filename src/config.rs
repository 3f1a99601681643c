use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_port: u16,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
        })
    }
}
