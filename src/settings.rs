use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Admin {
    /// Telegram ids allowed to decide deposit/withdraw requests.
    pub ids: Vec<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Bonus {
    pub signup_free_flips: u32,
    pub welcome_amount: f64,
    pub welcome_free_flips: u32,
    pub referral_reward: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub admin: Admin,
    pub bonus: Bonus,
}

impl Settings {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder().add_source(File::with_name(path)).build()?;

        config.try_deserialize()
    }
}
