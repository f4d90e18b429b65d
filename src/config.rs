use clap::Parser;

/// Cricdar web server
#[derive(Parser, Debug, Clone)]
#[command(name = "cricdar", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// SQLite database path for admin-authored content
    #[arg(long, env = "DATABASE_PATH", default_value = "cricdar.db")]
    pub database_path: String,

    /// Cricket-data API base URL
    #[arg(
        long,
        env = "CRICKET_API_URL",
        default_value = "https://api.cricapi.com/v1"
    )]
    pub cricket_api_url: String,

    /// Cricket-data API key (data endpoints fail closed without it)
    #[arg(long, env = "CRICKET_API_KEY")]
    pub cricket_api_key: Option<String>,

    /// Override base URL for the player endpoints (defaults to the main API URL)
    #[arg(long, env = "PLAYER_API_URL")]
    pub player_api_url: Option<String>,

    /// Override API key for the player endpoints (defaults to the main key)
    #[arg(long, env = "PLAYER_API_KEY")]
    pub player_api_key: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,

    /// Transactional-email API URL for the contact form
    #[arg(long, env = "MAIL_API_URL")]
    pub mail_api_url: Option<String>,

    /// Transactional-email API key
    #[arg(long, env = "MAIL_API_KEY")]
    pub mail_api_key: Option<String>,

    /// Recipient address for contact-form messages
    #[arg(long, env = "CONTACT_RECIPIENT")]
    pub contact_recipient: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a valid socket address", self.listen_addr);
        }
        if self.mail_api_url.is_some() {
            if self.mail_api_key.is_none() {
                anyhow::bail!("MAIL_API_KEY is required when MAIL_API_URL is set");
            }
            if self.contact_recipient.is_none() {
                anyhow::bail!("CONTACT_RECIPIENT is required when MAIL_API_URL is set");
            }
        }
        Ok(())
    }
}
