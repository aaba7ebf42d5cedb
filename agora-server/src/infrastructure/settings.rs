use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) db_host: String,
    pub(crate) db_port: u16,
    pub(crate) db_user: String,
    pub(crate) db_password: String,
    pub(crate) db_name: String,
    pub(crate) db_max_connections: u32,
    pub(crate) http_addr: String,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        let db_host = get_required("DB_HOST").context("DB_HOST is required")?;
        let db_port: u16 = get_required("DB_PORT")
            .context("DB_PORT is required")?
            .parse()
            .context("Failed to parse DB_PORT, expecting integer")?;
        let db_user = get_required("DB_USER").context("DB_USER is required")?;
        let db_password = get_required("DB_PASSWORD").context("DB_PASSWORD is required")?;
        let db_name = get_required("DB_NAME").context("DB_NAME is required")?;

        let db_max_connections = parse_u32_env("DB_MAX_CONNECTIONS", 10)?;

        let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
        let port: u16 = port
            .parse()
            .context("Failed to parse PORT, expecting integer")?;
        let http_addr = format!("0.0.0.0:{port}");

        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());

        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            db_max_connections,
            http_addr,
            log_level,
            http_request_body_limit_bytes,
        })
    }

    pub(crate) fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_u32_env(key: &str, default: u32) -> Result<u32> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u32>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
