use anyhow::{bail, Context, Result};

use crate::export::raster::MIN_SCALE;
use crate::export::{ExportConfig, PageFormat};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    pub export: ExportConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export: export_config(
                std::env::var("EXPORT_PAGE_FORMAT").ok().as_deref(),
                std::env::var("EXPORT_RASTER_SCALE").ok().as_deref(),
                std::env::var("EXPORT_TOP_MARGIN_PT").ok().as_deref(),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Builds export settings from optional raw values, keeping defaults for unset ones.
fn export_config(
    page: Option<&str>,
    scale: Option<&str>,
    top_margin: Option<&str>,
) -> Result<ExportConfig> {
    let mut config = ExportConfig::default();

    if let Some(raw) = page {
        config.page = PageFormat::parse(raw)
            .with_context(|| format!("EXPORT_PAGE_FORMAT must be 'a4' or 'letter', got '{raw}'"))?;
    }
    if let Some(raw) = scale {
        let scale: f32 = raw
            .parse()
            .context("EXPORT_RASTER_SCALE must be a number")?;
        if !scale.is_finite() || scale < MIN_SCALE {
            bail!("EXPORT_RASTER_SCALE must be at least {MIN_SCALE}, got {scale}");
        }
        config.raster_scale = scale;
    }
    if let Some(raw) = top_margin {
        let margin: f32 = raw
            .parse()
            .context("EXPORT_TOP_MARGIN_PT must be a number")?;
        if !margin.is_finite() || margin < 0.0 {
            bail!("EXPORT_TOP_MARGIN_PT must be non-negative, got {margin}");
        }
        config.top_margin = margin;
    }
    Ok(config)
}
