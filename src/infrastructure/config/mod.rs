use crate::domain::translation::{TargetLanguage, DEFAULT_MAX_CHUNK_CHARS};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TARGET_LANGUAGES: &str = "Hindi:hi,Telugu:te,Kannada:kn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Artifacts
    pub output_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    // Pipeline
    pub source_language: String,
    pub target_languages: Vec<TargetLanguage>,
    pub chunk_max_chars: usize,
    pub translation_cache_enabled: bool,
    // Providers
    pub tts_provider: TtsProvider,
    pub provider_timeout_secs: u64,
    pub aws_region: String,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_provider: TtsProvider = env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "google".to_string())
            .parse()?;

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if tts_provider == TtsProvider::OpenAi && openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when TTS_PROVIDER=openai".into());
        }

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "outputs".to_string())
                .into(),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                .parse()?,
            source_language: env::var("SOURCE_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            target_languages: parse_target_languages(
                &env::var("TARGET_LANGUAGES")
                    .unwrap_or_else(|_| DEFAULT_TARGET_LANGUAGES.to_string()),
            )?,
            chunk_max_chars: env::var("CHUNK_MAX_CHARS")
                .unwrap_or_else(|_| DEFAULT_MAX_CHUNK_CHARS.to_string())
                .parse()?,
            translation_cache_enabled: env::var("TRANSLATION_CACHE_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            tts_provider,
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_api_key,
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
        };

        if config.chunk_max_chars == 0 {
            return Err("CHUNK_MAX_CHARS must be greater than zero".into());
        }

        Ok(config)
    }

    /// Log filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "polyglot_audio_backend=debug,tower_http=debug",
            Environment::Production => "polyglot_audio_backend=info,tower_http=info",
        }
    }
}

impl FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(TtsProvider::Google),
            "polly" => Ok(TtsProvider::Polly),
            "openai" => Ok(TtsProvider::OpenAi),
            other => Err(format!(
                "Unknown TTS_PROVIDER '{}', expected google, polly or openai",
                other
            )),
        }
    }
}

/// Parse an ordered `Name:code` list such as `Hindi:hi,Telugu:te`.
pub fn parse_target_languages(raw: &str) -> Result<Vec<TargetLanguage>, String> {
    let languages = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, code) = entry
                .split_once(':')
                .ok_or_else(|| format!("Invalid target language entry '{}', expected Name:code", entry))?;
            let (name, code) = (name.trim(), code.trim());
            if name.is_empty() || code.is_empty() {
                return Err(format!("Invalid target language entry '{}'", entry));
            }
            Ok(TargetLanguage::new(name, code))
        })
        .collect::<Result<Vec<_>, String>>()?;

    if languages.is_empty() {
        return Err("TARGET_LANGUAGES must name at least one language".to_string());
    }

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = languages.iter().find(|l| !seen.insert(l.code.clone())) {
        return Err(format!("Duplicate target language code '{}'", dup.code));
    }

    Ok(languages)
}
