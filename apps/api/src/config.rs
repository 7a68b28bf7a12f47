use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Bucket for original uploaded resumes.
    pub s3_resume_bucket: String,
    /// Bucket for regenerated resumes.
    pub s3_generated_bucket: String,
    /// Custom endpoint (MinIO); `None` talks to AWS.
    pub s3_endpoint: Option<String>,
    pub s3_region: String,
    /// Base URL used to build public object links. `None` uses the AWS virtual-host form.
    pub s3_public_url: Option<String>,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,
    pub generator: GeneratorConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Settings for the out-of-process resume generation script.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub interpreter: String,
    pub script: String,
    pub output_dir: String,
    pub provider: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_resume_bucket: require_env("S3_RESUME_BUCKET")?,
            s3_generated_bucket: require_env("S3_GENERATED_BUCKET")?,
            s3_endpoint: optional_env("S3_ENDPOINT"),
            s3_region: env_or("S3_REGION", "us-east-1"),
            s3_public_url: optional_env("S3_PUBLIC_URL"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_url: env_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: env_or("OPENAI_MODEL", "gpt-4"),
            generator: GeneratorConfig {
                interpreter: env_or("GENERATOR_INTERPRETER", "python3"),
                script: env_or("GENERATOR_SCRIPT", "backend/app.py"),
                output_dir: env_or("GENERATOR_OUTPUT_DIR", "public/generated"),
                provider: env_or("GENERATOR_PROVIDER", "GPT"),
                model: env_or("GENERATOR_MODEL", "gpt-4o"),
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for router tests; nothing here is dialled.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/ats_test".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            s3_resume_bucket: "resumes".to_string(),
            s3_generated_bucket: "generated".to_string(),
            s3_endpoint: None,
            s3_region: "us-east-1".to_string(),
            s3_public_url: None,
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            openai_api_key: "sk-test".to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            openai_model: "gpt-4".to_string(),
            generator: GeneratorConfig {
                interpreter: "python3".to_string(),
                script: "backend/app.py".to_string(),
                output_dir: std::env::temp_dir().to_string_lossy().into_owned(),
                provider: "GPT".to_string(),
                model: "gpt-4o".to_string(),
            },
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns the variable's value, treating empty strings as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("ATS_API_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("ATS_API_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_env_or_falls_back_on_empty_value() {
        std::env::set_var("ATS_API_TEST_EMPTY_VALUE", "  ");
        assert_eq!(env_or("ATS_API_TEST_EMPTY_VALUE", "fallback"), "fallback");
        std::env::remove_var("ATS_API_TEST_EMPTY_VALUE");
    }

    #[test]
    fn test_optional_env_reads_value() {
        std::env::set_var("ATS_API_TEST_SET_VALUE", "http://minio:9000");
        assert_eq!(
            optional_env("ATS_API_TEST_SET_VALUE").as_deref(),
            Some("http://minio:9000")
        );
        std::env::remove_var("ATS_API_TEST_SET_VALUE");
    }
}
