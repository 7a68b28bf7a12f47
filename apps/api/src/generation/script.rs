//! Runs the generator script as a child process.
//!
//! Invocation: `{interpreter} {script} <resume_path> <job_description>
//! <recruiter_prompt> <api_key> <provider> <model>`. The script prints the
//! produced file's path as its last non-empty stdout line and exits 0.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::GeneratorConfig;
use crate::errors::AppError;
use crate::generation::{GenerationJob, ResumeGenerator};

pub struct ScriptResumeGenerator {
    config: GeneratorConfig,
    api_key: String,
}

impl ScriptResumeGenerator {
    pub fn new(config: GeneratorConfig, api_key: String) -> Self {
        Self { config, api_key }
    }
}

#[async_trait]
impl ResumeGenerator for ScriptResumeGenerator {
    async fn generate(&self, job: GenerationJob<'_>) -> Result<PathBuf, AppError> {
        let provider = job.provider.unwrap_or(&self.config.provider);
        let model = job.model.unwrap_or(&self.config.model);

        info!(
            "Running resume generator {} (provider: {provider}, model: {model})",
            self.config.script
        );

        let mut command = Command::new(&self.config.interpreter);
        command
            .arg(&self.config.script)
            .arg(job.resume_path)
            .arg(job.job_description)
            .arg(job.recruiter_prompt)
            .arg(&self.api_key)
            .arg(provider)
            .arg(model)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = command.output().await.map_err(|e| {
            AppError::Generation(format!(
                "failed to spawn {} {}: {e}",
                self.config.interpreter, self.config.script
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            "Generator exited with {:?}: stdout {} bytes, stderr {} bytes",
            output.status.code(),
            stdout.len(),
            stderr.len()
        );

        if !output.status.success() {
            error!("Generator stderr: {}", stderr.trim());
            return Err(AppError::Generation(format!(
                "generator exited with status {:?}",
                output.status.code()
            )));
        }

        let produced = produced_path(&stdout).ok_or_else(|| {
            AppError::Generation("generator printed no output path".to_string())
        })?;

        ensure_within(&produced, Path::new(&self.config.output_dir)).await?;

        info!("Generator produced {}", produced.display());
        Ok(produced)
    }
}

/// The last non-empty line of the script's stdout.
fn produced_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// Rejects outputs that do not exist or lie outside the served directory.
async fn ensure_within(produced: &Path, output_dir: &Path) -> Result<(), AppError> {
    let produced = tokio::fs::canonicalize(produced).await.map_err(|e| {
        AppError::Generation(format!("generated file {} not found: {e}", produced.display()))
    })?;
    let output_dir = tokio::fs::canonicalize(output_dir).await.map_err(|e| {
        AppError::Generation(format!(
            "output directory {} not found: {e}",
            output_dir.display()
        ))
    })?;

    if !produced.starts_with(&output_dir) {
        return Err(AppError::Generation(format!(
            "generated file {} is outside {}",
            produced.display(),
            output_dir.display()
        )));
    }
    Ok(())
}
