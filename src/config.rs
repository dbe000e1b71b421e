use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;

use crate::domain::types::Inputs;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: Url,
    pub log_file: Option<PathBuf>,
    pub initial: Option<Inputs>,
}

impl AppConfig {
    pub fn new(api_url: &str, log_file: Option<PathBuf>, target: Option<&str>) -> Result<Self> {
        let api_url = Url::parse(api_url).with_context(|| format!("Invalid API URL: {api_url}"))?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot carry a path: {api_url}");
        }

        let initial = target.map(parse_repo_spec).transpose()?;

        Ok(Self {
            api_url,
            log_file,
            initial,
        })
    }
}

/// Parse `owner/repo`
pub fn parse_repo_spec(spec: &str) -> Result<Inputs> {
    let (owner, repo) = spec
        .trim()
        .split_once('/')
        .context("Invalid repo format. Use owner/repo")?;

    if owner.is_empty() || repo.is_empty() {
        anyhow::bail!("Invalid repo format. Use owner/repo");
    }

    Ok(Inputs::new(owner, repo))
}
