//! Configuration for the RAG pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Generation backend (bedrock or ollama)
    pub backend: BackendProvider,
    /// Timeout in seconds for every remote call
    pub timeout_secs: u64,
    /// AWS Bedrock configuration (knowledge base is always served from here)
    pub bedrock: BedrockConfig,
    /// Ollama configuration (used when backend = ollama)
    pub ollama: OllamaConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Sampling for the prompt classifier
    pub classification: ClassificationConfig,
    /// Sampling for answer generation
    pub generation: GenerationConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            backend: BackendProvider::default(),
            timeout_secs: 60,
            bedrock: BedrockConfig::default(),
            ollama: OllamaConfig::default(),
            retrieval: RetrievalConfig::default(),
            classification: ClassificationConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Backend provider selection for text generation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// AWS Bedrock runtime (Claude via invoke_model)
    #[default]
    Bedrock,
    /// Local Ollama server
    Ollama,
}

impl FromStr for BackendProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bedrock" => Ok(Self::Bedrock),
            "ollama" => Ok(Self::Ollama),
            other => Err(Error::config(format!(
                "unknown backend '{}' (expected 'bedrock' or 'ollama')",
                other
            ))),
        }
    }
}

/// AWS Bedrock configuration
///
/// Credentials are not configured here; they come from the standard AWS chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockConfig {
    /// AWS region (e.g., "us-east-1")
    pub region: String,
    /// Model identifier passed to invoke_model
    pub model_id: String,
    /// Knowledge base to retrieve from
    pub knowledge_base_id: String,
    /// Override for the bedrock-runtime endpoint
    pub runtime_endpoint: Option<String>,
    /// Override for the bedrock-agent-runtime endpoint
    pub agent_runtime_endpoint: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            model_id: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            knowledge_base_id: String::new(),
            runtime_endpoint: None,
            agent_runtime_endpoint: None,
        }
    }
}

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Chat model name
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of chunks to retrieve per question
    pub max_results: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { max_results: 3 }
    }
}

/// Classifier sampling: deterministic, only a short label is expected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 0.1,
            max_tokens: 10,
        }
    }
}

/// Answer generation sampling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Lower = more factual
    pub temperature: f32,
    pub top_p: f32,
    /// Response length limit
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            max_tokens: 500,
        }
    }
}

impl RagConfig {
    /// Parse a TOML config file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: RagConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Load from an explicit path, else the default location if present, else defaults.
    /// Environment overrides are applied last. Call [`RagConfig::validate`] once any
    /// further overrides are in place.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    tracing::debug!("Loading config from {}", path.display());
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// `<config dir>/machinery-rag/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("machinery-rag").join("config.toml"))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = get("AWS_REGION") {
            self.bedrock.region = region;
        }
        if let Some(model) = get("BEDROCK_MODEL_ID") {
            self.bedrock.model_id = model;
        }
        if let Some(kb) = get("BEDROCK_KNOWLEDGE_BASE_ID") {
            self.bedrock.knowledge_base_id = kb;
        }
        if let Some(url) = get("OLLAMA_BASE_URL") {
            self.ollama.base_url = url;
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            self.ollama.model = model;
        }
    }

    /// Check ranges and required fields
    pub fn validate(&self) -> Result<()> {
        if self.bedrock.knowledge_base_id.trim().is_empty() {
            return Err(Error::config(
                "bedrock.knowledge_base_id is required (or set BEDROCK_KNOWLEDGE_BASE_ID)",
            ));
        }
        if self.backend == BackendProvider::Bedrock && self.bedrock.model_id.trim().is_empty() {
            return Err(Error::config("bedrock.model_id must not be empty"));
        }
        if self.backend == BackendProvider::Ollama && self.ollama.model.trim().is_empty() {
            return Err(Error::config("ollama.model must not be empty"));
        }
        if self.retrieval.max_results == 0 {
            return Err(Error::config("retrieval.max_results must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }

        check_sampling(
            "classification",
            self.classification.temperature,
            self.classification.top_p,
            self.classification.max_tokens,
        )?;
        check_sampling(
            "generation",
            self.generation.temperature,
            self.generation.top_p,
            self.generation.max_tokens,
        )
    }
}

fn check_sampling(section: &str, temperature: f32, top_p: f32, max_tokens: u32) -> Result<()> {
    if !(0.0..=1.0).contains(&temperature) {
        return Err(Error::config(format!(
            "{}.temperature must be within [0, 1], got {}",
            section, temperature
        )));
    }
    if !(0.0..=1.0).contains(&top_p) {
        return Err(Error::config(format!(
            "{}.top_p must be within [0, 1], got {}",
            section, top_p
        )));
    }
    if max_tokens == 0 {
        return Err(Error::config(format!(
            "{}.max_tokens must be greater than 0",
            section
        )));
    }
    Ok(())
}
