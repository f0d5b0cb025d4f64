use arcana_engine::{DeckType, SeedInput};
use arcana_oracle::ImageExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub const CONFIG_ENV: &str = "ARCANA_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: SeedInput,
    pub orientation_prob: f64,
    pub deck_type: String,
    pub image_ext: ImageExt,
    pub assets_dir: PathBuf,
    pub narrator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub orientation_prob: ValueSource,
    pub deck_type: ValueSource,
    pub image_ext: ValueSource,
    pub assets_dir: ValueSource,
    pub narrator: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            orientation_prob: ValueSource::Default,
            deck_type: ValueSource::Default,
            image_ext: ValueSource::Default,
            assets_dir: ValueSource::Default,
            narrator: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: SeedInput::Unseeded,
            orientation_prob: arcana_engine::draw::DEFAULT_ORIENTATION_PROB,
            deck_type: DeckType::default().as_str().to_string(),
            image_ext: ImageExt::default(),
            assets_dir: PathBuf::from("assets"),
            narrator: "template".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Defaults, then the TOML file named by `ARCANA_CONFIG`, then `ARCANA_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = v;
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.orientation_prob {
            cfg.orientation_prob = v;
            sources.orientation_prob = ValueSource::File;
        }
        if let Some(v) = f.deck_type {
            cfg.deck_type = v;
            sources.deck_type = ValueSource::File;
        }
        if let Some(v) = f.image_ext {
            cfg.image_ext = v;
            sources.image_ext = ValueSource::File;
        }
        if let Some(v) = f.assets_dir {
            cfg.assets_dir = v;
            sources.assets_dir = ValueSource::File;
        }
        if let Some(v) = f.narrator {
            cfg.narrator = v;
            sources.narrator = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("ARCANA_SEED")
        && !seed.is_empty()
    {
        cfg.seed = SeedInput::from_arg(&seed);
        sources.seed = ValueSource::Env;
    }
    if let Ok(prob) = std::env::var("ARCANA_REVERSED_PROB")
        && !prob.is_empty()
    {
        cfg.orientation_prob = prob
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid reversed probability: {}", prob)))?;
        sources.orientation_prob = ValueSource::Env;
    }
    if let Ok(deck) = std::env::var("ARCANA_DECK")
        && !deck.is_empty()
    {
        cfg.deck_type = deck;
        sources.deck_type = ValueSource::Env;
    }
    if let Ok(ext) = std::env::var("ARCANA_IMAGE_EXT")
        && !ext.is_empty()
    {
        cfg.image_ext = ImageExt::from_str(&ext).map_err(ConfigError::Invalid)?;
        sources.image_ext = ValueSource::Env;
    }
    if let Ok(dir) = std::env::var("ARCANA_ASSETS_DIR")
        && !dir.is_empty()
    {
        cfg.assets_dir = PathBuf::from(dir);
        sources.assets_dir = ValueSource::Env;
    }
    if let Ok(narrator) = std::env::var("ARCANA_NARRATOR")
        && !narrator.is_empty()
    {
        cfg.narrator = narrator;
        sources.narrator = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<SeedInput>,
    #[serde(default)]
    orientation_prob: Option<f64>,
    #[serde(default)]
    deck_type: Option<String>,
    #[serde(default)]
    image_ext: Option<ImageExt>,
    #[serde(default)]
    assets_dir: Option<PathBuf>,
    #[serde(default)]
    narrator: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&cfg.orientation_prob) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: orientation_prob must be within [0, 1], got {}",
            cfg.orientation_prob
        )));
    }
    if DeckType::from_str(&cfg.deck_type).is_err() {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unsupported deck_type {}",
            cfg.deck_type
        )));
    }
    if !matches!(cfg.narrator.as_str(), "template" | "gemini") {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: narrator must be template or gemini, got {}",
            cfg.narrator
        )));
    }
    Ok(())
}
