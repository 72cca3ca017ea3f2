use anyhow::{Context, Result};
use std::env;

/// How many articles land in each tier. The defaults match the printed
/// layout: two top stories, one shorter second story, four headlines.
#[derive(Debug, Clone)]
pub struct CurationLimits {
    pub top: usize,
    pub second: usize,
    pub brief: usize,
}

impl Default for CurationLimits {
    fn default() -> Self {
        Self {
            top: 2,
            second: 1,
            brief: 4,
        }
    }
}

/// Topics the reader wants covered and topics to suppress.
#[derive(Debug, Clone)]
pub struct InterestProfile {
    pub interests: Vec<String>,
    pub exclusions: Vec<String>,
}

impl Default for InterestProfile {
    fn default() -> Self {
        Self {
            interests: vec![
                "UK and world politics".to_string(),
                "Climate and environment".to_string(),
                "Technology and AI".to_string(),
                "Significant world events".to_string(),
            ],
            exclusions: vec![
                "sport".to_string(),
                "celebrities".to_string(),
                "entertainment".to_string(),
                "royal family gossip".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub guardian_api_key: String,
    pub anthropic_api_key: Option<String>,
    pub claude_model: String,
    pub readwise_token: Option<String>,
    pub location_lat: f64,
    pub location_lon: f64,
    pub location_name: String,
    pub profile: InterestProfile,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let guardian_api_key = env::var("GUARDIAN_API_KEY").context(
            "GUARDIAN_API_KEY not found.\n\n\
            To fix this, create ~/.config/daily-print/.env with:\n  \
            GUARDIAN_API_KEY=your_key_here\n\n\
            Get a Guardian Open Platform key from: https://open-platform.theguardian.com/",
        )?;

        // Optional credentials: absence disables the feature, it is not an error
        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok();
        let readwise_token = env::var("READWISE_TOKEN").ok();

        let claude_model = env::var("CLAUDE_MODEL")
            .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

        // Weather location, defaulting to Witney, Oxfordshire
        let location_lat = env::var("LOCATION_LAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(51.7856);
        let location_lon = env::var("LOCATION_LON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(-1.4857);
        let location_name =
            env::var("LOCATION_NAME").unwrap_or_else(|_| "Witney, Oxfordshire".to_string());

        let mut profile = InterestProfile::default();
        if let Ok(interests) = env::var("NEWS_INTERESTS") {
            profile.interests = parse_topic_list(&interests);
        }
        if let Ok(exclusions) = env::var("NEWS_EXCLUSIONS") {
            profile.exclusions = parse_topic_list(&exclusions);
        }

        Ok(Self {
            guardian_api_key,
            anthropic_api_key,
            claude_model,
            readwise_token,
            location_lat,
            location_lon,
            location_name,
            profile,
        })
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/daily-print/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("daily-print").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}

fn parse_topic_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
