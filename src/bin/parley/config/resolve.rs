use parley::backend::OpenAIConfig;
use parley::tools::WebSearchConfig;

use crate::args::CliArgs;

use super::types::AppConfig;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Base URL of a self-hosted compatible server, e.g. `http://localhost:8000/v1`.
pub const BASE_URL_ENV: &str = "PARLEY_API_BASEURL";
pub const MODEL_ENV: &str = "PARLEY_MODEL";

/// Everything needed to open a conversation.
#[derive(Debug)]
pub struct Settings {
    pub backend: OpenAIConfig,
    pub search: WebSearchConfig,
}

/// Merges file config, environment and CLI flags, later sources winning.
pub fn resolve_settings<F>(config: &AppConfig, args: &CliArgs, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let model = args
        .model
        .clone()
        .or_else(|| env(MODEL_ENV))
        .unwrap_or_else(|| config.api.model.clone());
    let base_url = args
        .base_url
        .clone()
        .or_else(|| env(BASE_URL_ENV))
        .unwrap_or_else(|| config.api.base_url.clone());
    let system = Some(config.api.system.clone()).filter(|s| !s.is_empty());

    let backend = OpenAIConfig::new(env(API_KEY_ENV).unwrap_or_default())
        .base_url(base_url)
        .model(model)
        .system(system)
        .timeout_seconds(config.api.timeout_seconds);

    Settings {
        backend,
        search: WebSearchConfig {
            endpoint: config.search.endpoint.clone(),
            timeout_seconds: config.search.timeout_seconds,
            max_results: config.search.max_results,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let args = CliArgs::parse_from(["parley"]);
        let settings = resolve_settings(&AppConfig::default(), &args, env_from(&[]));
        assert_eq!(settings.backend.model, "gpt-3.5-turbo");
        assert_eq!(settings.backend.base_url, "https://api.openai.com/v1/");
        assert_eq!(settings.backend.api_key.expose_secret(), "");
        assert_eq!(
            settings.backend.system.as_deref(),
            Some("Format the response as markdown.")
        );
        assert_eq!(settings.search, WebSearchConfig::default());
    }

    #[test]
    fn environment_overrides_file_and_flags_override_environment() {
        let mut config = AppConfig::default();
        config.api.model = "from-file".to_string();
        config.api.base_url = "http://file.local/v1".to_string();
        let env = env_from(&[
            (API_KEY_ENV, "sk-test"),
            (MODEL_ENV, "from-env"),
            (BASE_URL_ENV, "http://env.local/v1"),
        ]);

        let plain = resolve_settings(&config, &CliArgs::parse_from(["parley"]), &env);
        assert_eq!(plain.backend.model, "from-env");
        assert_eq!(plain.backend.base_url, "http://env.local/v1");
        assert_eq!(plain.backend.api_key.expose_secret(), "sk-test");

        let flagged = resolve_settings(
            &config,
            &CliArgs::parse_from(["parley", "--model", "from-flag"]),
            &env,
        );
        assert_eq!(flagged.backend.model, "from-flag");
        assert_eq!(flagged.backend.base_url, "http://env.local/v1");
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let env = env_from(&[(MODEL_ENV, ""), (BASE_URL_ENV, "  ")]);
        let args = CliArgs::parse_from(["parley"]);
        let settings = resolve_settings(&AppConfig::default(), &args, env);
        assert_eq!(settings.backend.model, "gpt-3.5-turbo");
        assert_eq!(settings.backend.base_url, "https://api.openai.com/v1/");
    }

    #[test]
    fn empty_system_prompt_disables_it() {
        let mut config = AppConfig::default();
        config.api.system = String::new();
        let settings = resolve_settings(&config, &CliArgs::parse_from(["parley"]), env_from(&[]));
        assert_eq!(settings.backend.system, None);
    }
}
