use std::str::FromStr;

/// How absence and empty collections are reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Plain `200` text for missing ids and the empty list, update echoes the payload.
    #[default]
    Legacy,
    /// `404` for missing ids, `[]` for the empty list, update returns the merged record.
    Strict,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown RESPONSE_MODE `{0}` (expected `legacy` or `strict`)")]
pub struct UnknownResponseMode(String);

impl FromStr for ResponseMode {
    type Err = UnknownResponseMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(UnknownResponseMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub response_mode: ResponseMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            response_mode: ResponseMode::Legacy,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let host = lookup("APP_HOST").unwrap_or(defaults.host);
        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid APP_PORT `{}`: {}", v, e))?,
            None => defaults.port,
        };
        let response_mode = match lookup("RESPONSE_MODE") {
            Some(v) => v.parse()?,
            None => defaults.response_mode,
        };
        Ok(Self {
            host,
            port,
            response_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_legacy_service() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.response_mode, ResponseMode::Legacy);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "8081"),
            ("RESPONSE_MODE", "Strict"),
        ]))
        .unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.response_mode, ResponseMode::Strict);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("APP_PORT", "http")])).is_err());
        let err = AppConfig::from_lookup(lookup_from(&[("RESPONSE_MODE", "loose")])).unwrap_err();
        assert!(err.to_string().contains("loose"));
    }
}
