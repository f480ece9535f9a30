use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LANDING_ROOT_ENV: &str = "DATALAKE_PATH";
pub const STORE_PATH_ENV: &str = "DATABASE_URL";

fn default_landing_root() -> PathBuf {
    PathBuf::from("datalake/raw")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/bronze")
}

/// Where raw documents are landed and where the bronze tables live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakeConfig {
    /// Root of the landing zone. Defaults to `datalake/raw`.
    #[serde(default = "default_landing_root")]
    pub landing_root: PathBuf,

    /// Directory holding the bronze table files. Defaults to `data/bronze`.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for LakeConfig {
    fn default() -> Self {
        Self {
            landing_root: default_landing_root(),
            store_path: default_store_path(),
        }
    }
}

impl LakeConfig {
    pub fn new(landing_root: impl Into<PathBuf>, store_path: impl Into<PathBuf>) -> Self {
        Self {
            landing_root: landing_root.into(),
            store_path: store_path.into(),
        }
    }

    /// Both locations under one base directory: `<base>/raw` and `<base>/bronze`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self::new(base.join("raw"), base.join("bronze"))
    }

    /// Defaults, overridden by `DATALAKE_PATH` and `DATABASE_URL` when set.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(root) = get(LANDING_ROOT_ENV).filter(|v| !v.trim().is_empty()) {
            config.landing_root = PathBuf::from(root);
        }
        if let Some(store) = get(STORE_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            config.store_path = PathBuf::from(store);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LakeConfig::default();
        assert_eq!(config.landing_root, PathBuf::from("datalake/raw"));
        assert_eq!(config.store_path, PathBuf::from("data/bronze"));

        let parsed: LakeConfig = serde_json::from_str(r#"{"store_path": "/tmp/bronze"}"#).unwrap();
        assert_eq!(parsed.landing_root, PathBuf::from("datalake/raw"));
        assert_eq!(parsed.store_path, PathBuf::from("/tmp/bronze"));
    }

    #[test]
    fn test_under_base_directory() {
        let config = LakeConfig::under("datalake");
        assert_eq!(config.landing_root, PathBuf::from("datalake/raw"));
        assert_eq!(config.store_path, PathBuf::from("datalake/bronze"));
        assert_eq!(LakeConfig::under(Path::new("/srv/lake")).store_path, PathBuf::from("/srv/lake/bronze"));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(LANDING_ROOT_ENV, "/srv/lake/raw"), (STORE_PATH_ENV, "")]);
        let config = LakeConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.landing_root, PathBuf::from("/srv/lake/raw"));
        assert_eq!(config.store_path, PathBuf::from("data/bronze"));
    }
}
