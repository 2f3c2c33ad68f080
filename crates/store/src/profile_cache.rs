use crate::error::StoreError;
use crate::repository::JsonRepository;
use core_types::CompanyProfile;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The cached company profiles, keyed by symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileCache {
    profiles: BTreeMap<String, CompanyProfile>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cache from `path`.
    ///
    /// A missing or unreadable file yields an empty cache; the daily run must still work
    /// before profiles have ever been fetched.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let repo = JsonRepository::new(path);
        match repo.load::<BTreeMap<String, CompanyProfile>>().await {
            Ok(profiles) => {
                tracing::info!(count = profiles.len(), "Loaded cached company profiles.");
                Self { profiles }
            }
            Err(StoreError::NotFound(path)) => {
                tracing::warn!(path = %path.display(), "No company profile cache found.");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Company profile cache is unreadable; starting empty.");
                Self::default()
            }
        }
    }

    pub async fn save(&self, path: impl Into<PathBuf>) -> Result<(), StoreError> {
        JsonRepository::new(path).save(&self.profiles).await
    }

    pub fn get(&self, symbol: &str) -> Option<&CompanyProfile> {
        self.profiles.get(symbol)
    }

    /// Returns the cached profile, or the placeholder when none is cached.
    pub fn get_or_placeholder(&self, symbol: &str) -> CompanyProfile {
        self.get(symbol)
            .cloned()
            .unwrap_or_else(|| CompanyProfile::placeholder(symbol))
    }

    pub fn insert(&mut self, symbol: impl Into<String>, profile: CompanyProfile) {
        self.profiles.insert(symbol.into(), profile);
    }

    pub fn is_complete(&self, symbol: &str) -> bool {
        self.get(symbol).is_some_and(CompanyProfile::is_complete)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> CompanyProfile {
        CompanyProfile {
            name: "Apple Inc.".to_string(),
            description: "Designs phones.".to_string(),
            ceo: "Tim Cook".to_string(),
            hq: "Cupertino, CA, United States".to_string(),
            employees: 164_000,
            website: "https://www.apple.com".to_string(),
            sector: "Technology".to_string(),
            industry: "Consumer Electronics".to_string(),
        }
    }

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company_profiles.json");

        let mut cache = ProfileCache::new();
        cache.insert("AAPL", apple());
        cache.save(&path).await.unwrap();

        let loaded = ProfileCache::load(&path).await;
        assert_eq!(loaded, cache);
        assert!(loaded.is_complete("AAPL"));
    }

    #[tokio::test]
    async fn missing_or_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProfileCache::load(dir.path().join("absent.json")).await.is_empty());

        let corrupt = dir.path().join("corrupt.json");
        tokio::fs::write(&corrupt, "[oops").await.unwrap();
        assert!(ProfileCache::load(&corrupt).await.is_empty());
    }

    #[test]
    fn unknown_symbol_gets_placeholder() {
        let cache = ProfileCache::new();
        let profile = cache.get_or_placeholder("MMM");
        assert_eq!(profile.name, "MMM");
        assert!(!cache.is_complete("MMM"));
    }
}
