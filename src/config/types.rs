//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::library::MediaType;
use crate::matcher::tokens::split_list;
use crate::matcher::MatchProfile;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_database_path() }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("paige.db")
}

/// Matching and snatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum score (integer percentage) the best match must reach
    /// before it is snatched.
    #[serde(default = "default_match_ratio")]
    pub match_ratio: u32,
    #[serde(default = "default_ebook")]
    pub ebook: MediaTypeConfig,
    #[serde(default = "default_audiobook")]
    pub audiobook: MediaTypeConfig,
    #[serde(default = "default_magazine")]
    pub magazine: MediaTypeConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_ratio: default_match_ratio(),
            ebook: default_ebook(),
            audiobook: default_audiobook(),
            magazine: default_magazine(),
        }
    }
}

/// Per-media-type matching knobs.
///
/// The word lists are comma- or whitespace-separated and honor shell
/// quoting, so multi-word entries like `'large print'` stay intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTypeConfig {
    /// Words that reject a candidate outright.
    #[serde(default)]
    pub reject_words: String,
    /// Lower size bound in MB; 0 disables the check.
    #[serde(default)]
    pub min_size_mb: u64,
    /// Upper size bound in MB; 0 disables the check.
    #[serde(default)]
    pub max_size_mb: u64,
    /// File-format keywords counted in a candidate's favor.
    #[serde(default)]
    pub formats: String,
}

fn default_match_ratio() -> u32 {
    90
}

fn default_ebook() -> MediaTypeConfig {
    MediaTypeConfig {
        reject_words: "audiobook, mp3".to_string(),
        formats: "epub, mobi, pdf".to_string(),
        ..MediaTypeConfig::default()
    }
}

fn default_audiobook() -> MediaTypeConfig {
    MediaTypeConfig {
        reject_words: "epub, mobi, pdf".to_string(),
        formats: "mp3".to_string(),
        ..MediaTypeConfig::default()
    }
}

fn default_magazine() -> MediaTypeConfig {
    MediaTypeConfig {
        formats: "pdf".to_string(),
        ..MediaTypeConfig::default()
    }
}

impl SearchConfig {
    /// Resolve the matching profile for one media type, with the word
    /// lists parsed and lowercased.
    pub fn profile_for(&self, media_type: MediaType) -> MatchProfile {
        let section = match media_type {
            MediaType::EBook => &self.ebook,
            MediaType::AudioBook => &self.audiobook,
            MediaType::Magazine => &self.magazine,
        };
        MatchProfile {
            match_ratio: self.match_ratio,
            reject_words: split_list(&section.reject_words.to_lowercase()),
            min_size_mb: section.min_size_mb,
            max_size_mb: section.max_size_mb,
            formats: split_list(&section.formats.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, PathBuf::from("paige.db"));
        assert_eq!(config.search.match_ratio, 90);
        assert_eq!(config.search.ebook.formats, "epub, mobi, pdf");
        assert_eq!(config.search.audiobook.formats, "mp3");
        assert_eq!(config.search.magazine.reject_words, "");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").expect("Empty config should parse");
        assert_eq!(config.search.match_ratio, 90);
        assert_eq!(config.search.ebook.reject_words, "audiobook, mp3");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml_str = r#"
            [database]
            path = "/var/lib/paige/library.db"

            [search]
            match_ratio = 80

            [search.ebook]
            reject_words = "sample, 'large print'"
            max_size_mb = 800
            formats = "epub"
        "#;
        let config: Config = toml::from_str(toml_str).expect("Config should parse");
        assert_eq!(config.database.path, PathBuf::from("/var/lib/paige/library.db"));
        assert_eq!(config.search.match_ratio, 80);
        assert_eq!(config.search.ebook.max_size_mb, 800);
        assert_eq!(config.search.ebook.formats, "epub");
        // Untouched sections keep their defaults.
        assert_eq!(config.search.audiobook.formats, "mp3");
    }

    #[test]
    fn test_profile_for_ebook_defaults() {
        let profile = SearchConfig::default().profile_for(MediaType::EBook);
        assert_eq!(profile.match_ratio, 90);
        assert_eq!(profile.reject_words, vec!["audiobook", "mp3"]);
        assert_eq!(profile.formats, vec!["epub", "mobi", "pdf"]);
        assert_eq!(profile.min_size_mb, 0);
        assert_eq!(profile.max_size_mb, 0);
    }

    #[test]
    fn test_profile_for_lowercases_and_splits_quoted_words() {
        let mut search = SearchConfig::default();
        search.ebook.reject_words = "SAMPLE, 'Large Print'".to_string();
        let profile = search.profile_for(MediaType::EBook);
        assert_eq!(profile.reject_words, vec!["sample", "large print"]);
    }

    #[test]
    fn test_profile_for_magazine_has_no_reject_words() {
        let profile = SearchConfig::default().profile_for(MediaType::Magazine);
        assert!(profile.reject_words.is_empty());
        assert_eq!(profile.formats, vec!["pdf"]);
    }
}
