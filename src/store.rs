use std::fs;
use std::io;
use std::path::PathBuf;

pub const HIGH_SCORE_FILE: &str = "tetris_high_score.txt";

/// Persists the high score as a decimal string, surviving restarts.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// Missing or unparsable files count as no recorded score.
    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}

impl Default for HighScoreStore {
    fn default() -> Self {
        HighScoreStore::new(HIGH_SCORE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> HighScoreStore {
        let path = std::env::temp_dir().join(format!("gridfall_{}_{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        HighScoreStore::new(path)
    }

    #[test]
    fn load_defaults_to_zero_when_absent() {
        let store = temp_store("absent");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn load_defaults_to_zero_when_malformed() {
        let store = temp_store("malformed");
        fs::write(&store.path, "not a number").unwrap();
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        store.save(500).unwrap();
        assert_eq!(store.load(), 500);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = temp_store("overwrite");
        store.save(300).unwrap();
        store.save(500).unwrap();
        assert_eq!(store.load(), 500);
    }
}
