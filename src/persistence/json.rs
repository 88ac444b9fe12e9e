//! JSON helpers for files kept under `~/.ember-exchange/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.ember-exchange/ directory path, creating it if needed.
pub fn ember_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".ember-exchange");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load `dir/filename`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(
    dir: &Path,
    filename: &str,
) -> T {
    match fs::read_to_string(dir.join(filename)) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to `dir/filename`.
pub fn save_json<T: serde::Serialize>(dir: &Path, filename: &str, data: &T) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ember-json-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default(&temp_dir("missing"), "nonexistent.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = temp_dir("roundtrip");
        let data = vec!["hello".to_string(), "world".to_string()];
        let path = save_json(&dir, "persistence_test.json", &data).expect("save should succeed");
        assert!(path.ends_with("persistence_test.json"));

        let loaded: Vec<String> = load_json_or_default(&dir, "persistence_test.json");
        assert_eq!(loaded, data);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_json_returns_default() {
        let dir = temp_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bad.json"), "{not json").unwrap();

        let loaded: Vec<u32> = load_json_or_default(&dir, "bad.json");
        assert!(loaded.is_empty());

        fs::remove_dir_all(dir).ok();
    }
}
