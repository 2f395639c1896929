use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use crate::{error::TunerError, model::channel::Channel};

/// Channels imported by the user and the playlist url they saved.
/// The whole file is rewritten on every change, concurrent writers overwrite each other.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Store {
    #[serde(default)]
    pub custom_m3u_url: Option<String>,
    #[serde(default)]
    pub custom_sources: Vec<Channel>,
}

impl Store {
    /// A missing file is an empty store.
    pub fn try_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TunerError::Store(format!("`{}` is corrupted: {}", path.to_string_lossy(), e)).into()
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        Ok(())
    }

    pub fn append(&mut self, channels: Vec<Channel>) {
        self.custom_sources.extend(channels);
    }

    /// Removes the channel at `index`, counting from 1.
    pub fn remove(&mut self, index: usize) -> Result<Channel> {
        if index == 0 || index > self.custom_sources.len() {
            return Err(TunerError::Syntax(format!(
                "no channel at position {} (there are {})",
                index,
                self.custom_sources.len()
            ))
            .into());
        }

        Ok(self.custom_sources.remove(index - 1))
    }

    pub fn clear_sources(&mut self) {
        self.custom_sources.clear();
    }

    pub fn set_url(&mut self, url: String) {
        self.custom_m3u_url = Some(url);
    }

    pub fn clear_url(&mut self) {
        self.custom_m3u_url = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::distr::{Alphanumeric, SampleString};
    use std::path::PathBuf;

    fn tmp_path() -> PathBuf {
        let prefix = Alphanumeric.sample_string(&mut rand::rng(), 8);
        PathBuf::from("/tmp")
            .join(format!("{}-tuner", prefix))
            .join("channels.json")
    }

    fn channels(n: u32) -> Vec<Channel> {
        (0..n)
            .map(|i| {
                Channel::new_direct(10000 + i, format!("c{}", i), format!("http://x/{}", i), "News")
            })
            .collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let store = Store::try_from_file(tmp_path()).unwrap();
        assert!(store.custom_sources.is_empty());
        assert!(store.custom_m3u_url.is_none());
    }

    #[test]
    fn save_and_reload() {
        let path = tmp_path();
        let mut store = Store::default();
        store.append(channels(3));
        store.set_url("http://x/list.m3u".into());
        store.save(&path).unwrap();

        let mut store = Store::try_from_file(&path).unwrap();
        assert_eq!(store.custom_sources, channels(3));
        assert_eq!(store.custom_m3u_url.as_deref(), Some("http://x/list.m3u"));

        // ids are not renumbered across imports
        store.append(channels(2));
        assert_eq!(store.custom_sources.len(), 5);
        assert_eq!(store.custom_sources[3].id, 10000);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn remove_by_position() {
        let mut store = Store::default();
        store.append(channels(3));
        assert!(store.remove(0).is_err());
        assert!(store.remove(4).is_err());
        let removed = store.remove(2).unwrap();
        assert_eq!(removed.title, "c1");
        let titles: Vec<_> = store.custom_sources.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["c0", "c2"]);
        store.clear_sources();
        assert!(store.custom_sources.is_empty());
    }

    #[test]
    fn corrupted_file() {
        let path = tmp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(Store::try_from_file(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn partial_file() {
        let path = tmp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"custom_m3u_url": "http://x"}"#).unwrap();
        let mut store = Store::try_from_file(&path).unwrap();
        assert!(store.custom_sources.is_empty());
        store.clear_url();
        assert!(store.custom_m3u_url.is_none());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
