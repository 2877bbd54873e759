//! Song and tag model

use std::collections::BTreeMap;

/// Queue id assigned by MPD to an entry in the play queue
pub type SongId = u32;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Song {
    /// Only set for songs that are in the queue
    pub id: Option<SongId>,
    pub position: Option<usize>,
    /// Duration in whole seconds
    pub time: Option<u32>,
    tags: BTreeMap<String, String>,
    sort_tags: BTreeMap<String, String>,
}

impl Song {
    /// Build a song from raw `key: value` pairs as MPD reports them.
    pub fn from_tags<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut song = Song::default();
        for (key, value) in pairs {
            song.tags.insert(key.as_ref().to_lowercase(), value.into());
        }
        song.auto_fill();
        song.fill_sort_tags();
        song
    }

    fn auto_fill(&mut self) {
        self.id = self.tags.get("id").and_then(|v| v.parse().ok());
        self.position = self.tags.get("pos").and_then(|v| v.parse().ok());
        self.time = self
            .tags
            .get("time")
            .and_then(|v| v.parse().ok())
            .or_else(|| {
                self.tags
                    .get("duration")
                    .and_then(|v| v.parse::<f64>().ok())
                    .map(|d| d.round() as u32)
            });

        self.tags.insert("time".to_string(), format_time(self.time));

        let year: Option<String> = self
            .tags
            .get("date")
            .filter(|d| d.chars().count() >= 4)
            .map(|d| d.chars().take(4).collect());
        if let Some(year) = year {
            self.tags.insert("year".to_string(), year);
        }
    }

    fn fill_sort_tags(&mut self) {
        for (key, value) in &self.tags {
            self.sort_tags.insert(key.clone(), value.to_lowercase());
        }

        if let Some(track) = self.sort_tags.get("track").map(|t| track_sort(t)) {
            self.sort_tags.insert("track".to_string(), track);
        }

        for (tag, fallback) in [
            ("artistsort", "artist"),
            ("albumartist", "artist"),
            ("albumartistsort", "albumartist"),
        ] {
            if !self.sort_tags.contains_key(tag) {
                let value = self.sort_tags.get(fallback).cloned().unwrap_or_default();
                self.sort_tags.insert(tag.to_string(), value);
            }
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn sort_tag(&self, name: &str) -> &str {
        self.sort_tags.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_one_of_tags(&self, names: &[String]) -> bool {
        names.iter().any(|n| self.tags.contains_key(n.as_str()))
    }

    /// Location of the song on the server
    pub fn file(&self) -> Option<&str> {
        self.tag("file")
    }

    /// Case-insensitive substring match against every tag value
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.sort_tags.values().any(|v| v.contains(needle_lower))
    }
}

/// Zero-pad the track number so that lexical order is numeric order.
fn track_sort(track: &str) -> String {
    let number = track.split('/').next().unwrap_or(track);
    match number.trim().parse::<u32>() {
        Ok(n) => format!("{n:03}"),
        Err(_) => track.to_string(),
    }
}

pub fn format_time(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "--:--".to_string(),
    }
}
