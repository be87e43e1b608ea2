use crate::error::Error;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key under which the base URL is stored.
pub const BASE_KEY: &str = "_base";

/// The samples document: `_base` first, then one group per directory name in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleMap {
    base: String,
    groups: IndexMap<String, Vec<String>>,
}

impl SampleMap {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            groups: IndexMap::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(key, files)| (key.as_str(), files.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of groups, not counting `_base`.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Append `files` to the group `key`, creating it at the end if new.
    /// An empty batch leaves the map untouched.
    pub fn append(
        &mut self,
        key: &str,
        files: impl IntoIterator<Item = String>,
    ) -> Result<(), Error> {
        let mut files = files.into_iter().peekable();
        if files.peek().is_none() {
            return Ok(());
        }
        if key == BASE_KEY {
            return Err(Error::ReservedGroupName(key.to_string()));
        }
        self.groups.entry(key.to_string()).or_default().extend(files);
        Ok(())
    }
}

impl Serialize for SampleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        map.serialize_entry(BASE_KEY, &self.base)?;
        for (key, files) in &self.groups {
            map.serialize_entry(key, files)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_append_merges_by_key_in_first_seen_order() {
        let mut map = SampleMap::new("");
        map.append("kick", entries(&["/a/kick/1.wav"])).unwrap();
        map.append("snare", entries(&["/snare/1.wav"])).unwrap();
        map.append("kick", entries(&["/b/kick/1.wav"])).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["kick", "snare"]);
        assert_eq!(
            map.get("kick").unwrap(),
            &entries(&["/a/kick/1.wav", "/b/kick/1.wav"])[..]
        );
        assert_eq!(map.file_count(), 3);
    }

    #[test]
    fn test_empty_append_creates_nothing() {
        let mut map = SampleMap::new("");
        map.append("empty", Vec::new()).unwrap();
        assert!(map.is_empty());
        assert!(map.get("empty").is_none());
    }

    #[test]
    fn test_base_key_is_reserved() {
        let mut map = SampleMap::new("https://cdn.example");
        let err = map
            .append(BASE_KEY, entries(&["/_base/1.wav"]))
            .unwrap_err();
        assert!(matches!(err, Error::ReservedGroupName(_)));
        assert_eq!(map.base(), "https://cdn.example");
    }

    #[test]
    fn test_serializes_base_first() {
        let mut map = SampleMap::new("x");
        map.append("zz", entries(&["/zz/1.wav"])).unwrap();
        map.append("aa", entries(&["/aa/1.wav"])).unwrap();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"_base":"x","zz":["/zz/1.wav"],"aa":["/aa/1.wav"]}"#
        );
    }
}
