use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::data::model::Signal;

// ---------------------------------------------------------------------------
// NormalizationResult – normalized signal per input, in request order
// ---------------------------------------------------------------------------

/// Normalized signal per input file, kept in the order the inputs were
/// requested.  Failed files have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationResult {
    entries: Vec<(PathBuf, Signal)>,
}

impl NormalizationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry at the end, or replace the signal of an existing path in
    /// place.  Returns the replaced signal.
    pub fn insert(&mut self, path: PathBuf, signal: Signal) -> Option<Signal> {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => Some(std::mem::replace(existing, signal)),
            None => {
                self.entries.push((path, signal));
                None
            }
        }
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Signal> {
        let path = path.as_ref();
        self.entries
            .iter()
            .find(|(p, _)| p.as_path() == path)
            .map(|(_, signal)| signal)
    }

    pub fn contains_key(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        self.entries.iter().map(|(path, _)| path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Signal)> + '_ {
        self.into_iter()
    }
}

impl<P: AsRef<Path>> Index<P> for NormalizationResult {
    type Output = Signal;

    fn index(&self, path: P) -> &Signal {
        let path = path.as_ref();
        match self.get(path) {
            Some(signal) => signal,
            None => panic!("no result for {}", path.display()),
        }
    }
}

impl<'a> IntoIterator for &'a NormalizationResult {
    type Item = (&'a PathBuf, &'a Signal);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (PathBuf, Signal)>,
        fn(&'a (PathBuf, Signal)) -> (&'a PathBuf, &'a Signal),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(split_entry as fn(&'a (PathBuf, Signal)) -> (&'a PathBuf, &'a Signal))
    }
}

fn split_entry(entry: &(PathBuf, Signal)) -> (&PathBuf, &Signal) {
    (&entry.0, &entry.1)
}

impl FromIterator<(PathBuf, Signal)> for NormalizationResult {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Signal)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (path, signal) in iter {
            result.insert(path, signal);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(v: f64) -> Signal {
        Signal::new(vec![0.0], vec![v])
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut result = NormalizationResult::new();
        result.insert(PathBuf::from("z.csv"), signal(1.0));
        result.insert(PathBuf::from("a.csv"), signal(2.0));
        result.insert(PathBuf::from("m.csv"), signal(3.0));

        let keys: Vec<_> = result.keys().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(keys, vec!["z.csv", "a.csv", "m.csv"]);
    }

    #[test]
    fn reinserting_a_path_replaces_in_place() {
        let mut result = NormalizationResult::new();
        result.insert(PathBuf::from("a.csv"), signal(1.0));
        result.insert(PathBuf::from("b.csv"), signal(2.0));
        let old = result.insert(PathBuf::from("a.csv"), signal(9.0));

        assert_eq!(old, Some(signal(1.0)));
        assert_eq!(result.len(), 2);
        assert_eq!(result["a.csv"].y, vec![9.0]);
        assert_eq!(result.keys().next(), Some(&PathBuf::from("a.csv")));
    }

    #[test]
    fn lookup_by_any_path_form() {
        let result: NormalizationResult = [(PathBuf::from("a.csv"), signal(1.0))].into_iter().collect();
        let owned = PathBuf::from("a.csv");
        assert!(result.contains_key(&owned));
        assert!(result.contains_key(Path::new("a.csv")));
        assert!(result.get("b.csv").is_none());
    }
}
