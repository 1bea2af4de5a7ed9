/// Distinct stage labels in the order they were first added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageSet {
    labels: Vec<String>,
}

impl StageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|existing| existing == label)
    }

    /// Adds `label` if absent. Returns whether the set changed.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.contains(label) {
            return false;
        }
        self.labels.push(label.to_owned());
        true
    }

    /// Removes `label` if present. Returns whether the set changed.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|existing| existing != label);
        self.labels.len() != before
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.labels.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_and_keeps_order() {
        let mut set = StageSet::new();
        assert!(set.insert("Awareness"));
        assert!(set.insert("Consideration"));
        assert!(!set.insert("Awareness"));
        assert_eq!(set.to_vec(), vec!["Awareness", "Consideration"]);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut set = StageSet::new();
        set.insert("Awareness");
        assert!(!set.contains("awareness"));
        assert!(set.insert("awareness"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut set = StageSet::new();
        set.insert("Awareness");
        assert!(!set.remove("Purchase"));
        assert!(set.remove("Awareness"));
        assert!(set.is_empty());
    }
}
