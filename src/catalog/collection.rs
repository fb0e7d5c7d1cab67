use std::collections::{BTreeMap, HashMap};

/// A record addressable by a caller-assigned integer id.
pub trait Record {
    fn id(&self) -> i64;
}

/// Id-indexed records that iterate in insertion order.
///
/// Lookups go through a hash index; the ordered map is keyed by an insertion
/// sequence number so removal never has to rebuild or shift the listing.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    entries: BTreeMap<u64, T>,
    index: HashMap<i64, u64>,
    next_seq: u64,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.index.get(&id).and_then(|seq| self.entries.get(seq))
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        let seq = self.index.get(&id)?;
        self.entries.get_mut(seq)
    }

    /// Append a record. Hands the record back if its id is already taken.
    pub fn insert(&mut self, record: T) -> Result<&T, T> {
        let id = record.id();
        if self.index.contains_key(&id) {
            return Err(record);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(id, seq);
        Ok(self.entries.entry(seq).or_insert(record))
    }

    pub fn remove(&mut self, id: i64) -> Option<T> {
        let seq = self.index.remove(&id)?;
        self.entries.remove(&seq)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> FromIterator<T> for Collection<T> {
    /// Later records with an id already seen are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            let _ = collection.insert(record);
        }
        collection
    }
}

/// Append-only records where ids may repeat. Lookup by id finds the first record appended.
#[derive(Debug, Clone)]
pub struct Ledger<T> {
    entries: Vec<T>,
    first: HashMap<i64, usize>,
}

impl<T: Record> Ledger<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            first: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.first.get(&id).map(|&pos| &self.entries[pos])
    }

    pub fn push(&mut self, record: T) -> &T {
        let pos = self.entries.len();
        self.first.entry(record.id()).or_insert(pos);
        self.entries.push(record);
        &self.entries[pos]
    }

    /// Records in append order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Record> Default for Ledger<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        id: i64,
        label: &'static str,
    }

    impl Record for Tag {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn tag(id: i64, label: &'static str) -> Tag {
        Tag { id, label }
    }

    #[test]
    fn iterates_in_insertion_order_not_id_order() {
        let collection: Collection<Tag> =
            [tag(5, "five"), tag(1, "one"), tag(3, "three")].into_iter().collect();

        let ids: Vec<i64> = collection.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    #[test]
    fn duplicate_insert_returns_record_and_keeps_original() {
        let mut collection = Collection::new();
        collection.insert(tag(1, "first")).unwrap();

        let rejected = collection.insert(tag(1, "second")).unwrap_err();
        assert_eq!(rejected.label, "second");
        assert_eq!(collection.get(1).unwrap().label, "first");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_then_reinsert_appends_at_the_end() {
        let mut collection: Collection<Tag> =
            [tag(1, "a"), tag(2, "b"), tag(3, "c")].into_iter().collect();

        assert_eq!(collection.remove(1), Some(tag(1, "a")));
        assert!(collection.remove(1).is_none());
        assert!(!collection.contains(1));

        collection.insert(tag(1, "a again")).unwrap();
        let ids: Vec<i64> = collection.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut collection: Collection<Tag> = [tag(7, "old")].into_iter().collect();
        collection.get_mut(7).unwrap().label = "new";
        assert_eq!(collection.get(7).unwrap().label, "new");
        assert!(collection.get_mut(8).is_none());
    }

    #[test]
    fn ledger_keeps_repeated_ids_and_finds_the_first() {
        let mut ledger = Ledger::new();
        ledger.push(tag(4, "first"));
        ledger.push(tag(2, "other"));
        assert_eq!(ledger.push(tag(4, "second")).label, "second");

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(4).unwrap().label, "first");
        assert!(ledger.get(9).is_none());
        let labels: Vec<&str> = ledger.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["first", "other", "second"]);
    }
}
