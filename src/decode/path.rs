use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Depth-indexed chain of array positions addressing a node of the output tree.
///
/// Entries stay sorted by depth, so the last entry is the deepest recorded
/// marker of the current chain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Path {
    entries: SmallVec<[(usize, u64); 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|&(_, index)| index)
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.entries.last().map(|&(depth, _)| depth)
    }

    /// Records an index marker seen at `depth`.
    ///
    /// A marker deeper than the chain extends it; a marker at or above the
    /// deepest entry drops every entry at `depth` or below before recording.
    ///
    /// Shallower entries survive a shallower marker. The reference converter
    /// instead reset the whole chain to the new marker, so `[0]` at depth 1,
    /// `[0]` at depth 3, `[1]` at depth 2 addresses `0/1` here but `1` there.
    pub fn enter(&mut self, depth: usize, index: u64) {
        let keep = self
            .entries
            .iter()
            .position(|&(recorded, _)| recorded >= depth)
            .unwrap_or(self.entries.len());
        self.entries.truncate(keep);
        self.entries.push((depth, index));
    }

    /// Walks from `root` along the chain, creating missing nodes.
    pub fn node<'a>(&self, root: &'a mut Map<String, Value>) -> &'a mut Map<String, Value> {
        let mut node = root;
        let mut buffer = itoa::Buffer::new();
        for index in self.indices() {
            let slot = node
                .entry(buffer.format(index))
                .or_insert_with(|| Value::Object(Map::new()));
            node = ensure_object(slot);
        }
        node
    }
}

fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        log::debug!("replacing non-object value {slot} on the index path");
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn chain(path: &Path) -> Vec<u64> {
        path.indices().collect()
    }

    #[test]
    fn deeper_markers_extend_the_chain() {
        let mut path = Path::new();
        path.enter(1, 0);
        path.enter(2, 3);
        assert_eq!(chain(&path), vec![0, 3]);
        assert_eq!(path.max_depth(), Some(2));
    }

    #[test]
    fn same_depth_replaces_last_index() {
        let mut path = Path::new();
        path.enter(1, 0);
        path.enter(1, 1);
        assert_eq!(chain(&path), vec![1]);
    }

    #[test]
    fn shallower_marker_discards_deeper_entries() {
        let mut path = Path::new();
        path.enter(1, 0);
        path.enter(2, 4);
        path.enter(3, 5);
        path.enter(2, 6);
        assert_eq!(chain(&path), vec![0, 6]);
        path.enter(1, 2);
        assert_eq!(chain(&path), vec![2]);
        assert_eq!(path.max_depth(), Some(1));
        path.enter(2, 0);
        assert_eq!(chain(&path), vec![2, 0]);
    }

    #[test]
    fn node_creates_intermediate_objects() {
        let mut path = Path::new();
        path.enter(0, 1);
        path.enter(1, 2);
        let mut root = Map::new();
        path.node(&mut root).insert("_A".to_string(), json!(5));
        assert_eq!(Value::Object(root), json!({"1": {"2": {"_A": 5}}}));
    }
}
