//! In-memory tree model and its JSON layout
//!
//! On disk a node is a flat JSON object:
//!
//! ```json
//! {
//!   "absolute_path": "/data/devices",
//!   "files": [["readme.md", 120]],
//!   "directories": [["cam01", 4096]],
//!   "cam01": { "absolute_path": "/data/devices/cam01", ... }
//! }
//! ```
//!
//! Each subdirectory's node sits next to the metadata keys, keyed by the
//! directory name. In memory the children live in their own map so a
//! directory called `files` cannot clobber the file list. Such names are
//! written under [`RESERVED_CHILDREN_KEY`] instead.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::utils::{join_path, parse_size};

pub const ABSOLUTE_PATH_KEY: &str = "absolute_path";
pub const FILES_KEY: &str = "files";
pub const DIRECTORIES_KEY: &str = "directories";
/// Escape object for children whose names collide with a metadata key.
pub const RESERVED_CHILDREN_KEY: &str = "__reserved_children__";

const RESERVED_KEYS: [&str; 4] = [
    ABSOLUTE_PATH_KEY,
    FILES_KEY,
    DIRECTORIES_KEY,
    RESERVED_CHILDREN_KEY,
];

/// Whether a child with this name has to go into the escape object.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Size recorded for a file or directory entry.
///
/// Trees written by this crate always hold byte counts. Older trees may
/// carry preformatted labels such as `"500KB"`, `null`, or numbers that
/// are not byte counts (`1.5`, `-1`), which are kept as labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntrySize {
    Bytes(u64),
    Label(String),
    Unknown,
}

impl EntrySize {
    /// Size in bytes, parsing labels when needed.
    pub fn bytes(&self) -> Option<u64> {
        match self {
            EntrySize::Bytes(n) => Some(*n),
            EntrySize::Label(label) => parse_size(label).ok(),
            EntrySize::Unknown => None,
        }
    }
}

impl fmt::Display for EntrySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySize::Bytes(n) => write!(f, "{}", n),
            EntrySize::Label(label) => f.write_str(label),
            EntrySize::Unknown => f.write_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for EntrySize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntrySizeVisitor)
    }
}

struct EntrySizeVisitor;

impl<'de> Visitor<'de> for EntrySizeVisitor {
    type Value = EntrySize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte count, a size label or null")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntrySize, E> {
        Ok(EntrySize::Bytes(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntrySize, E> {
        Ok(match u64::try_from(v) {
            Ok(bytes) => EntrySize::Bytes(bytes),
            Err(_) => EntrySize::Label(v.to_string()),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<EntrySize, E> {
        Ok(EntrySize::Label(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntrySize, E> {
        Ok(EntrySize::Label(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<EntrySize, E> {
        Ok(EntrySize::Label(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<EntrySize, E> {
        Ok(EntrySize::Unknown)
    }

    fn visit_none<E: de::Error>(self) -> Result<EntrySize, E> {
        Ok(EntrySize::Unknown)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<EntrySize, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl From<u64> for EntrySize {
    fn from(bytes: u64) -> Self {
        EntrySize::Bytes(bytes)
    }
}

/// A `(name, size)` pair, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, EntrySize)", into = "(String, EntrySize)")]
pub struct Entry {
    pub name: String,
    pub size: EntrySize,
}

impl Entry {
    pub fn new(name: impl Into<String>, size: impl Into<EntrySize>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
        }
    }
}

impl From<(String, EntrySize)> for Entry {
    fn from((name, size): (String, EntrySize)) -> Self {
        Self { name, size }
    }
}

impl From<Entry> for (String, EntrySize) {
    fn from(entry: Entry) -> Self {
        (entry.name, entry.size)
    }
}

/// One directory: its path, immediate files, immediate subdirectories and
/// an owned node per subdirectory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub absolute_path: String,
    pub files: Vec<Entry>,
    pub directories: Vec<Entry>,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn new(absolute_path: impl Into<String>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, size: impl Into<EntrySize>) {
        self.files.push(Entry::new(name, size));
    }

    /// List a subdirectory. `node` is `None` when its contents could not be
    /// indexed, which leaves the entry without a nested node.
    pub fn add_directory(&mut self, entry: Entry, node: Option<TreeNode>) {
        if let Some(node) = node {
            self.children.insert(entry.name.clone(), node);
        }
        self.directories.push(entry);
    }

    /// Attach a child node without listing it in `directories`.
    pub fn insert_child(&mut self, name: impl Into<String>, node: TreeNode) {
        self.children.insert(name.into(), node);
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Listed subdirectories in listing order, paired with their nodes.
    pub fn subdirectories(&self) -> impl Iterator<Item = (&Entry, Option<&TreeNode>)> {
        self.directories
            .iter()
            .map(|entry| (entry, self.children.get(&entry.name)))
    }

    /// Absolute path of an entry inside this directory.
    pub fn entry_path(&self, name: &str) -> String {
        join_path(&self.absolute_path, name)
    }

    /// True for a node that carries nothing at all (`{}` in JSON).
    pub fn is_empty(&self) -> bool {
        self.absolute_path.is_empty()
            && self.files.is_empty()
            && self.directories.is_empty()
            && self.children.is_empty()
    }

    /// Children in listing order first, then any unlisted ones by name.
    fn ordered_children(&self) -> Vec<(&str, &TreeNode)> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(self.children.len());
        for entry in &self.directories {
            if let Some(node) = self.children.get(&entry.name) {
                if seen.insert(entry.name.as_str()) {
                    ordered.push((entry.name.as_str(), node));
                }
            }
        }
        for (name, node) in &self.children {
            if seen.insert(name.as_str()) {
                ordered.push((name.as_str(), node));
            }
        }
        ordered
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(ABSOLUTE_PATH_KEY, &self.absolute_path)?;
        map.serialize_entry(FILES_KEY, &self.files)?;
        map.serialize_entry(DIRECTORIES_KEY, &self.directories)?;

        let mut reserved: Vec<(&str, &TreeNode)> = Vec::new();
        for (name, node) in self.ordered_children() {
            if is_reserved_name(name) {
                reserved.push((name, node));
            } else {
                map.serialize_entry(name, node)?;
            }
        }
        if !reserved.is_empty() {
            map.serialize_entry(RESERVED_CHILDREN_KEY, &ReservedChildren(&reserved))?;
        }
        map.end()
    }
}

struct ReservedChildren<'a>(&'a [(&'a str, &'a TreeNode)]);

impl Serialize for ReservedChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

/// Value of a non-metadata key. Objects are always nested nodes, so a
/// broken node is an error rather than a dropped child; any other value is
/// something older writers left behind and is ignored.
enum ChildValue {
    Node(TreeNode),
    Other,
}

impl<'de> Deserialize<'de> for ChildValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ChildValueVisitor)
    }
}

struct ChildValueVisitor;

impl<'de> Visitor<'de> for ChildValueVisitor {
    type Value = ChildValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a directory node object or a scalar")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ChildValue, A::Error> {
        TreeNodeVisitor.visit_map(map).map(ChildValue::Node)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ChildValue, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ChildValue::Other)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_unit<E: de::Error>(self) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_none<E: de::Error>(self) -> Result<ChildValue, E> {
        Ok(ChildValue::Other)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ChildValue, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeNodeVisitor)
    }
}

struct TreeNodeVisitor;

impl<'de> Visitor<'de> for TreeNodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a directory node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TreeNode, A::Error> {
        let mut node = TreeNode::default();
        let mut seen_path = false;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                ABSOLUTE_PATH_KEY => {
                    if seen_path {
                        return Err(de::Error::duplicate_field(ABSOLUTE_PATH_KEY));
                    }
                    seen_path = true;
                    node.absolute_path = map.next_value::<Option<String>>()?.unwrap_or_default();
                }
                FILES_KEY => {
                    node.files = map.next_value::<Option<Vec<Entry>>>()?.unwrap_or_default();
                }
                DIRECTORIES_KEY => {
                    node.directories = map.next_value::<Option<Vec<Entry>>>()?.unwrap_or_default();
                }
                RESERVED_CHILDREN_KEY => {
                    let reserved: BTreeMap<String, TreeNode> = map.next_value()?;
                    node.children.extend(reserved);
                }
                _ => {
                    if let ChildValue::Node(child) = map.next_value::<ChildValue>()? {
                        node.children.insert(key, child);
                    }
                }
            }
        }

        Ok(node)
    }
}
