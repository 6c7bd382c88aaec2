//! Label maps in the protobuf text format of the TensorFlow Object Detection API.
//!
//! ```text
//! item {
//!   id: 1
//!   name: 'noteheadFull'
//! }
//! ```
//!
//! Lookup is by `name`; `display_name` and other fields are accepted and ignored.

use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{Error, Result};

static ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
static FIELD_REGEX: OnceLock<Regex> = OnceLock::new();

fn item_regex() -> &'static Regex {
    ITEM_REGEX.get_or_init(|| Regex::new(r"item\s*\{(?P<body>[^}]*)\}").unwrap())
}

fn field_regex() -> &'static Regex {
    FIELD_REGEX.get_or_init(|| {
        Regex::new(r#"(?P<key>\w+)\s*:\s*(?:'(?P<single>[^']*)'|"(?P<double>[^"]*)"|(?P<int>-?\d+))"#)
            .unwrap()
    })
}

/// Immutable mapping from class name to integer id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    ids: HashMap<String, i64>,
}

impl LabelMap {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = strip_comments(text);
        let mut ids = HashMap::new();

        for item in item_regex().captures_iter(&text) {
            let mut name = None;
            let mut id = None;

            for field in field_regex().captures_iter(&item["body"]) {
                let value = field
                    .name("single")
                    .or_else(|| field.name("double"))
                    .or_else(|| field.name("int"))
                    .map(|m| m.as_str());
                match (&field["key"], value) {
                    ("name", Some(value)) => name = Some(value.to_string()),
                    ("id", Some(value)) => {
                        let value = value.parse::<i64>().map_err(|_| {
                            Error::Config(format!("label map id '{}' is not an integer", value))
                        })?;
                        id = Some(value);
                    }
                    _ => {}
                }
            }

            let name = name.ok_or_else(|| Error::Config("label map item without name".into()))?;
            let id = id.ok_or_else(|| {
                Error::Config(format!("label map item '{}' without id", name))
            })?;

            if id < 0 {
                return Err(Error::Config("Label map ids should be >= 0.".into()));
            }
            if id == 0 && name != "background" {
                return Err(Error::Config(
                    "Label map id 0 is reserved for the background label".into(),
                ));
            }

            if let Some(previous) = ids.insert(name.clone(), id) {
                warn!(
                    "label '{}' appears twice in the label map (ids {} and {}), keeping {}",
                    name, previous, id, id
                );
            }
        }

        if ids.is_empty() {
            return Err(Error::Config("label map contains no items".into()));
        }

        Ok(Self { ids })
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// '#' starts a comment unless it is quoted
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| {
            let mut quote = None;
            for (idx, ch) in line.char_indices() {
                match (ch, quote) {
                    ('\'' | '"', None) => quote = Some(ch),
                    (c, Some(q)) if c == q => quote = None,
                    ('#', None) => return &line[..idx],
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
