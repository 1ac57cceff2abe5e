//! Split options.
//!
//! Options arrive as a JSON object with kebab-case keys, every key optional:
//!
//! ```json
//! {
//!   "prefix": "panes",
//!   "fix-width-rows": [0, 2],
//!   "height": 400,
//!   "left-width": "30%",
//!   "display-method": "table-cell",
//!   "fit": true,
//!   "css": { ".panes-top": { "background": "#eee" } },
//!   "callbacks": { "td": { "event": "click", "func": "onCell", "data": 1 } }
//! }
//! ```
//!
//! `css` and `callbacks` keep the order of their selectors.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::layout::RowBand;
use crate::types::Length;

/// Class prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "table4panes";

/// Everything that tunes one split besides the two cuts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SplitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_width_rows: Option<FixWidthRows>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_width: Option<Length>,
    pub display_method: DisplayMethod,
    pub fit: bool,
    #[serde(skip_serializing_if = "Rules::is_empty")]
    pub css: Rules<CssMap>,
    #[serde(skip_serializing_if = "Rules::is_empty")]
    pub callbacks: Rules<OneOrMany<CallbackSpec>>,
}

impl SplitOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured prefix, or [`DEFAULT_PREFIX`] when unset or empty.
    pub fn prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Width strategy; defaults to freezing rows `0..=row_cut`.
    pub fn width_strategy(&self, row_cut: usize) -> FixWidthRows {
        self.fix_width_rows
            .unwrap_or(FixWidthRows::Band(RowBand::new(0, row_cut)))
    }
}

/// How column widths are frozen before the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFixWidthRows", into = "RawFixWidthRows")]
pub enum FixWidthRows {
    /// Freeze the cells of the rows in the band
    Band(RowBand),
    /// Measure a synthetic row of single-unit cells and insert it into every
    /// derived grid
    Probe,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFixWidthRows {
    Band(RowBand),
    Keyword(ProbeKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProbeKeyword {
    #[serde(alias = "dummy")]
    Probe,
}

impl From<RawFixWidthRows> for FixWidthRows {
    fn from(raw: RawFixWidthRows) -> Self {
        match raw {
            RawFixWidthRows::Band(band) => Self::Band(band),
            RawFixWidthRows::Keyword(ProbeKeyword::Probe) => Self::Probe,
        }
    }
}

impl From<FixWidthRows> for RawFixWidthRows {
    fn from(rows: FixWidthRows) -> Self {
        match rows {
            FixWidthRows::Band(band) => Self::Band(band),
            FixWidthRows::Probe => Self::Keyword(ProbeKeyword::Probe),
        }
    }
}

/// How the left and right halves are placed side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMethod {
    InlineBlock,
    TableCell,
    Flex,
    #[default]
    Float,
}

/// A CSS property value. Numbers are pixel values except for the unitless
/// properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssValue {
    Number(f64),
    Text(String),
}

const UNITLESS: &[&str] = &[
    "opacity",
    "z-index",
    "font-weight",
    "line-height",
    "flex-grow",
    "flex-shrink",
    "order",
    "zoom",
];

impl CssValue {
    pub fn to_css(&self, property: &str) -> String {
        match self {
            Self::Number(n) if UNITLESS.contains(&property) => n.to_string(),
            Self::Number(n) => format!("{n}px"),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Properties set on every node matching one selector.
pub type CssMap = Rules<CssValue>;

/// One event binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackSpec {
    pub event: String,
    /// Name of the handler, resolved by the event binder
    pub func: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A single value or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(one) => std::slice::from_ref(one),
            Self::Many(many) => many,
        }
    }
}

/// String-keyed map that keeps its keys in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules<T>(pub Vec<(String, T)>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Append a rule; a repeated key replaces the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for Rules<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut rules = Self::default();
        for (k, v) in iter {
            rules.insert(k, v);
        }
        rules
    }
}

impl<T: Serialize> Serialize for Rules<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

struct RulesVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for RulesVisitor<T> {
    type Value = Rules<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by selector or property")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut rules = Rules::default();
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            rules.insert(key, value);
        }
        Ok(rules)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Rules<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RulesVisitor(PhantomData))
    }
}
