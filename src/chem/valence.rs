use crate::model::types::Element;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_VALENCE_TOML: &str = include_str!("../../resources/valence.toml");

static DEFAULT_VALENCES: OnceLock<ValenceTable> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ValenceError {
    #[error("failed to parse valence table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("valence table lists unknown element '{0}'")]
    UnknownElement(String),

    #[error("valence table entry for '{0}' has no valences")]
    EmptyValences(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChargeRule {
    #[default]
    Shift,
    Reverse,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ElementValence {
    pub valences: Vec<u8>,
    #[serde(default)]
    pub charge_rule: ChargeRule,
}

impl ElementValence {
    /// Valences allowed for an atom carrying `formal_charge`, ascending.
    pub fn allowed(&self, formal_charge: i8) -> impl Iterator<Item = i32> + '_ {
        let q = i32::from(formal_charge);
        let shift = match self.charge_rule {
            ChargeRule::Shift => q,
            ChargeRule::Reverse => -q,
            ChargeRule::Absolute => -q.abs(),
        };
        self.valences
            .iter()
            .map(move |&v| i32::from(v) + shift)
            .filter(|&v| v >= 0)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawValenceTable {
    #[serde(default)]
    elements: HashMap<String, ElementValence>,
}

#[derive(Debug, Clone, Default)]
pub struct ValenceTable {
    entries: HashMap<Element, ElementValence>,
}

impl ValenceTable {
    /// Parses a valence table from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ValenceError> {
        let raw: RawValenceTable = toml::from_str(text)?;

        let mut entries = HashMap::with_capacity(raw.elements.len());
        for (symbol, mut entry) in raw.elements {
            let element = Element::from_str(&symbol)
                .map_err(|_| ValenceError::UnknownElement(symbol.clone()))?;
            if entry.valences.is_empty() {
                return Err(ValenceError::EmptyValences(symbol));
            }
            entry.valences.sort_unstable();
            entries.insert(element, entry);
        }

        Ok(Self { entries })
    }

    /// Loads `custom` if given, otherwise returns the embedded default table.
    pub fn load(custom: Option<&str>) -> Result<Self, ValenceError> {
        match custom {
            Some(text) => Self::from_toml(text),
            None => Ok(Self::default_table().clone()),
        }
    }

    pub fn default_table() -> &'static ValenceTable {
        DEFAULT_VALENCES.get_or_init(|| {
            Self::from_toml(DEFAULT_VALENCE_TOML)
                .expect("Failed to parse embedded valence table. This is a library bug.")
        })
    }

    pub fn get(&self, element: Element) -> Option<&ElementValence> {
        self.entries.get(&element)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
