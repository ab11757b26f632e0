use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::random::RandomSource;

pub const FIXED_ITEMS: [&str; 3] = ["a", "b", "c"];
pub const FIXED_NUMBER: i64 = 123_456;
pub const RANDOM_MIN: u32 = 0;
pub const RANDOM_MAX: u32 = 9_999;

pub const FLAG_KEY: &str = "boolean";
pub const RANDOM_KEY: &str = "random";
pub const DEFAULT_ITEMS_KEY: &str = "items";
pub const DEFAULT_INTEGER_KEY: &str = "integer";

/// Key spellings that vary between record variants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordKeys {
    pub items: String,
    pub integer: String,
}

impl RecordKeys {
    /// Every key in the serialized record must be distinct.
    pub fn validate(&self) -> anyhow::Result<()> {
        for key in [&self.items, &self.integer] {
            if key == FLAG_KEY || key == RANDOM_KEY {
                anyhow::bail!("record key `{key}` clashes with a fixed record key");
            }
        }
        if self.items == self.integer {
            anyhow::bail!(
                "items key and integer key are both `{}`; record keys must be distinct",
                self.items
            );
        }
        Ok(())
    }
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self {
            items: DEFAULT_ITEMS_KEY.to_string(),
            integer: DEFAULT_INTEGER_KEY.to_string(),
        }
    }
}

/// The fixed-shape value printed once per run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    keys: RecordKeys,
    items: Vec<String>,
    flag: bool,
    number: i64,
    random: u32,
}

impl Record {
    /// Builds a record; `captured` becomes the fourth item when present.
    pub fn build<R>(keys: RecordKeys, captured: Option<String>, random: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        let mut items: Vec<String> = FIXED_ITEMS.iter().map(|item| item.to_string()).collect();
        items.extend(captured);
        Self {
            keys,
            items,
            flag: true,
            number: FIXED_NUMBER,
            random: random.draw_inclusive(RANDOM_MIN, RANDOM_MAX),
        }
    }

    pub fn keys(&self) -> &RecordKeys {
        &self.keys
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn captured(&self) -> Option<&str> {
        self.items.get(FIXED_ITEMS.len()).map(String::as_str)
    }

    pub fn flag(&self) -> bool {
        self.flag
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn random(&self) -> u32 {
        self.random
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.keys.items, &self.items)?;
        map.serialize_entry(FLAG_KEY, &self.flag)?;
        map.serialize_entry(&self.keys.integer, &self.number)?;
        map.serialize_entry(RANDOM_KEY, &self.random)?;
        map.end()
    }
}
