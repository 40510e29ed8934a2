use once_cell::sync::Lazy;
use regex::{Regex, Captures};
use serde::de::{Deserialize, Deserializer};

use crate::manifest::Item;

use std::borrow::Cow;



pub(crate) const SKIN_NAME_SEPARATOR: char = '|';

/// Parses the raw hero list document into items, keeping manifest order.
pub(crate) fn parse_manifest(bytes: &[u8]) -> Result<Vec<Item>, crate::Error> {
  let entries: Vec<ManifestEntry> = serde_json::from_slice(bytes)?;
  Ok(entries.into_iter().map(ManifestEntry::into_item).collect())
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ManifestEntry {
  #[serde(rename = "ename")]
  #[serde(deserialize_with = "deserialize_string_or_number")]
  id: String,
  #[serde(rename = "cname")]
  display_name: String,
  #[serde(rename = "skin_name")]
  skin_names: String
  // omitted fields: title, new_type, hero_type, hero_type2, id_name
}

impl ManifestEntry {
  pub(crate) fn into_item(self) -> Item {
    let variant_names = self.skin_names
      .split(SKIN_NAME_SEPARATOR)
      .map(str::to_owned)
      .collect();
    Item {
      id: self.id,
      display_name: self.display_name,
      variant_names
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
  String(String),
  Number(serde_json::Number)
}

fn deserialize_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(match StringOrNumber::deserialize(deserializer)? {
    StringOrNumber::String(value) => value,
    StringOrNumber::Number(value) => value.to_string()
  })
}



pub(crate) const KEY_ID: &str = "id";
pub(crate) const KEY_VARIANT: &str = "variant";

static RX_TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Returns the first placeholder key in `template` that is not `{id}` or `{variant}`.
pub(crate) fn find_unknown_key(template: &str) -> Option<&str> {
  RX_TEMPLATE.captures_iter(template)
    .filter_map(|captures| captures.get(1))
    .map(|key| key.as_str())
    .find(|&key| key != KEY_ID && key != KEY_VARIANT)
}

pub(crate) fn apply_template<'a>(template: &'a str, id: &str, variant: u32) -> Cow<'a, str> {
  RX_TEMPLATE.replace_all(template, |captures: &Captures| -> String {
    match captures.get(1).map_or("", |key| key.as_str()) {
      KEY_ID => id.to_owned(),
      KEY_VARIANT => variant.to_string(),
      // rejected by `UrlTemplate::new`
      other => format!("{{{other}}}")
    }
  })
}
