//! Structs describing the hero list manifest.
//! The main entrypoint is [`Options::request_manifest`][crate::Options::request_manifest],
//! or [`Item::parse_manifest`] when the document is already at hand.

use std::path::{Component, Path, PathBuf};

use crate::options::UrlTemplate;



/// One hero entry of the manifest.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  /// The opaque external key used by the asset store (`ename`).
  pub id: String,
  /// The name used for output files (`cname`).
  pub display_name: String,
  /// The names of each skin, in manifest order.
  /// The first entry is the default outfit.
  pub variant_names: Vec<String>
}

impl Item {
  /// Parses a manifest document (a JSON array of hero entries).
  pub fn parse_manifest(bytes: &[u8]) -> Result<Vec<Item>, crate::Error> {
    crate::format::parse_manifest(bytes)
  }

  /// Saturates at `u32::MAX`; [`Item::variants`] yields no more than this.
  #[inline]
  pub fn variant_count(&self) -> u32 {
    u32::try_from(self.variant_names.len()).unwrap_or(u32::MAX)
  }

  /// Iterates the variants of this item, indexed from 1.
  pub fn variants(&self) -> impl Iterator<Item = Variant<'_>> {
    self.variant_names.iter()
      .take(self.variant_count() as usize)
      .zip(1..=u32::MAX)
      .map(|(name, index)| Variant { index, name })
  }

  /// The URL of the image for the given variant index.
  #[inline]
  pub fn asset_url(&self, template: &UrlTemplate, variant: u32) -> String {
    template.render(&self.id, variant)
  }

  /// The file name a variant is saved under, `{display_name}_{variant}.jpg`.
  /// Two items sharing a display name produce the same file names.
  pub fn file_name(&self, variant: u32) -> String {
    format!("{}_{variant}.jpg", self.display_name)
  }

  /// The path a variant is saved under, always directly inside `output_dir`.
  /// Fails with [`Error::InvalidFileName`][crate::Error::InvalidFileName] if the
  /// display name would escape it.
  pub fn file_path(&self, output_dir: &Path, variant: u32) -> Result<PathBuf, crate::Error> {
    let file_name = self.file_name(variant);
    if !is_plain_file_name(&file_name) {
      return Err(crate::Error::InvalidFileName(file_name));
    };

    Ok(output_dir.join(file_name))
  }
}

fn is_plain_file_name(file_name: &str) -> bool {
  if file_name.contains(['/', '\\']) || file_name.contains("..") { return false };
  let mut components = Path::new(file_name).components();
  matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// A single numbered skin belonging to an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant<'a> {
  pub index: u32,
  pub name: &'a str
}



#[cfg(test)]
mod tests {
  use super::*;

  fn item() -> Item {
    Item {
      id: "100".to_owned(),
      display_name: "妲己".to_owned(),
      variant_names: vec!["A".to_owned(), "B".to_owned()]
    }
  }

  #[test]
  fn variants_are_one_based() {
    let item = item();
    let variants = item.variants().collect::<Vec<_>>();
    assert_eq!(variants, [Variant { index: 1, name: "A" }, Variant { index: 2, name: "B" }]);
    assert_eq!(item.variant_count(), 2);
  }

  #[test]
  fn file_names_and_urls() {
    let item = item();
    let template = UrlTemplate::default();
    assert_eq!(item.file_name(1), "妲己_1.jpg");
    assert_eq!(item.file_path(Path::new("out"), 2).unwrap(), Path::new("out").join("妲己_2.jpg"));
    assert_eq!(
      item.asset_url(&template, 2),
      "https://game.gtimg.cn/images/yxzj/img201606/skin/hero-info/100/100-bigskin-2.jpg"
    );
  }

  #[test]
  fn file_paths_stay_inside_output_dir() {
    for display_name in ["../escaped", "/etc/passwd", "a/b", "a\\b", ".."] {
      let item = Item { display_name: display_name.to_owned(), ..item() };
      let result = item.file_path(Path::new("out"), 1);
      assert!(matches!(result, Err(crate::Error::InvalidFileName(_))), "{display_name}");
    };

    let item = Item { display_name: "诸葛亮.v2".to_owned(), ..item() };
    assert_eq!(item.file_path(Path::new("out"), 1).unwrap(), Path::new("out").join("诸葛亮.v2_1.jpg"));
  }
}
