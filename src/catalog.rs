//! Font catalog: a descriptor for every family the tool can preview.
//!
//! The catalog starts from a bundled seed and grows at runtime through
//! upload ingestion. Ids are unique across the catalog and appends are
//! atomic: a batch containing any duplicate id is rejected whole.

use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Font style of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontStyle::Normal => write!(f, "normal"),
            FontStyle::Italic => write!(f, "italic"),
        }
    }
}

/// Broad visual classification of a family. Used for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontCategory {
    Serif,
    SansSerif,
    Display,
    Handwriting,
    Monospace,
}

/// Where a descriptor came from. Display metadata only; resolution and
/// loading never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSource {
    Google,
    Uploaded,
    Bundled,
}

/// One (weight, style) combination a family declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub weight: u16,
    pub style: FontStyle,
}

impl VariantSpec {
    pub fn new(weight: u16, style: FontStyle) -> Self {
        Self { weight, style }
    }

    /// Key under which this variant's resource locator is filed in `files`.
    pub fn key(&self) -> String {
        variant_key(self.weight, self.style)
    }
}

/// Derives the `files` lookup key for a (weight, style) pair: `"400"` for
/// upright faces, `"400italic"` for italic ones.
pub fn variant_key(weight: u16, style: FontStyle) -> String {
    match style {
        FontStyle::Normal => weight.to_string(),
        FontStyle::Italic => format!("{weight}italic"),
    }
}

/// Catalog entry describing one font family: its declared variants and the
/// resource locator (filesystem path or URL) behind each.
///
/// `variants` and `files` are independent layers: a variant may be declared
/// without a resource and a resource may exist for an undeclared pair. The
/// resolver and the load service each tolerate the mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub id: String,
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<FontCategory>,
    pub variants: Vec<VariantSpec>,
    pub files: BTreeMap<String, String>,
    pub source: FontSource,
}

impl FontDescriptor {
    /// Resource locator filed for an exact (weight, style) pair, if any.
    pub fn file_for(&self, weight: u16, style: FontStyle) -> Option<&str> {
        self.files.get(&variant_key(weight, style)).map(String::as_str)
    }
}

/// Ordered collection of font descriptors.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    fonts: Vec<FontDescriptor>,
}

impl FontCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the bundled seed families.
    pub fn bundled() -> Self {
        Self {
            fonts: BUNDLED_FONTS.clone(),
        }
    }

    /// Looks up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&FontDescriptor> {
        self.fonts.iter().find(|f| f.id == id)
    }

    /// True iff a descriptor with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.fonts.iter()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Appends a batch of descriptors.
    ///
    /// The whole batch is validated first: an id already in the catalog, or
    /// repeated within the batch, rejects the append and leaves the catalog
    /// unchanged.
    pub fn append(&mut self, batch: Vec<FontDescriptor>) -> Result<()> {
        let mut incoming: HashSet<&str> = HashSet::new();
        for descriptor in &batch {
            if self.contains(&descriptor.id) || !incoming.insert(&descriptor.id) {
                return Err(AppError::DuplicateId(descriptor.id.clone()));
            }
        }
        self.fonts.extend(batch);
        Ok(())
    }
}

fn seed(
    id: &str,
    family: &str,
    category: FontCategory,
    variants: &[(u16, FontStyle)],
    files: &[(&str, &str)],
) -> FontDescriptor {
    FontDescriptor {
        id: id.to_string(),
        family: family.to_string(),
        category: Some(category),
        variants: variants.iter().map(|&(w, s)| VariantSpec::new(w, s)).collect(),
        files: files
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        source: FontSource::Google,
    }
}

const N: FontStyle = FontStyle::Normal;
const I: FontStyle = FontStyle::Italic;

/// Seed catalog used when no remote catalog is available.
static BUNDLED_FONTS: Lazy<Vec<FontDescriptor>> = Lazy::new(|| {
    vec![
        seed(
            "roboto",
            "Roboto",
            FontCategory::SansSerif,
            &[(400, N), (400, I), (700, N), (700, I)],
            &[
                ("400", "https://fonts.gstatic.com/s/roboto/v30/KFOmCnqEu92Fr1Mu4mxK.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/roboto/v30/KFOkCnqEu92Fr1Mu51xIIzI.ttf"),
                ("700", "https://fonts.gstatic.com/s/roboto/v30/KFOlCnqEu92Fr1MmWUlfBBc4.ttf"),
                ("700italic", "https://fonts.gstatic.com/s/roboto/v30/KFOjCnqEu92Fr1Mu51TzBic6CsI.ttf"),
            ],
        ),
        seed(
            "open-sans",
            "Open Sans",
            FontCategory::SansSerif,
            &[(400, N), (400, I), (600, N), (700, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/opensans/v40/memSYaGs126MiZpBA-UvWbX2vVnXBbObj2OVZyOOSr4dVJWUgsjZ0B4gaVI.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/opensans/v40/memQYaGs126MiZpBA-UFUIcVXSCEkx2cmqvXlWq8tWZ0Pw86hd0Rk8ZkWVAexQ.ttf"),
                ("600", "https://fonts.gstatic.com/s/opensans/v40/memSYaGs126MiZpBA-UvWbX2vVnXBbObj2OVZyOOSr4dVJWUgsgH1x4gaVI.ttf"),
                ("700", "https://fonts.gstatic.com/s/opensans/v40/memSYaGs126MiZpBA-UvWbX2vVnXBbObj2OVZyOOSr4dVJWUgsg-1x4gaVI.ttf"),
            ],
        ),
        seed(
            "lato",
            "Lato",
            FontCategory::SansSerif,
            &[(400, N), (400, I), (700, N), (900, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/lato/v24/S6uyw4BMUTPHjx4wXg.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/lato/v24/S6u8w4BMUTPHjxsAXC-q.ttf"),
                ("700", "https://fonts.gstatic.com/s/lato/v24/S6u9w4BMUTPHh6UVSwiPGQ.ttf"),
                ("900", "https://fonts.gstatic.com/s/lato/v24/S6u9w4BMUTPHh50XSwiPGQ.ttf"),
            ],
        ),
        seed(
            "montserrat",
            "Montserrat",
            FontCategory::SansSerif,
            &[(400, N), (500, N), (600, N), (700, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/montserrat/v26/JTUHjIg1_i6t8kCHKm4532VJOt5-QNFgpCtr6Ew-.ttf"),
                ("500", "https://fonts.gstatic.com/s/montserrat/v26/JTUHjIg1_i6t8kCHKm4532VJOt5-QNFgpCtZ6Ew-.ttf"),
                ("600", "https://fonts.gstatic.com/s/montserrat/v26/JTUHjIg1_i6t8kCHKm4532VJOt5-QNFgpCu170w-.ttf"),
                ("700", "https://fonts.gstatic.com/s/montserrat/v26/JTUHjIg1_i6t8kCHKm4532VJOt5-QNFgpCuM70w-.ttf"),
            ],
        ),
        seed(
            "source-sans-pro",
            "Source Sans Pro",
            FontCategory::SansSerif,
            &[(400, N), (400, I), (600, N), (700, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/sourcesanspro/v22/6xK3dSBYKcSV-LCoeQqfX1RYOo3qOK7l.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/sourcesanspro/v22/6xK1dSBYKcSV-LCoeQqfX1RYOo3qPK7l.ttf"),
                ("600", "https://fonts.gstatic.com/s/sourcesanspro/v22/6xKydSBYKcSV-LCoeQqfX1RYOo3i54rw.ttf"),
                ("700", "https://fonts.gstatic.com/s/sourcesanspro/v22/6xKydSBYKcSV-LCoeQqfX1RYOo3ig4vw.ttf"),
            ],
        ),
        seed(
            "playfair-display",
            "Playfair Display",
            FontCategory::Serif,
            &[(400, N), (400, I), (700, N), (900, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/playfairdisplay/v37/nuFvD-vYSZviVYUb_rj3ij__anPXJzDwcbmjWBN2PKdFvUDQ.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/playfairdisplay/v37/nuFkD-vYSZviVYUb_rj3ij__anPXJzDwcbmjWBN2PId8vxDS.ttf"),
                ("700", "https://fonts.gstatic.com/s/playfairdisplay/v37/nuFvD-vYSZviVYUb_rj3ij__anPXJzDwcbmjWBN2PKe1vUDQ.ttf"),
                ("900", "https://fonts.gstatic.com/s/playfairdisplay/v37/nuFvD-vYSZviVYUb_rj3ij__anPXJzDwcbmjWBN2PKeFvUDQ.ttf"),
            ],
        ),
        seed(
            "merriweather",
            "Merriweather",
            FontCategory::Serif,
            &[(400, N), (400, I), (700, N), (900, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/merriweather/v30/u-440qyriQwlOrhSvowK_l5-fCZM.ttf"),
                ("400italic", "https://fonts.gstatic.com/s/merriweather/v30/u-4n0qyriQwlOrhSvowK_l5-eR7NWMf6.ttf"),
                ("700", "https://fonts.gstatic.com/s/merriweather/v30/u-4n0qyriQwlOrhSvowK_l52xwNZWMf6.ttf"),
                ("900", "https://fonts.gstatic.com/s/merriweather/v30/u-4n0qyriQwlOrhSvowK_l52_wFZWMf6.ttf"),
            ],
        ),
        seed(
            "poppins",
            "Poppins",
            FontCategory::SansSerif,
            &[(400, N), (500, N), (600, N), (700, N)],
            &[
                ("400", "https://fonts.gstatic.com/s/poppins/v21/pxiEyp8kv8JHgFVrJJfecg.ttf"),
                ("500", "https://fonts.gstatic.com/s/poppins/v21/pxiByp8kv8JHgFVrLGT9Z1xlFQ.ttf"),
                ("600", "https://fonts.gstatic.com/s/poppins/v21/pxiByp8kv8JHgFVrLEj6Z1xlFQ.ttf"),
                ("700", "https://fonts.gstatic.com/s/poppins/v21/pxiByp8kv8JHgFVrLCz7Z1xlFQ.ttf"),
            ],
        ),
    ]
});
