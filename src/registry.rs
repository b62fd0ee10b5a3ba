//! Host font registration.
//!
//! The engine treats "make this face available for rendering" as an opaque
//! async capability so the comparison core stays independent of any
//! particular host. [`FontdbRegistry`] is the in-process implementation: it
//! fetches resource bytes, validates them as SFNT data, and files the face
//! into an owned `fontdb::Database` under the requested family name.

use crate::catalog::FontStyle;
use crate::error::{AppError, Result};
use async_compat::Compat;
use log::info;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

/// The host font-loading primitive.
///
/// `register` resolves once the face is usable by the host and fails on
/// malformed data or an unreachable resource.
pub trait FontRegistry: Send + Sync + 'static {
    fn register(
        &self,
        family: &str,
        locator: &str,
        weight: u16,
        style: FontStyle,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Fetches the raw bytes behind a resource locator.
///
/// HTTP(S) locators go through the web client; anything else is read as a
/// filesystem path. Neither blocks the calling task.
async fn fetch_resource(locator: &str) -> Result<Vec<u8>> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        let url = locator.to_string();
        // The web client is tokio-flavored; Compat bridges it onto this
        // executor.
        Compat::new(async move {
            let response = reqwest::get(&url)
                .await
                .map_err(|e| AppError::FontLoad(format!("Request failed for {}: {}", url, e)))?;
            if !response.status().is_success() {
                return Err(AppError::FontLoad(format!(
                    "Request for {} returned {}",
                    url,
                    response.status()
                )));
            }
            response
                .bytes()
                .await
                .map(|body| body.to_vec())
                .map_err(|e| AppError::FontLoad(format!("Failed to read body of {}: {}", url, e)))
        })
        .await
    } else {
        let path = PathBuf::from(locator);
        async_std::fs::read(&path)
            .await
            .map_err(|e| AppError::FontLoad(format!("Failed to read {}: {}", path.display(), e)))
    }
}

struct RegistryInner {
    db: fontdb::Database,
    /// Face ids per requested family name. Uploads are frequently misnamed,
    /// so the font's internal name tables are not trusted for lookups.
    families: HashMap<String, Vec<fontdb::ID>>,
}

impl Default for RegistryInner {
    fn default() -> Self {
        Self {
            db: fontdb::Database::new(),
            families: HashMap::new(),
        }
    }
}

/// In-process host: an owned `fontdb::Database` as the active font set.
#[derive(Default)]
pub struct FontdbRegistry {
    inner: Mutex<RegistryInner>,
}

impl FontdbRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff at least one face was registered under this family name.
    pub fn is_registered(&self, family: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .families
            .get(family)
            .is_some_and(|faces| !faces.is_empty())
    }

    /// Number of faces in the active font set.
    pub fn face_count(&self) -> usize {
        self.inner.lock().unwrap().db.faces().count()
    }

    fn insert_faces(&self, family: &str, data: Vec<u8>) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let before: HashSet<fontdb::ID> = inner.db.faces().map(|face| face.id).collect();
        inner.db.load_font_data(data);
        let added: Vec<fontdb::ID> = inner
            .db
            .faces()
            .map(|face| face.id)
            .filter(|id| !before.contains(id))
            .collect();
        let count = added.len();
        inner
            .families
            .entry(family.to_string())
            .or_default()
            .extend(added);
        count
    }
}

impl FontRegistry for FontdbRegistry {
    async fn register(
        &self,
        family: &str,
        locator: &str,
        weight: u16,
        style: FontStyle,
    ) -> Result<()> {
        let data = fetch_resource(locator).await?;

        // A collection may carry several faces; validating the first is
        // enough to reject non-SFNT payloads before they reach the database.
        ttf_parser::Face::parse(&data, 0)
            .map_err(|e| AppError::FontLoad(format!("Malformed font data at {}: {}", locator, e)))?;

        let added = self.insert_faces(family, data);
        if added == 0 {
            return Err(AppError::FontLoad(format!(
                "Host database rejected {}",
                locator
            )));
        }
        info!(
            "Registered {} {} {} ({} face(s)) from {}",
            family, weight, style, added, locator
        );
        Ok(())
    }
}
