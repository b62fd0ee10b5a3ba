//! Comparison selection state and its operations.
//!
//! [`SelectionController`] owns the catalog and the selection. Every
//! operation mutates the state synchronously and returns the load requests
//! it implies; callers decide how to schedule them, so a state change never
//! blocks and never hides background work.

use crate::catalog::{FontCatalog, FontDescriptor, FontStyle};
use crate::config::{
    DEFAULT_BG_COLOR, DEFAULT_SAMPLE_TEXT, DEFAULT_SIZE_PX, DEFAULT_WEIGHT, MAX_SIZE_PX,
    MIN_SIZE_PX,
};
use crate::error::Result;
use crate::settings::Settings;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Which preview card an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A load the host should perform as a consequence of a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub font_id: String,
    pub weight: u16,
    pub style: FontStyle,
}

/// The comparison state driving both previews.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub left_id: Option<String>,
    pub right_id: Option<String>,
    pub weight: u16,
    pub style: FontStyle,
    pub size_px: u32,
    pub background_color: String,
    pub sample_text: String,
    pub favorites: BTreeSet<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            left_id: None,
            right_id: None,
            weight: DEFAULT_WEIGHT,
            style: FontStyle::Normal,
            size_px: DEFAULT_SIZE_PX,
            background_color: DEFAULT_BG_COLOR.to_string(),
            sample_text: DEFAULT_SAMPLE_TEXT.to_string(),
            favorites: BTreeSet::new(),
        }
    }
}

/// Owns the selection state and the catalog it refers to.
pub struct SelectionController {
    catalog: FontCatalog,
    state: SelectionState,
}

impl SelectionController {
    /// Builds a controller from a catalog and a persisted snapshot.
    ///
    /// Snapshot ids that no longer resolve fall back to the first two
    /// catalog entries, same as a first run.
    pub fn new(catalog: FontCatalog, settings: &Settings) -> Self {
        let mut ids = catalog.iter().map(|f| f.id.clone());
        let first = ids.next();
        let second = ids.next();
        drop(ids);

        let resolve_id = |wanted: &Option<String>, fallback: Option<String>| {
            wanted
                .as_ref()
                .filter(|id| catalog.contains(id))
                .cloned()
                .or(fallback)
        };

        let state = SelectionState {
            left_id: resolve_id(&settings.left_id, first),
            right_id: resolve_id(&settings.right_id, second),
            weight: settings.weight.clamp(100, 900),
            style: settings.style,
            size_px: settings.size_px.clamp(MIN_SIZE_PX, MAX_SIZE_PX),
            background_color: settings.background_color.clone(),
            sample_text: settings.sample_text.clone(),
            favorites: settings.favorites.clone(),
        };

        Self { catalog, state }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    /// Load requests that bring both current previews up, e.g. at startup.
    pub fn initial_requests(&self) -> Vec<LoadRequest> {
        self.current_requests()
    }

    /// Puts a font on one side of the comparison.
    pub fn select_font(&mut self, side: Side, font_id: &str) -> Vec<LoadRequest> {
        if !self.catalog.contains(font_id) {
            warn!("Ignoring selection of unknown font id: {}", font_id);
            return Vec::new();
        }

        let id = Some(font_id.to_string());
        match side {
            Side::Left => self.state.left_id = id,
            Side::Right => self.state.right_id = id,
        }

        vec![self.request_for(font_id)]
    }

    /// Sets the shared weight and reloads both previews at it.
    pub fn set_weight(&mut self, weight: u16) -> Vec<LoadRequest> {
        self.state.weight = weight.clamp(100, 900);
        self.current_requests()
    }

    /// Sets the shared style and reloads both previews at it.
    pub fn set_style(&mut self, style: FontStyle) -> Vec<LoadRequest> {
        self.state.style = style;
        self.current_requests()
    }

    /// Preview size in pixels. Visual only, no reload.
    pub fn set_size_px(&mut self, size_px: u32) {
        self.state.size_px = size_px.clamp(MIN_SIZE_PX, MAX_SIZE_PX);
    }

    /// Preview background color. Visual only, no reload.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.state.background_color = color.into();
    }

    /// Shared sample text. Visual only, no reload.
    pub fn set_sample_text(&mut self, text: impl Into<String>) {
        self.state.sample_text = text.into();
    }

    /// Keeps the winning side and draws a fresh contender for the other.
    ///
    /// The pool excludes both current ids so the next pairing repeats
    /// neither; an empty pool leaves the loser unchanged.
    pub fn pick_winner<R: Rng>(&mut self, side: Side, rng: &mut R) -> Vec<LoadRequest> {
        let (winner_id, loser_id) = match side {
            Side::Left => (self.state.left_id.clone(), self.state.right_id.clone()),
            Side::Right => (self.state.right_id.clone(), self.state.left_id.clone()),
        };

        let pool: Vec<&FontDescriptor> = self
            .catalog
            .iter()
            .filter(|f| Some(&f.id) != winner_id.as_ref() && Some(&f.id) != loser_id.as_ref())
            .collect();

        let Some(next) = pool.choose(rng) else {
            warn!("No eligible contender left in the catalog");
            return Vec::new();
        };
        let next_id = next.id.clone();

        match side {
            Side::Left => self.state.right_id = Some(next_id.clone()),
            Side::Right => self.state.left_id = Some(next_id.clone()),
        }

        vec![self.request_for(&next_id)]
    }

    /// Adds the id to favorites, or removes it if already present.
    pub fn toggle_favorite(&mut self, font_id: &str) {
        if !self.state.favorites.remove(font_id) {
            self.state.favorites.insert(font_id.to_string());
        }
    }

    /// Appends new descriptors to the catalog.
    ///
    /// Atomic: a duplicate id anywhere in the batch rejects the whole batch
    /// and leaves the catalog unchanged.
    pub fn append_to_catalog(&mut self, batch: Vec<FontDescriptor>) -> Result<()> {
        self.catalog.append(batch)
    }

    /// Snapshot of the persisted fields, ready to save.
    pub fn snapshot(&self) -> Settings {
        Settings {
            left_id: self.state.left_id.clone(),
            right_id: self.state.right_id.clone(),
            background_color: self.state.background_color.clone(),
            weight: self.state.weight,
            style: self.state.style,
            size_px: self.state.size_px,
            sample_text: self.state.sample_text.clone(),
            favorites: self.state.favorites.clone(),
        }
    }

    fn request_for(&self, font_id: &str) -> LoadRequest {
        LoadRequest {
            font_id: font_id.to_string(),
            weight: self.state.weight,
            style: self.state.style,
        }
    }

    fn current_requests(&self) -> Vec<LoadRequest> {
        [&self.state.left_id, &self.state.right_id]
            .into_iter()
            .flatten()
            .filter(|id| self.catalog.contains(id))
            .map(|id| self.request_for(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> SelectionController {
        SelectionController::new(FontCatalog::bundled(), &Settings::default())
    }

    #[test]
    fn defaults_to_first_two_catalog_entries() {
        let c = controller();
        assert_eq!(c.state().left_id.as_deref(), Some("roboto"));
        assert_eq!(c.state().right_id.as_deref(), Some("open-sans"));
    }

    #[test]
    fn stale_snapshot_ids_fall_back_to_defaults() {
        let settings = Settings {
            left_id: Some("deleted-font".to_string()),
            right_id: Some("lato".to_string()),
            ..Settings::default()
        };
        let c = SelectionController::new(FontCatalog::bundled(), &settings);
        assert_eq!(c.state().left_id.as_deref(), Some("roboto"));
        assert_eq!(c.state().right_id.as_deref(), Some("lato"));
    }

    #[test]
    fn select_font_sets_id_and_requests_load_at_current_parameters() {
        let mut c = controller();
        c.set_weight(700);
        c.set_style(FontStyle::Italic);

        let requests = c.select_font(Side::Right, "lato");
        assert_eq!(c.state().right_id.as_deref(), Some("lato"));
        assert_eq!(
            requests,
            vec![LoadRequest {
                font_id: "lato".to_string(),
                weight: 700,
                style: FontStyle::Italic,
            }]
        );
    }

    #[test]
    fn select_unknown_font_is_ignored() {
        let mut c = controller();
        let before = c.state().clone();
        let requests = c.select_font(Side::Left, "no-such-font");
        assert!(requests.is_empty());
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn set_weight_reloads_both_sides() {
        let mut c = controller();
        let requests = c.set_weight(700);
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.weight == 700));
        assert_eq!(requests[0].font_id, "roboto");
        assert_eq!(requests[1].font_id, "open-sans");
    }

    #[test]
    fn set_weight_clamps_to_valid_range() {
        let mut c = controller();
        c.set_weight(50);
        assert_eq!(c.state().weight, 100);
        c.set_weight(9999);
        assert_eq!(c.state().weight, 900);
    }

    #[test]
    fn visual_parameters_produce_no_requests() {
        let mut c = controller();
        c.set_size_px(64);
        c.set_background_color("#222222");
        c.set_sample_text("Hamburgefonstiv");
        assert_eq!(c.state().size_px, 64);
        assert_eq!(c.state().background_color, "#222222");
        assert_eq!(c.state().sample_text, "Hamburgefonstiv");
    }

    #[test]
    fn pick_winner_never_repeats_either_current_side() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut c = controller();
            let left_before = c.state().left_id.clone();
            let right_before = c.state().right_id.clone();

            let requests = c.pick_winner(Side::Left, &mut rng);

            // The winner stays put; the loser is replaced by a contender
            // that matches neither previous side.
            assert_eq!(c.state().left_id, left_before);
            let new_right = c.state().right_id.clone();
            assert_ne!(new_right, left_before);
            assert_ne!(new_right, right_before);
            assert_eq!(requests.len(), 1);
            assert_eq!(Some(&requests[0].font_id), new_right.as_ref());
        }
    }

    #[test]
    fn pick_winner_with_empty_pool_leaves_loser_unchanged() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut catalog = FontCatalog::new();
        catalog
            .append(
                FontCatalog::bundled()
                    .iter()
                    .take(2)
                    .cloned()
                    .collect::<Vec<_>>(),
            )
            .unwrap();

        let mut c = SelectionController::new(catalog, &Settings::default());
        let before = c.state().clone();
        let requests = c.pick_winner(Side::Right, &mut rng);
        assert!(requests.is_empty());
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn toggle_favorite_is_its_own_inverse() {
        let mut c = controller();
        let original = c.state().favorites.clone();

        c.toggle_favorite("lato");
        assert!(c.state().favorites.contains("lato"));

        c.toggle_favorite("lato");
        assert_eq!(c.state().favorites, original);
    }

    #[test]
    fn snapshot_round_trips_through_settings() {
        let mut c = controller();
        c.set_weight(700);
        c.toggle_favorite("lato");
        c.set_sample_text("Grumpy wizards");

        let reloaded = SelectionController::new(FontCatalog::bundled(), &c.snapshot());
        assert_eq!(reloaded.state(), c.state());
    }

    #[test]
    fn append_duplicate_leaves_catalog_unchanged() {
        let mut c = controller();
        let before = c.catalog().len();
        let duplicate = c.catalog().get("roboto").unwrap().clone();
        assert!(c.append_to_catalog(vec![duplicate]).is_err());
        assert_eq!(c.catalog().len(), before);
    }
}
