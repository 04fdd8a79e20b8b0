//! Explicit cache of the current bundle and its rendered screens

use alloc::collections::BTreeMap;
use chrono::{NaiveDateTime, TimeDelta};
use log::debug;

use crate::model::{ScreenBundle, ScreenId};
use crate::render::RenderedScreen;

/// Latest [`ScreenBundle`] with its fetch time and memoised renders
///
/// A stale bundle is kept after [`Cache::invalidate`] so the dashboard can
/// keep showing old data when a refresh fails.
#[derive(Debug, Clone)]
pub struct Cache {
    max_age: TimeDelta,
    bundle: Option<ScreenBundle>,
    fetched_at: Option<NaiveDateTime>,
    fresh: bool,
    rendered: BTreeMap<ScreenId, RenderedScreen>,
}

impl Cache {
    pub fn new(max_age: TimeDelta) -> Self {
        Self {
            max_age,
            bundle: None,
            fetched_at: None,
            fresh: false,
            rendered: BTreeMap::new(),
        }
    }

    /// Replace the bundle wholesale; previously rendered screens are dropped
    pub fn store(&mut self, bundle: ScreenBundle, fetched_at: NaiveDateTime) {
        self.bundle = Some(bundle);
        self.fetched_at = Some(fetched_at);
        self.fresh = true;
        self.rendered.clear();
        debug!("Cached bundle fetched at {}", fetched_at);
    }

    /// Whether the bundle can be shown without refetching
    pub fn freshness(&self, now: NaiveDateTime) -> bool {
        match (self.fresh, self.fetched_at) {
            (true, Some(fetched_at)) if self.bundle.is_some() => now - fetched_at <= self.max_age,
            _ => false,
        }
    }

    /// Mark the bundle stale and forget all rendered screens
    pub fn invalidate(&mut self) {
        self.fresh = false;
        self.rendered.clear();
    }

    /// Current bundle, fresh or stale
    pub fn bundle(&self) -> Option<&ScreenBundle> {
        self.bundle.as_ref()
    }

    pub fn fetched_at(&self) -> Option<NaiveDateTime> {
        self.fetched_at
    }

    pub fn rendered(&self, id: ScreenId) -> Option<&RenderedScreen> {
        self.rendered.get(&id)
    }

    pub fn store_rendered(&mut self, id: ScreenId, screen: RenderedScreen) {
        self.rendered.insert(id, screen);
    }
}
