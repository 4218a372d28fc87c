//! Name -> icon lookup with a guaranteed fallback.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::traits::Canvas;

use super::catalog::{ALIASES, DEFINITIONS};
use super::{decode, draw_icon, normalize_condition, post_process, EncodedIcon, Icon16};

/// Name of the fallback icon every registry contains.
pub const FALLBACK_ICON: &str = "unknown";

static GLOBAL: OnceLock<IconRegistry> = OnceLock::new();

/// Decoded icons keyed by name.
///
/// Built once; icons are immutable afterwards. Always resolves
/// [`FALLBACK_ICON`], even if no definition supplied one.
#[derive(Debug, Clone)]
pub struct IconRegistry {
    icons: HashMap<String, Arc<Icon16>>,
}

impl IconRegistry {
    /// The process-wide registry of built-in icons.
    ///
    /// Decoded on first use; later calls return the same instance.
    pub fn global() -> &'static IconRegistry {
        GLOBAL.get_or_init(IconRegistry::builtin)
    }

    /// Decodes the built-in icon set.
    pub fn builtin() -> Self {
        let mut registry = Self::from_definitions(&DEFINITIONS);
        for (alias, target) in ALIASES {
            registry.alias(alias, target);
        }
        registry
    }

    /// Decodes `defs`, post-processing each icon exactly once.
    ///
    /// Malformed grids still decode (missing cells are black) but are
    /// reported. A blank fallback is inserted when no `unknown` is given.
    pub fn from_definitions(defs: &[EncodedIcon]) -> Self {
        let mut icons = HashMap::with_capacity(defs.len() + 1);
        for def in defs {
            if !def.is_well_formed() {
                log::warn!("icon '{}' is not 16x16, missing cells decode black", def.name);
            }
            let mut icon = decode(def);
            post_process(def.name, &mut icon);
            icons.insert(def.name.to_string(), Arc::new(icon));
        }
        icons
            .entry(FALLBACK_ICON.to_string())
            .or_insert_with(|| Arc::new(Icon16::blank()));
        Self { icons }
    }

    /// Makes `alias` resolve to the same buffer as `target`.
    ///
    /// Returns false (and changes nothing) if `target` is absent or
    /// `alias` already exists.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        if self.icons.contains_key(alias) {
            return false;
        }
        match self.icons.get(target).cloned() {
            Some(icon) => {
                self.icons.insert(alias.to_string(), icon);
                true
            }
            None => false,
        }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, name: &str) -> Option<&Icon16> {
        self.icons.get(name).map(Arc::as_ref)
    }

    /// Lookup that falls back to [`FALLBACK_ICON`].
    pub fn resolve(&self, name: &str) -> &Icon16 {
        match self.lookup(name) {
            Some(icon) => icon,
            None => self.fallback(),
        }
    }

    fn fallback(&self) -> &Icon16 {
        // from_definitions always inserts the fallback
        &self.icons[FALLBACK_ICON]
    }

    /// Number of names, aliases included.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Always false; the fallback is always present.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True if both names share one decoded buffer.
    pub fn same_icon(&self, a: &str, b: &str) -> bool {
        match (self.icons.get(a), self.icons.get(b)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Normalizes a weather condition and blits its icon (or the fallback).
    pub fn draw_condition<C: Canvas>(&self, canvas: &mut C, condition: &str, x: i32, y: i32) {
        let key = normalize_condition(condition);
        draw_icon(canvas, self.resolve(&key), x, y);
    }
}
