//! Stateful styling front end with a per-instance output cache.

use std::collections::HashMap;

use crate::compose::{fallback_svg, style_svg};
use crate::config::IconConfig;
use crate::error::StyleError;
use crate::svg::{SvgValidator, UsvgValidator};

/// Most outputs kept before the cache is flushed.
pub const MAX_CACHED_OUTPUTS: usize = 256;

// ============================================================================
// IconStylizer
// ============================================================================

/// Holds one style config and applies it to any number of source icons.
///
/// This is the engine as a UI preview sees it: the config is edited in place
/// and every source icon is re-rendered against it. Outputs are cached per
/// source, and the cache is dropped whenever the config actually changes.
///
/// # Example
///
/// ```
/// use icon_styler::{IconConfig, IconStylizer, StylePreset};
///
/// let mut stylizer = IconStylizer::new(IconConfig::new(StylePreset::Flat));
/// let svg = r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="8"/></svg>"#;
///
/// let first = stylizer.render(svg);
/// assert!(first.contains(r#"viewBox="0 0 128 128""#));
///
/// stylizer.update(|config| config.icon_color = "#ff0000".into());
/// assert!(stylizer.render(svg).contains("#ff0000"));
/// ```
pub struct IconStylizer {
    config: IconConfig,
    validator: Box<dyn SvgValidator>,

    /// Bumped on every config change.
    version: u64,

    /// Styled output keyed by the source markup.
    cache: HashMap<String, String>,
}

impl IconStylizer {
    /// Creates a stylizer that validates its output with `usvg`.
    pub fn new(config: IconConfig) -> Self {
        Self::with_validator(config, UsvgValidator)
    }

    pub fn with_validator(config: IconConfig, validator: impl SvgValidator + 'static) -> Self {
        Self {
            config,
            validator: Box::new(validator),
            version: 0,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// Config version; changes exactly when the config does.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the config. Returns `true` if it differed from the old one.
    pub fn set_config(&mut self, config: IconConfig) -> bool {
        if self.config == config {
            return false;
        }
        self.config = config;
        self.invalidate();
        true
    }

    /// Edits the config in place, invalidating the cache if anything changed.
    pub fn update(&mut self, edit: impl FnOnce(&mut IconConfig)) -> bool {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_config(config)
    }

    /// Replaces the config from its JSON form.
    pub fn import_config_json(&mut self, json: &str) -> Result<bool, StyleError> {
        Ok(self.set_config(IconConfig::from_json(json)?))
    }

    pub fn export_config_json(&self) -> Result<String, StyleError> {
        Ok(self.config.to_json()?)
    }

    /// Styles `svg`, surfacing any failure. Successful outputs are cached.
    pub fn try_render(&mut self, svg: &str) -> Result<String, StyleError> {
        if let Some(output) = self.cache.get(svg) {
            return Ok(output.clone());
        }

        let output = style_svg(svg, &self.config, &*self.validator)?;
        if self.cache.len() >= MAX_CACHED_OUTPUTS {
            log::debug!("output cache full, flushing {} entries", self.cache.len());
            self.cache.clear();
        }
        self.cache.insert(svg.to_owned(), output.clone());
        Ok(output)
    }

    /// Styles `svg`, substituting the fallback document on failure.
    pub fn render(&mut self, svg: &str) -> String {
        self.try_render(svg).unwrap_or_else(|err| {
            log::error!("failed to style SVG: {err}");
            fallback_svg(self.config.width, self.config.height)
        })
    }

    /// Styles every source in order.
    pub fn render_all<'a>(&mut self, sources: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        sources.into_iter().map(|svg| self.render(svg)).collect()
    }

    /// Clears the output cache. Useful for freeing memory.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of cached outputs.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn invalidate(&mut self) {
        self.version += 1;
        self.cache.clear();
        log::debug!("style config changed, version {}", self.version);
    }
}

impl Default for IconStylizer {
    fn default() -> Self {
        Self::new(IconConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
