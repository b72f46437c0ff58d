//! JavaScript bindings for browser previews.
//!
//! Only available with the `tsify` feature. Configs cross the boundary as
//! plain JS objects with the same camelCase shape as the JSON form, and the
//! generated TypeScript types come from the `Tsify` derives on the config
//! types.
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { processSvgWithStyle, StylePreview } from 'icon-styler';
//!
//! await init();
//!
//! const styled = processSvgWithStyle(svgText, { style: 'neumorphism' });
//!
//! const preview = new StylePreview({ style: 'glassmorphism' });
//! preview.setConfig({ style: 'pixel-art', pixelSize: 6 });
//! element.innerHTML = preview.render(svgText);
//! ```

use wasm_bindgen::prelude::*;

use crate::compose::process_svg_with_style;
use crate::config::IconConfig;
use crate::stylizer::IconStylizer;

fn config_from_js(value: JsValue) -> Result<IconConfig, JsError> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid style config: {}", e)))
}

/// Styles `svg` with `config`. Never throws for bad SVG; returns the
/// fallback document instead.
#[wasm_bindgen(js_name = "processSvgWithStyle")]
pub fn process_svg_with_style_js(svg: &str, config: JsValue) -> Result<String, JsError> {
    Ok(process_svg_with_style(svg, &config_from_js(config)?))
}

// ============================================================================
// StylePreview
// ============================================================================

/// A wrapper around [`IconStylizer`] for live previews in web UIs.
#[wasm_bindgen]
pub struct StylePreview {
    stylizer: IconStylizer,
}

#[wasm_bindgen]
impl StylePreview {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<StylePreview, JsError> {
        Ok(Self {
            stylizer: IconStylizer::new(config_from_js(config)?),
        })
    }

    /// Replaces the config. Returns `true` if it changed.
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config: JsValue) -> Result<bool, JsError> {
        Ok(self.stylizer.set_config(config_from_js(config)?))
    }

    /// Styles `svg` with the current config.
    pub fn render(&mut self, svg: &str) -> String {
        self.stylizer.render(svg)
    }

    // ---- Config Import/Export ----

    #[wasm_bindgen(js_name = "exportConfigJson")]
    pub fn export_config_json(&self) -> Result<String, JsError> {
        self.stylizer
            .export_config_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize config: {}", e)))
    }

    #[wasm_bindgen(js_name = "importConfigJson")]
    pub fn import_config_json(&mut self, json: &str) -> Result<bool, JsError> {
        self.stylizer
            .import_config_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse config: {}", e)))
    }

    /// Clears the render cache to free memory.
    #[wasm_bindgen(js_name = "clearCache")]
    pub fn clear_cache(&mut self) {
        self.stylizer.clear_cache();
    }
}
