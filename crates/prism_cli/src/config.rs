//! Render settings resolution.
//!
//! Settings are layered: the scene's defaults, then an optional JSON file,
//! then command line flags. The JSON file may contain a `render` object
//! (fields of [`RenderConfig`]) and a `camera` object (fields of
//! [`CameraSettings`]); any field it leaves out keeps the layer below.
//!
//! ```json
//! {
//!   "render": { "image_width": 800, "samples_per_pixel": 200 },
//!   "camera": { "vfov": 30.0, "look_from": [13.0, 2.0, 3.0] }
//! }
//! ```

use anyhow::{bail, Context, Result};
use log::debug;
use prism_renderer::{CameraSettings, RenderConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::cli::Args;

/// Fully resolved settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub render: RenderConfig,
    pub camera: CameraSettings,
}

/// Default image width when nothing else sets one.
const DEFAULT_WIDTH: u32 = 400;

/// Image height matching `width` at the given aspect ratio.
fn height_for(width: u32, aspect_ratio: f32) -> u32 {
    ((width as f32 / aspect_ratio) as u32).max(1)
}

/// Read a settings file into a JSON object.
pub fn load_settings_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("Invalid settings file {}", path.display()))
}

fn parse_settings(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        bail!("expected a JSON object at the top level");
    }
    if let Some(key) = value
        .as_object()
        .and_then(|obj| obj.keys().find(|k| *k != "render" && *k != "camera"))
    {
        bail!("unknown section \"{}\"", key);
    }
    Ok(value)
}

/// Overlay the fields present in `overrides` onto `base`.
fn overlay<T: Serialize + DeserializeOwned>(base: &T, overrides: Option<&Value>) -> Result<T> {
    let Some(overrides) = overrides else {
        return Ok(serde_json::from_value(serde_json::to_value(base)?)?);
    };
    let Some(fields) = overrides.as_object() else {
        bail!("expected an object, found {}", overrides);
    };

    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(target) = &mut merged {
        for (key, value) in fields {
            if !target.contains_key(key) {
                bail!("unknown field \"{}\"", key);
            }
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(serde_json::from_value(merged)?)
}

/// Whether a settings section spells out `key`.
fn sets_field(section: Option<&Value>, key: &str) -> bool {
    section
        .and_then(Value::as_object)
        .is_some_and(|fields| fields.contains_key(key))
}

/// Combine scene defaults, the settings file and command line flags.
pub fn resolve(args: &Args, scene_camera: CameraSettings, file: Option<&Value>) -> Result<Settings> {
    let render_file = file.and_then(|f| f.get("render"));
    let camera_file = file.and_then(|f| f.get("camera"));

    let mut camera: CameraSettings = overlay(&scene_camera, camera_file).context("Invalid \"camera\" settings")?;
    if !(camera.aspect_ratio.is_finite() && camera.aspect_ratio > 0.0) {
        bail!("camera aspect_ratio must be positive and finite, got {}", camera.aspect_ratio);
    }

    let base_render = RenderConfig {
        image_width: DEFAULT_WIDTH,
        image_height: height_for(DEFAULT_WIDTH, camera.aspect_ratio),
        ..RenderConfig::default()
    };
    let mut render: RenderConfig = overlay(&base_render, render_file).context("Invalid \"render\" settings")?;

    // A width on its own keeps the camera's shape, same as the --width flag
    if sets_field(render_file, "image_width") && !sets_field(render_file, "image_height") {
        render.image_height = height_for(render.image_width, camera.aspect_ratio);
    }

    if let Some(width) = args.width {
        render.image_width = width;
        render.image_height = args.height.unwrap_or_else(|| height_for(width, camera.aspect_ratio));
    } else if let Some(height) = args.height {
        render.image_height = height;
    }
    if let Some(samples) = args.samples {
        render.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        render.max_depth = max_depth;
    }
    if let Some(seed) = args.seed {
        render.seed = seed;
    }

    render.validate()?;

    // The image shape is authoritative so pixels stay square
    camera.aspect_ratio = render.image_width as f32 / render.image_height as f32;

    debug!("Resolved render settings: {:?}", render);
    debug!("Resolved camera settings: {:?}", camera);

    Ok(Settings { render, camera })
}
