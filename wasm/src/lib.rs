use serde::Deserialize;
use tech_svg_generator::{
    GenerateOptions, SceneType, generate_from_json, generate_from_yaml, generate_svg,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IllustrationOptions {
    content: Option<String>,
    scene: Option<String>,
    theme: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

fn build_generate_options(options: IllustrationOptions) -> Result<GenerateOptions, String> {
    let mut generate = GenerateOptions {
        theme: options.theme,
        ..GenerateOptions::default()
    };
    if let Some(scene) = options.scene {
        generate.scene = Some(scene.parse::<SceneType>().map_err(|err| err.to_string())?);
    }
    if let Some(width) = options.width {
        generate.width = width;
    }
    if let Some(height) = options.height {
        generate.height = height;
    }
    Ok(generate)
}

/// Renders a YAML or JSON description. JSON is recognised by a leading `{`.
#[wasm_bindgen]
pub fn render_description_svg(source: &str) -> Result<String, JsValue> {
    let result = if source.trim_start().starts_with('{') {
        generate_from_json(source)
    } else {
        generate_from_yaml(source)
    };
    result.map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_illustration_svg(
    title: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<IllustrationOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        IllustrationOptions::default()
    };
    let content = options.content.clone().unwrap_or_default();
    let generate = build_generate_options(options).map_err(|error| JsValue::from_str(&error))?;
    Ok(generate_svg(title, &content, &generate).svg)
}
