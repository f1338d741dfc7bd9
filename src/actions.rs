//! Object Store Client Bindings
//!
//! Frontend bindings to the remote object-store client the host page injects
//! at `window.__WFD_CLIENT__`. Reads are fresh full scans (no delta mode);
//! actions are apply-once with no automatic retry. A rejected promise maps to
//! `Err(String)` for the caller to surface.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::models::{FridgeItem, Recipe, RecipeSuggestion};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__WFD_CLIENT__"], js_name = readAll)]
    async fn read_all(object_type: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__WFD_CLIENT__"], js_name = applyAction)]
    async fn apply_action(action: &str, params: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__WFD_CLIENT__"], js_name = recommend)]
    async fn recommend_raw(params: JsValue) -> Result<JsValue, JsValue>;
}

fn describe_js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Confirmation returned by the action interface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReceipt {
    pub confirmed: bool,
    /// Edits echoed by the store. Local state is refreshed from full
    /// re-reads, not from this echo, so backend-derived fields that have not
    /// been computed yet are never masked by stale values.
    #[serde(default)]
    pub applied_edits: serde_json::Value,
}

async fn apply<T: Serialize>(action: &str, args: &T) -> Result<ActionReceipt, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = apply_action(action, js_args)
        .await
        .map_err(describe_js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// ========================
// Collection Reads
// ========================

pub async fn read_fridge_items() -> Result<Vec<FridgeItem>, String> {
    let result = read_all("FridgeItem").await.map_err(describe_js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn read_recipes() -> Result<Vec<Recipe>, String> {
    let result = read_all("Recipe").await.map_err(describe_js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// ========================
// Item Actions
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemArgs<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub quantity: u32,
    pub use_by: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemArgs<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub quantity: u32,
    pub use_by: Option<&'a str>,
    pub date_added: Option<&'a str>,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

pub async fn create_item(args: &CreateItemArgs<'_>) -> Result<ActionReceipt, String> {
    apply("create-item", args).await
}

pub async fn edit_item(args: &EditItemArgs<'_>) -> Result<ActionReceipt, String> {
    apply("edit-item", args).await
}

pub async fn delete_item(id: &str) -> Result<ActionReceipt, String> {
    apply("delete-item", &IdArgs { id }).await
}

// ========================
// Recipe Actions
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeArgs<'a> {
    pub name: &'a str,
    pub link: Option<&'a str>,
    /// JSON array string, see `parse::encode_ingredient_lines`.
    pub ingredients: &'a str,
    pub procedure: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRecipeArgs<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub link: Option<&'a str>,
    pub ingredients: &'a str,
    pub procedure: &'a str,
}

pub async fn create_recipe(args: &CreateRecipeArgs<'_>) -> Result<ActionReceipt, String> {
    apply("create-recipe", args).await
}

pub async fn edit_recipe(args: &EditRecipeArgs<'_>) -> Result<ActionReceipt, String> {
    apply("edit-recipe", args).await
}

pub async fn delete_recipe(id: &str) -> Result<ActionReceipt, String> {
    apply("delete-recipe", &IdArgs { id }).await
}

// ========================
// Recommendation Service
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendArgs<'a> {
    candidate_items: &'a [FridgeItem],
    candidate_recipes: &'a [Recipe],
    top_k: usize,
    preference_text: &'a str,
}

/// Ask the external recommendation service for up to `top_k` suggestions.
/// Opaque, possibly slow, possibly empty; the caller truncates and caches.
pub async fn recommend(
    candidate_items: &[FridgeItem],
    candidate_recipes: &[Recipe],
    top_k: usize,
    preference_text: &str,
) -> Result<Vec<RecipeSuggestion>, String> {
    let args = RecommendArgs {
        candidate_items,
        candidate_recipes,
        top_k,
        preference_text,
    };
    let js_args = serde_wasm_bindgen::to_value(&args).map_err(|e| e.to_string())?;
    let result = recommend_raw(js_args).await.map_err(describe_js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Client-generated identifier for new items, from the browser's crypto API.
pub fn new_entity_id() -> String {
    web_sys::window()
        .and_then(|w| w.crypto().ok())
        .map(|c| c.random_uuid())
        .unwrap_or_else(|| format!("item-{}", js_sys::Date::now() as u64))
}
