//! Recipes and everything nested beneath them: tags, steps, step children, iterations.

use serde::{Deserialize, Serialize};

use super::Pagination;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<u64>,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipes: Vec<Recipe>,
}

/// The owning user is taken from the caller's credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreationInput {
    pub name: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeTag {
    pub id: u64,
    pub name: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeTagList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_tags: Vec<RecipeTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeTagCreationInput {
    pub name: String,
    #[serde(skip)]
    pub belongs_to_recipe: u64,
}

/// One ordered step of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStep {
    pub id: u64,
    pub index: u32,
    #[serde(rename = "preparationID")]
    pub preparation_id: u64,
    pub prerequisite_step: u64,
    pub min_estimated_time_in_seconds: u32,
    pub max_estimated_time_in_seconds: u32,
    pub temperature_in_celsius: Option<u16>,
    pub notes: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: u64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_steps: Vec<RecipeStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepCreationInput {
    pub index: u32,
    #[serde(rename = "preparationID")]
    pub preparation_id: u64,
    pub prerequisite_step: u64,
    pub min_estimated_time_in_seconds: u32,
    pub max_estimated_time_in_seconds: u32,
    pub temperature_in_celsius: Option<u16>,
    pub notes: String,
    #[serde(rename = "recipeID")]
    pub recipe_id: u64,
    #[serde(skip)]
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepPreparation {
    pub id: u64,
    #[serde(rename = "validPreparationID")]
    pub valid_preparation_id: u64,
    pub notes: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepPreparationList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_step_preparations: Vec<RecipeStepPreparation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepPreparationCreationInput {
    #[serde(rename = "validPreparationID")]
    pub valid_preparation_id: u64,
    pub notes: String,
    #[serde(skip)]
    pub belongs_to_recipe_step: u64,
}

/// An ingredient consumed by a step. `ingredient_id` is empty when the
/// ingredient is the product of an earlier step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepIngredient {
    pub id: u64,
    #[serde(rename = "ingredientID")]
    pub ingredient_id: Option<u64>,
    pub quantity_type: String,
    pub quantity_value: f64,
    pub quantity_notes: String,
    pub product_of_recipe: bool,
    pub ingredient_notes: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepIngredientList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_step_ingredients: Vec<RecipeStepIngredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepIngredientCreationInput {
    #[serde(rename = "ingredientID")]
    pub ingredient_id: Option<u64>,
    pub quantity_type: String,
    pub quantity_value: f64,
    pub quantity_notes: String,
    pub product_of_recipe: bool,
    pub ingredient_notes: String,
    #[serde(skip)]
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepInstrument {
    pub id: u64,
    #[serde(rename = "instrumentID")]
    pub instrument_id: Option<u64>,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    pub notes: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepInstrumentList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_step_instruments: Vec<RecipeStepInstrument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInstrumentCreationInput {
    #[serde(rename = "instrumentID")]
    pub instrument_id: Option<u64>,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    pub notes: String,
    #[serde(skip)]
    pub belongs_to_recipe_step: u64,
}

/// Something a step yields that later steps may consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepProduct {
    pub id: u64,
    pub name: String,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepProductList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_step_products: Vec<RecipeStepProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepProductCreationInput {
    pub name: String,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    #[serde(skip)]
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepEvent {
    pub id: u64,
    pub event_type: String,
    pub done: bool,
    #[serde(rename = "recipeIterationID")]
    pub recipe_iteration_id: u64,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_step: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepEventList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_step_events: Vec<RecipeStepEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepEventCreationInput {
    pub event_type: String,
    pub done: bool,
    #[serde(rename = "recipeIterationID")]
    pub recipe_iteration_id: u64,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: u64,
    #[serde(skip)]
    pub belongs_to_recipe_step: u64,
}

/// A single cook-through of a recipe, with the cook's ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIteration {
    pub id: u64,
    #[serde(rename = "recipeID")]
    pub recipe_id: u64,
    pub end_difficulty_rating: f32,
    pub end_complexity_rating: f32,
    pub end_taste_rating: f32,
    pub end_overall_rating: f32,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIterationList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_iterations: Vec<RecipeIteration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIterationCreationInput {
    #[serde(rename = "recipeID")]
    pub recipe_id: u64,
    pub end_difficulty_rating: f32,
    pub end_complexity_rating: f32,
    pub end_taste_rating: f32,
    pub end_overall_rating: f32,
    #[serde(skip)]
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIterationStep {
    pub id: u64,
    pub started_on: Option<u64>,
    pub ended_on: Option<u64>,
    pub state: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIterationStepList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub recipe_iteration_steps: Vec<RecipeIterationStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIterationStepCreationInput {
    pub started_on: Option<u64>,
    pub ended_on: Option<u64>,
    pub state: String,
    #[serde(skip)]
    pub belongs_to_recipe: u64,
}

/// A photo or video attached to a recipe iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IterationMedia {
    pub id: u64,
    pub path: String,
    pub mimetype: String,
    #[serde(rename = "recipeIterationID")]
    pub recipe_iteration_id: u64,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: Option<u64>,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_recipe_iteration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IterationMediaList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub iteration_medias: Vec<IterationMedia>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationMediaCreationInput {
    pub path: String,
    pub mimetype: String,
    #[serde(rename = "recipeIterationID")]
    pub recipe_iteration_id: u64,
    #[serde(rename = "recipeStepID")]
    pub recipe_step_id: Option<u64>,
    #[serde(skip)]
    pub belongs_to_recipe_iteration: u64,
}
