//! Reference data: the catalogue of instruments, ingredients and preparations recipes draw on.

use serde::{Deserialize, Serialize};

use super::Pagination;

/// A kitchen instrument (pan, whisk, oven).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidInstrument {
    pub id: u64,
    pub name: String,
    pub variant: String,
    pub description: String,
    pub icon: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidInstrumentList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub valid_instruments: Vec<ValidInstrument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrumentCreationInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub icon: String,
}

/// An ingredient together with its allergen and dietary flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredient {
    pub id: u64,
    pub name: String,
    pub variant: String,
    pub description: String,
    pub warning: String,
    pub contains_egg: bool,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_soy: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub measurable_by_volume: bool,
    pub icon: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub valid_ingredients: Vec<ValidIngredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientCreationInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub warning: String,
    pub contains_egg: bool,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_soy: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub measurable_by_volume: bool,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientTag {
    pub id: u64,
    pub name: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientTagList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub valid_ingredient_tags: Vec<ValidIngredientTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientTagCreationInput {
    pub name: String,
}

/// Attaches a tag to an ingredient. Lives under `valid_ingredients/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientTagMapping {
    pub id: u64,
    #[serde(rename = "validIngredientTagID")]
    pub valid_ingredient_tag_id: u64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_valid_ingredient: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientTagMappingList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub ingredient_tag_mappings: Vec<IngredientTagMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientTagMappingCreationInput {
    #[serde(rename = "validIngredientTagID")]
    pub valid_ingredient_tag_id: u64,
    #[serde(skip)]
    pub belongs_to_valid_ingredient: u64,
}

/// A preparation technique (dice, sear, fold).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidPreparation {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub applicable_to_all_ingredients: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidPreparationList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub valid_preparations: Vec<ValidPreparation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationCreationInput {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub applicable_to_all_ingredients: bool,
}

/// An instrument a preparation cannot be performed without.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredPreparationInstrument {
    pub id: u64,
    #[serde(rename = "instrumentID")]
    pub instrument_id: u64,
    #[serde(rename = "preparationID")]
    pub preparation_id: u64,
    pub notes: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequiredPreparationInstrumentList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub required_preparation_instruments: Vec<RequiredPreparationInstrument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredPreparationInstrumentCreationInput {
    #[serde(rename = "instrumentID")]
    pub instrument_id: u64,
    #[serde(rename = "preparationID")]
    pub preparation_id: u64,
    pub notes: String,
}

/// Records that a preparation applies to an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientPreparation {
    pub id: u64,
    pub notes: String,
    #[serde(rename = "validPreparationID")]
    pub valid_preparation_id: u64,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: u64,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientPreparationList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub valid_ingredient_preparations: Vec<ValidIngredientPreparation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientPreparationCreationInput {
    pub notes: String,
    #[serde(rename = "validPreparationID")]
    pub valid_preparation_id: u64,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn list_decodes_with_flattened_pagination() {
        let body = json!({
            "page": 2,
            "limit": 20,
            "totalCount": 21,
            "validInstruments": [{"id": 9, "name": "whisk", "createdOn": 1}]
        });

        let list: ValidInstrumentList = serde_json::from_value(body).unwrap();

        assert_eq!(list.pagination.page, 2);
        assert_eq!(list.pagination.total_count, 21);
        assert_eq!(list.valid_instruments[0].name, "whisk");
        assert_eq!(list.valid_instruments[0].archived_on, None);
    }

    #[test]
    fn tag_mapping_input_omits_parent() {
        let input = IngredientTagMappingCreationInput {
            valid_ingredient_tag_id: 4,
            belongs_to_valid_ingredient: 12,
        };

        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body, json!({"validIngredientTagID": 4}));
    }
}
