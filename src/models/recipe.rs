use crate::utils::AppError;
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

pub const INVALID_DATA: &str = "Invalid data";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";

/// Body of `POST /recipes`: the two required fields plus whatever else the
/// client sent.
///
/// Only presence of `name` and `ingredients` is checked; their values may be
/// any JSON, `null` included.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: Value,
    pub ingredients: Value,
    pub extra: Map<String, Value>,
}

impl NewRecipe {
    pub fn into_document(self) -> Result<Document, AppError> {
        let mut fields = self.extra;
        fields.insert("name".to_string(), self.name);
        fields.insert("ingredients".to_string(), self.ingredients);
        to_document(&fields)
    }
}

impl TryFrom<Value> for NewRecipe {
    type Error = AppError;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let mut fields = into_fields(body)?;

        // Both keys must be present; a null value still counts as present.
        let (Some(name), Some(ingredients)) = (fields.remove("name"), fields.remove("ingredients"))
        else {
            return Err(AppError::InvalidInput(INVALID_DATA.to_string()));
        };

        Ok(Self {
            name,
            ingredients,
            extra: fields,
        })
    }
}

/// Body of `PUT /recipes/{id}`: fields to overwrite with `$set`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub fields: Map<String, Value>,
}

impl RecipePatch {
    pub fn into_document(self) -> Result<Document, AppError> {
        to_document(&self.fields)
    }
}

impl TryFrom<Value> for RecipePatch {
    type Error = AppError;

    fn try_from(body: Value) -> Result<Self, Self::Error> {
        Ok(Self {
            fields: into_fields(body)?,
        })
    }
}

/// Renders a stored recipe as relaxed extended JSON (`_id` becomes `{"$oid": ...}`).
pub fn to_json(recipe: Document) -> Value {
    Bson::Document(recipe).into_relaxed_extjson()
}

// Client bodies never choose or change the identifier.
fn into_fields(body: Value) -> Result<Map<String, Value>, AppError> {
    match body {
        Value::Object(mut fields) => {
            fields.remove("_id");
            Ok(fields)
        }
        _ => Err(AppError::InvalidInput(INVALID_DATA.to_string())),
    }
}

fn to_document(fields: &Map<String, Value>) -> Result<Document, AppError> {
    bson::to_document(fields).map_err(|e| {
        log::debug!("Rejected recipe body: {}", e);
        AppError::InvalidInput(INVALID_DATA.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_new_recipe_requires_both_fields() {
        assert!(NewRecipe::try_from(json!({ "name": "Soup" })).is_err());
        assert!(NewRecipe::try_from(json!({ "ingredients": ["water"] })).is_err());
        assert!(NewRecipe::try_from(json!({})).is_err());

        let recipe = NewRecipe::try_from(json!({
            "name": "Soup",
            "ingredients": ["water", "salt"],
            "servings": 2
        }))
        .unwrap();
        assert_eq!(recipe.name, json!("Soup"));
        assert_eq!(recipe.ingredients, json!(["water", "salt"]));
        assert_eq!(recipe.extra.get("servings"), Some(&json!(2)));
    }

    #[test]
    fn test_required_fields_accept_any_json() {
        let recipe = NewRecipe::try_from(json!({ "name": null, "ingredients": 3 })).unwrap();
        assert_eq!(recipe.name, Value::Null);
        assert_eq!(recipe.ingredients, json!(3));

        let document = recipe.into_document().unwrap();
        assert_eq!(document.get("name"), Some(&Bson::Null));
    }

    #[test]
    fn test_non_object_bodies_are_rejected() {
        assert!(NewRecipe::try_from(json!(["name", "ingredients"])).is_err());
        assert!(RecipePatch::try_from(json!("Soup")).is_err());
        assert!(RecipePatch::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_client_id_is_discarded() {
        let recipe = NewRecipe::try_from(json!({
            "_id": "5f1d7f0b2c9a4b3d2e1f0a9b",
            "name": "Soup",
            "ingredients": []
        }))
        .unwrap();
        let document = recipe.into_document().unwrap();
        assert!(!document.contains_key("_id"));

        let patch = RecipePatch::try_from(json!({ "_id": "x" })).unwrap();
        assert!(patch.fields.is_empty());
    }

    #[test]
    fn test_to_json_renders_object_id() {
        let id = ObjectId::new();
        let rendered = to_json(doc! { "_id": id, "name": "Soup", "ingredients": ["water"] });

        assert_eq!(rendered["_id"], json!({ "$oid": id.to_hex() }));
        assert_eq!(rendered["name"], json!("Soup"));
        assert_eq!(rendered["ingredients"], json!(["water"]));
    }
}
