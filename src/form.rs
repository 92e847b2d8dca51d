//! Recipe editor form: raw text fields plus validation into a [`Recipe`].

use thiserror::Error;
use crate::{Action, Ingredient, Recipe};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("ingredient {index}: name is required")]
    IngredientName { index: usize },
    #[error("ingredient {index}: amount must be a positive whole number")]
    IngredientAmount { index: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngredientForm {
    pub name: String,
    pub amount: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeForm {
    /// Index of the recipe being edited; `None` when creating a new one.
    pub index: Option<usize>,
    pub name: String,
    pub image_path: String,
    pub description: String,
    pub ingredients: Vec<IngredientForm>,
}

impl RecipeForm {
    pub fn new_recipe() -> Self {
        Self::default()
    }

    pub fn edit(index: usize, recipe: &Recipe) -> Self {
        Self {
            index: Some(index),
            name: recipe.name.clone(),
            image_path: recipe.image_path.clone(),
            description: recipe.description.clone(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| IngredientForm { name: i.name.clone(), amount: i.amount.to_string() })
                .collect(),
        }
    }

    pub fn edit_mode(&self) -> bool {
        self.index.is_some()
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(IngredientForm::default());
    }

    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    pub fn validate(&self) -> Result<Recipe, Vec<FormError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FormError::Required("name"));
        }
        if self.image_path.trim().is_empty() {
            errors.push(FormError::Required("image path"));
        }
        if self.description.trim().is_empty() {
            errors.push(FormError::Required("description"));
        }
        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for (index, ingredient) in self.ingredients.iter().enumerate() {
            let name = ingredient.name.trim();
            if name.is_empty() {
                errors.push(FormError::IngredientName { index });
            }
            match parse_amount(&ingredient.amount) {
                Some(amount) => ingredients.push(Ingredient::new(name, amount)),
                None => errors.push(FormError::IngredientAmount { index }),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Recipe::new(self.name.trim(), self.description.trim(), self.image_path.trim(), ingredients))
    }

    /// Validates and builds the action that saves this form.
    pub fn submit(&self) -> Result<Action, Vec<FormError>> {
        let recipe = self.validate()?;
        Ok(match self.index {
            Some(index) => Action::UpdateRecipe { index, recipe },
            None => Action::AddRecipe(recipe),
        })
    }
}

/// Accepts `^[1-9][0-9]*$` that fits in a `u32`.
pub fn parse_amount(text: &str) -> Option<u32> {
    let text = text.trim();
    let mut chars = text.chars();
    match chars.next() {
        Some('1'..='9') => {}
        _ => return None,
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
