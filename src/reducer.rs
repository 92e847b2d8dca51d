//! Pure reducers. Each takes the previous slice by reference and returns a
//! new one; actions aimed at another slice return an unchanged copy.

use crate::{Action, Ingredient, Recipe, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub auth_error: Option<String>,
    pub loading: bool,
}
impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipesState {
    pub recipes: Vec<Recipe>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShoppingListState {
    pub ingredients: Vec<Ingredient>,
    pub edited_ingredient: Option<Ingredient>,
    /// `None` means nothing is being edited.
    pub edited_ingredient_index: Option<usize>,
}
impl Default for ShoppingListState {
    fn default() -> Self {
        Self {
            ingredients: vec![Ingredient::new("Apples", 5), Ingredient::new("Tomatoes", 10)],
            edited_ingredient: None,
            edited_ingredient_index: None,
        }
    }
}
impl ShoppingListState {
    fn stop_editing(mut self) -> Self {
        self.edited_ingredient = None;
        self.edited_ingredient_index = None;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthState,
    pub recipes: RecipesState,
    pub shopping_list: ShoppingListState,
}

pub fn app_reducer(state: &AppState, action: &Action) -> AppState {
    AppState {
        auth: auth_reducer(&state.auth, action),
        recipes: recipe_reducer(&state.recipes, action),
        shopping_list: shopping_list_reducer(&state.shopping_list, action),
    }
}

pub fn auth_reducer(state: &AuthState, action: &Action) -> AuthState {
    match action {
        Action::LoginStart { .. } | Action::SignupStart { .. } => AuthState {
            auth_error: None,
            loading: true,
            ..state.clone()
        },
        Action::AuthenticateSuccess { email, user_id, token, expiration_date, .. } => AuthState {
            user: Some(User::new(email.clone(), user_id.clone(), token.clone(), *expiration_date)),
            auth_error: None,
            loading: false,
        },
        Action::AuthenticateFail(message) => AuthState {
            user: None,
            auth_error: Some(message.clone()),
            loading: false,
        },
        Action::Logout => AuthState { user: None, ..state.clone() },
        Action::ClearError => AuthState { auth_error: None, ..state.clone() },
        _ => state.clone(),
    }
}

pub fn recipe_reducer(state: &RecipesState, action: &Action) -> RecipesState {
    match action {
        Action::SetRecipes(recipes) => RecipesState { recipes: recipes.clone() },
        Action::AddRecipe(recipe) => {
            let mut recipes = state.recipes.clone();
            recipes.push(recipe.clone());
            RecipesState { recipes }
        }
        Action::UpdateRecipe { index, recipe } if *index < state.recipes.len() => {
            let mut recipes = state.recipes.clone();
            recipes[*index] = recipe.clone();
            RecipesState { recipes }
        }
        Action::DeleteRecipe(index) if *index < state.recipes.len() => {
            let mut recipes = state.recipes.clone();
            recipes.remove(*index);
            RecipesState { recipes }
        }
        _ => state.clone(),
    }
}

pub fn shopping_list_reducer(state: &ShoppingListState, action: &Action) -> ShoppingListState {
    match action {
        Action::AddIngredient(ingredient) => {
            let mut next = state.clone();
            next.ingredients.push(ingredient.clone());
            next
        }
        Action::AddIngredients(ingredients) => {
            let mut next = state.clone();
            next.ingredients.extend(ingredients.iter().cloned());
            next
        }
        Action::UpdateIngredient(ingredient) => {
            let mut next = state.clone();
            if let Some(slot) = state
                .edited_ingredient_index
                .and_then(|index| next.ingredients.get_mut(index))
            {
                *slot = ingredient.clone();
            }
            next.stop_editing()
        }
        Action::DeleteIngredient => {
            let mut next = state.clone();
            if let Some(index) = state.edited_ingredient_index.filter(|i| *i < state.ingredients.len()) {
                next.ingredients.remove(index);
            }
            next.stop_editing()
        }
        Action::StartEdit(index) => match state.ingredients.get(*index) {
            Some(ingredient) => ShoppingListState {
                edited_ingredient: Some(ingredient.clone()),
                edited_ingredient_index: Some(*index),
                ..state.clone()
            },
            None => state.clone(),
        },
        Action::StopEdit => state.clone().stop_editing(),
        _ => state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn recipe(name: &str) -> Recipe {
        Recipe::new(name, "desc", "img.png", vec![Ingredient::new("Salt", 1)])
    }

    fn with_recipes(names: &[&str]) -> RecipesState {
        RecipesState { recipes: names.iter().map(|n| recipe(n)).collect() }
    }

    #[test]
    fn reducers_are_pure() {
        let state = AppState::default();
        let action = Action::AddIngredient(Ingredient::new("Milk", 2));
        let first = app_reducer(&state, &action);
        let second = app_reducer(&state, &action);
        assert_eq!(first, second);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn recipe_length_invariants() {
        let state = with_recipes(&["a", "b"]);
        assert_eq!(recipe_reducer(&state, &Action::AddRecipe(recipe("c"))).recipes.len(), 3);
        assert_eq!(recipe_reducer(&state, &Action::DeleteRecipe(0)).recipes.len(), 1);
        let updated = recipe_reducer(&state, &Action::UpdateRecipe { index: 1, recipe: recipe("z") });
        assert_eq!(updated.recipes.len(), 2);
        assert_eq!(updated.recipes[1].name, "z");
        assert_eq!(updated.recipes[0].name, "a");
    }

    #[test]
    fn delete_recipe_keeps_order() {
        let state = with_recipes(&["a", "b", "c"]);
        let next = recipe_reducer(&state, &Action::DeleteRecipe(1));
        let names: Vec<_> = next.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn out_of_range_recipe_index_is_ignored() {
        let state = with_recipes(&["a"]);
        assert_eq!(recipe_reducer(&state, &Action::DeleteRecipe(4)), state);
        assert_eq!(recipe_reducer(&state, &Action::UpdateRecipe { index: 1, recipe: recipe("x") }), state);
    }

    #[test]
    fn set_recipes_replaces_everything() {
        let state = with_recipes(&["a", "b"]);
        let next = recipe_reducer(&state, &Action::SetRecipes(vec![recipe("only")]));
        assert_eq!(next.recipes, vec![recipe("only")]);
    }

    #[test]
    fn shopping_list_starts_with_defaults() {
        let state = ShoppingListState::default();
        assert_eq!(state.ingredients, vec![Ingredient::new("Apples", 5), Ingredient::new("Tomatoes", 10)]);
        assert_eq!(state.edited_ingredient_index, None);
    }

    #[test]
    fn shopping_list_length_invariants() {
        let state = ShoppingListState::default();
        let added = shopping_list_reducer(&state, &Action::AddIngredient(Ingredient::new("Milk", 1)));
        assert_eq!(added.ingredients.len(), 3);
        let many = shopping_list_reducer(
            &state,
            &Action::AddIngredients(vec![Ingredient::new("Eggs", 6), Ingredient::new("Flour", 1)]),
        );
        assert_eq!(many.ingredients.len(), 4);

        let editing = shopping_list_reducer(&state, &Action::StartEdit(0));
        let updated = shopping_list_reducer(&editing, &Action::UpdateIngredient(Ingredient::new("Pears", 3)));
        assert_eq!(updated.ingredients.len(), 2);
        assert_eq!(updated.ingredients[0], Ingredient::new("Pears", 3));

        let editing = shopping_list_reducer(&state, &Action::StartEdit(1));
        let deleted = shopping_list_reducer(&editing, &Action::DeleteIngredient);
        assert_eq!(deleted.ingredients, vec![Ingredient::new("Apples", 5)]);
    }

    #[test]
    fn start_and_stop_edit() {
        let state = ShoppingListState::default();
        let editing = shopping_list_reducer(&state, &Action::StartEdit(1));
        assert_eq!(editing.edited_ingredient_index, Some(1));
        assert_eq!(editing.edited_ingredient, Some(Ingredient::new("Tomatoes", 10)));

        let stopped = shopping_list_reducer(&editing, &Action::StopEdit);
        assert_eq!(stopped.edited_ingredient_index, None);
        assert_eq!(stopped.edited_ingredient, None);
        assert_eq!(stopped.ingredients, state.ingredients);
    }

    #[test]
    fn update_and_delete_reset_editing() {
        let editing = shopping_list_reducer(&ShoppingListState::default(), &Action::StartEdit(0));
        let updated = shopping_list_reducer(&editing, &Action::UpdateIngredient(Ingredient::new("Kiwi", 2)));
        assert_eq!(updated.edited_ingredient_index, None);
        let deleted = shopping_list_reducer(&editing, &Action::DeleteIngredient);
        assert_eq!(deleted.edited_ingredient_index, None);
    }

    #[test]
    fn update_without_edit_leaves_list_alone() {
        let state = ShoppingListState::default();
        let updated = shopping_list_reducer(&state, &Action::UpdateIngredient(Ingredient::new("Kiwi", 2)));
        assert_eq!(updated.ingredients, state.ingredients);
        let deleted = shopping_list_reducer(&state, &Action::DeleteIngredient);
        assert_eq!(deleted.ingredients, state.ingredients);
    }

    #[test]
    fn start_edit_out_of_range_is_ignored() {
        let state = ShoppingListState::default();
        assert_eq!(shopping_list_reducer(&state, &Action::StartEdit(9)), state);
    }

    #[test]
    fn auth_lifecycle() {
        let expiry = Utc::now() + Duration::hours(1);
        let start = auth_reducer(&AuthState::default(), &Action::login("a@b.c", "pw"));
        assert!(start.loading);

        let ok = auth_reducer(
            &start,
            &Action::AuthenticateSuccess {
                email: "a@b.c".into(),
                user_id: "uid".into(),
                token: "tok".into(),
                expiration_date: expiry,
                redirect: true,
            },
        );
        assert!(!ok.loading);
        let user = ok.user.clone().unwrap();
        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.id, "uid");
        assert_eq!(user.token(), Some("tok"));

        let out = auth_reducer(&ok, &Action::Logout);
        assert!(!out.is_authenticated());
    }

    #[test]
    fn auth_failure_sets_error_until_cleared() {
        let failed = auth_reducer(&AuthState::default(), &Action::AuthenticateFail("nope".into()));
        assert_eq!(failed.auth_error.as_deref(), Some("nope"));
        assert!(failed.user.is_none());
        let cleared = auth_reducer(&failed, &Action::ClearError);
        assert_eq!(cleared.auth_error, None);
        let retried = auth_reducer(&failed, &Action::signup("a@b.c", "pw"));
        assert_eq!(retried.auth_error, None);
    }

    #[test]
    fn foreign_actions_do_not_touch_slices() {
        let state = AppState::default();
        let next = app_reducer(&state, &Action::StoreRecipes);
        assert_eq!(next, state);
    }
}
