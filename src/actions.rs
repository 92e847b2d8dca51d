use chrono::{DateTime, Utc};
use crate::{Ingredient, Recipe};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // auth
    LoginStart { email: String, password: String },
    SignupStart { email: String, password: String },
    AuthenticateSuccess {
        email: String,
        user_id: String,
        token: String,
        expiration_date: DateTime<Utc>,
        redirect: bool,
    },
    AuthenticateFail(String),
    ClearError,
    AutoLogin,
    Logout,

    // recipes
    FetchRecipes,
    SetRecipes(Vec<Recipe>),
    AddRecipe(Recipe),
    UpdateRecipe { index: usize, recipe: Recipe },
    DeleteRecipe(usize),
    StoreRecipes,

    // shopping list
    AddIngredient(Ingredient),
    AddIngredients(Vec<Ingredient>),
    UpdateIngredient(Ingredient),
    DeleteIngredient,
    StartEdit(usize),
    StopEdit,
}

impl Action {
    /// Stable tag used when logging dispatched actions.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Action::LoginStart { .. } => "[Auth] Login Start",
            Action::SignupStart { .. } => "[Auth] Signup Start",
            Action::AuthenticateSuccess { .. } => "[Auth] Authenticate Success",
            Action::AuthenticateFail(_) => "[Auth] Authenticate Fail",
            Action::ClearError => "[Auth] Clear Error",
            Action::AutoLogin => "[Auth] Auto Login",
            Action::Logout => "[Auth] Logout",
            Action::FetchRecipes => "[Recipes] Fetch Recipes",
            Action::SetRecipes(_) => "[Recipes] Set Recipes",
            Action::AddRecipe(_) => "[Recipes] Add Recipe",
            Action::UpdateRecipe { .. } => "[Recipes] Update Recipe",
            Action::DeleteRecipe(_) => "[Recipes] Delete Recipe",
            Action::StoreRecipes => "[Recipes] Store Recipes",
            Action::AddIngredient(_) => "[Shopping List] Add Ingredient",
            Action::AddIngredients(_) => "[Shopping List] Add Ingredients",
            Action::UpdateIngredient(_) => "[Shopping List] Update Ingredient",
            Action::DeleteIngredient => "[Shopping List] Delete Ingredient",
            Action::StartEdit(_) => "[Shopping List] Start Edit",
            Action::StopEdit => "[Shopping List] Stop Edit",
        }
    }

    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Action::LoginStart { email: email.into(), password: password.into() }
    }
    pub fn signup(email: impl Into<String>, password: impl Into<String>) -> Self {
        Action::SignupStart { email: email.into(), password: password.into() }
    }
}
