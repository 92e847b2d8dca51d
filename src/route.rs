use crate::AuthState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Route {
    Auth,
    #[default]
    Recipes,
    RecipeNew,
    RecipeDetail(usize),
    RecipeEdit(usize),
    ShoppingList,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Recipes | Route::RecipeNew | Route::RecipeDetail(_) | Route::RecipeEdit(_)
        )
    }

    pub fn path(&self) -> String {
        match self {
            Route::Auth => "/auth".to_string(),
            Route::Recipes => "/recipes".to_string(),
            Route::RecipeNew => "/recipes/new".to_string(),
            Route::RecipeDetail(id) => format!("/recipes/{id}"),
            Route::RecipeEdit(id) => format!("/recipes/{id}/edit"),
            Route::ShoppingList => "/shopping-list".to_string(),
        }
    }
}

/// Returns the route navigation should actually land on.
pub fn guard(auth: &AuthState, route: Route) -> Route {
    if route.requires_auth() && !auth.is_authenticated() {
        return Route::Auth;
    }
    route
}
