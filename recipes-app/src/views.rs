use egui::{Color32, RichText, Ui};
use recipes_common::form::{parse_amount, FormError, RecipeForm};
use recipes_common::{Action, AppState, Ingredient, Route};
use crate::{AuthEntry, IngredientEntry, Outbox};

pub fn navigation(ui: &mut Ui, state: &AppState, route: Route, outbox: &mut Outbox) {
    ui.horizontal(|ui| {
        ui.heading("Recipe Book");
        ui.separator();
        let on_recipes = route.requires_auth();
        if state.auth.is_authenticated() && ui.selectable_label(on_recipes, "Recipes").clicked() {
            outbox.go(Route::Recipes);
        }
        if ui.selectable_label(route == Route::ShoppingList, "Shopping List").clicked() {
            outbox.go(Route::ShoppingList);
        }
        ui.separator();
        match &state.auth.user {
            Some(user) => {
                if ui.button("Save Data").clicked() {
                    outbox.dispatch(Action::StoreRecipes);
                }
                if ui.button("Fetch Data").clicked() {
                    outbox.dispatch(Action::FetchRecipes);
                }
                if ui.button("Logout").clicked() {
                    outbox.dispatch(Action::Logout);
                }
                ui.label(RichText::new(&user.email).weak());
            }
            None => {
                if ui.selectable_label(route == Route::Auth, "Authenticate").clicked() {
                    outbox.go(Route::Auth);
                }
            }
        }
        ui.separator();
        ui.label(RichText::new(route.path()).weak().monospace());
    });
}

pub fn auth(ui: &mut Ui, entry: &mut AuthEntry, state: &AppState, outbox: &mut Outbox) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(320.0);
        ui.heading(if entry.login_mode { "Login" } else { "Sign Up" });
        ui.add(egui::TextEdit::singleline(&mut entry.email).hint_text("E-Mail"));
        ui.add(egui::TextEdit::singleline(&mut entry.password).password(true).hint_text("Password"));
        let valid = entry.email.contains('@') && entry.password.len() >= 6;
        if state.auth.loading {
            ui.spinner();
        }
        ui.horizontal(|ui| {
            let label = if entry.login_mode { "Login" } else { "Sign Up" };
            if ui.add_enabled(valid, egui::Button::new(label)).clicked() {
                let email = entry.email.trim().to_string();
                let password = std::mem::take(&mut entry.password);
                outbox.dispatch(if entry.login_mode {
                    Action::login(email, password)
                } else {
                    Action::signup(email, password)
                });
            }
            let switch = if entry.login_mode { "Switch to Sign Up" } else { "Switch to Login" };
            if ui.button(switch).clicked() {
                entry.login_mode = !entry.login_mode;
            }
        });
        if let Some(error) = &state.auth.auth_error {
            ui.horizontal(|ui| {
                ui.colored_label(Color32::RED, error);
                if ui.small_button("x").clicked() {
                    outbox.dispatch(Action::ClearError);
                }
            });
        }
    });
}

pub fn recipe_list(ui: &mut Ui, state: &AppState, selected: Option<usize>, outbox: &mut Outbox) {
    if ui.button("New Recipe").clicked() {
        outbox.go(Route::RecipeNew);
    }
    ui.separator();
    let recipes = &state.recipes.recipes;
    if recipes.is_empty() {
        ui.label("No recipes yet.");
        return;
    }
    egui::ScrollArea::vertical().id_source("recipe_list").show(ui, |ui| {
        for (index, recipe) in recipes.iter().enumerate() {
            let text = RichText::new(&recipe.name).strong();
            if ui.selectable_label(selected == Some(index), text).clicked() {
                outbox.go(Route::RecipeDetail(index));
            }
            ui.label(RichText::new(&recipe.description).weak());
            ui.add_space(4.0);
        }
    });
}

pub fn recipe_detail(ui: &mut Ui, state: &AppState, index: usize, outbox: &mut Outbox) {
    let Some(recipe) = state.recipes.recipes.get(index) else {
        ui.label("Recipe not found.");
        return;
    };
    ui.heading(&recipe.name);
    ui.label(RichText::new(&recipe.image_path).monospace());
    ui.horizontal(|ui| {
        if ui.button("To Shopping List").clicked() {
            outbox.dispatch(Action::AddIngredients(recipe.ingredients.clone()));
        }
        if ui.button("Edit Recipe").clicked() {
            outbox.go(Route::RecipeEdit(index));
        }
        if ui.button("Delete Recipe").clicked() {
            outbox.dispatch(Action::DeleteRecipe(index));
            outbox.go(Route::Recipes);
        }
    });
    ui.separator();
    ui.label(&recipe.description);
    ui.separator();
    for ingredient in &recipe.ingredients {
        ui.label(format!("{} - {}", ingredient.name, ingredient.amount));
    }
}

pub fn recipe_edit(ui: &mut Ui, form: &mut RecipeForm, errors: &mut Vec<FormError>, outbox: &mut Outbox) {
    ui.heading(if form.edit_mode() { "Edit Recipe" } else { "New Recipe" });
    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            match form.submit() {
                Ok(action) => {
                    outbox.dispatch(action);
                    outbox.go(match form.index {
                        Some(index) => Route::RecipeDetail(index),
                        None => Route::Recipes,
                    });
                }
                Err(found) => *errors = found,
            }
        }
        if ui.button("Cancel").clicked() {
            outbox.go(match form.index {
                Some(index) => Route::RecipeDetail(index),
                None => Route::Recipes,
            });
        }
    });
    for error in errors.iter() {
        ui.colored_label(Color32::RED, error.to_string());
    }
    egui::Grid::new("recipe_form").num_columns(2).show(ui, |ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut form.name);
        ui.end_row();
        ui.label("Image URL");
        ui.text_edit_singleline(&mut form.image_path);
        ui.end_row();
        ui.label("Description");
        ui.text_edit_multiline(&mut form.description);
        ui.end_row();
    });
    ui.separator();
    let mut remove = None;
    for (index, ingredient) in form.ingredients.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut ingredient.name).hint_text("Name"));
            ui.add(egui::TextEdit::singleline(&mut ingredient.amount).hint_text("Amount").desired_width(60.0));
            if ui.button("X").clicked() {
                remove = Some(index);
            }
        });
    }
    if let Some(index) = remove {
        form.remove_ingredient(index);
    }
    if ui.button("Add Ingredient").clicked() {
        form.add_ingredient();
    }
}

pub fn shopping_list(ui: &mut Ui, entry: &mut IngredientEntry, state: &AppState, outbox: &mut Outbox) {
    let list = &state.shopping_list;
    let amount = parse_amount(&entry.amount);
    let valid = !entry.name.trim().is_empty() && amount.is_some();
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut entry.name).hint_text("Name"));
        ui.add(egui::TextEdit::singleline(&mut entry.amount).hint_text("Amount").desired_width(60.0));
        let editing = list.edited_ingredient_index.is_some();
        if ui.add_enabled(valid, egui::Button::new(if editing { "Update" } else { "Add" })).clicked() {
            if let Some(amount) = amount {
                let ingredient = Ingredient::new(entry.name.trim(), amount);
                outbox.dispatch(if editing {
                    Action::UpdateIngredient(ingredient)
                } else {
                    Action::AddIngredient(ingredient)
                });
                *entry = IngredientEntry::default();
            }
        }
        if editing && ui.button("Delete").clicked() {
            outbox.dispatch(Action::DeleteIngredient);
            *entry = IngredientEntry::default();
        }
        if ui.button("Clear").clicked() {
            outbox.dispatch(Action::StopEdit);
            *entry = IngredientEntry::default();
        }
    });
    ui.separator();
    egui::ScrollArea::vertical().id_source("shopping_list").show(ui, |ui| {
        for (index, ingredient) in list.ingredients.iter().enumerate() {
            let text = format!("{} ({})", ingredient.name, ingredient.amount);
            if ui.selectable_label(list.edited_ingredient_index == Some(index), text).clicked() {
                outbox.dispatch(Action::StartEdit(index));
                entry.name = ingredient.name.clone();
                entry.amount = ingredient.amount.to_string();
            }
        }
    });
}
