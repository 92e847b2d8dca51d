mod views;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::{egui, Frame};
use eframe::emath::Align2;
use egui::{Context, WidgetText};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;
use recipes_client::{ClientConfig, LocalStorage, Store};
use recipes_common::form::{FormError, RecipeForm};
use recipes_common::{Action, Route};

#[derive(Parser, Debug)]
#[command(name = "recipes-app", about = "Recipe book")]
struct Args {
    #[arg(long, env = "RECIPES_AUTH_URL", default_value = "http://127.0.0.1:8000")]
    auth_url: String,
    #[arg(long, env = "RECIPES_DATABASE_URL", default_value = "http://127.0.0.1:8000")]
    database_url: String,
    #[arg(long, env = "RECIPES_API_KEY", default_value = "dev-api-key")]
    api_key: String,
    #[arg(long, env = "RECIPES_SESSION_PATH", default_value = "recipes-session")]
    session_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ClientConfig {
        auth_url: args.auth_url,
        database_url: args.database_url,
        api_key: args.api_key,
    };
    let runtime = Arc::new(Runtime::new()?);
    let _enter = runtime.enter();

    let mut store = Store::new(config, LocalStorage::open(&args.session_path)?);
    runtime.block_on(store.dispatch(Action::AutoLogin));
    if store.state().auth.is_authenticated() {
        store.navigate(Route::Recipes);
        runtime.block_on(store.dispatch(Action::FetchRecipes));
    }

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(900.0, 600.0)),
        ..Default::default()
    };
    let app = RecipeApp::new(runtime.clone(), store);
    eframe::run_native("Recipe Book", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("{err}"))?;
    Ok(())
}

#[derive(Default)]
pub struct AuthEntry {
    pub email: String,
    pub password: String,
    pub login_mode: bool,
}

#[derive(Default)]
pub struct IngredientEntry {
    pub name: String,
    pub amount: String,
}

/// What a view wants done once it has finished drawing.
#[derive(Default)]
pub struct Outbox {
    pub actions: Vec<Action>,
    pub route: Option<Route>,
}
impl Outbox {
    pub fn dispatch(&mut self, action: Action) {
        self.actions.push(action);
    }
    pub fn go(&mut self, route: Route) {
        self.route = Some(route);
    }
}

pub struct RecipeApp {
    runtime: Arc<Runtime>,
    store: Store,
    auth_entry: AuthEntry,
    recipe_form: RecipeForm,
    form_errors: Vec<FormError>,
    ingredient_entry: IngredientEntry,
    shown_auth_error: Option<String>,
    toasts: Toasts,
}

impl RecipeApp {
    pub fn new(runtime: Arc<Runtime>, store: Store) -> Self {
        Self {
            runtime,
            store,
            auth_entry: AuthEntry { login_mode: true, ..Default::default() },
            recipe_form: RecipeForm::new_recipe(),
            form_errors: Vec::new(),
            ingredient_entry: IngredientEntry::default(),
            shown_auth_error: None,
            toasts: Toasts::new()
                .anchor(Align2::LEFT_TOP, (10.0, 10.0))
                .direction(egui::Direction::TopDown),
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.runtime.block_on(self.store.dispatch(action));
    }

    fn go(&mut self, route: Route) {
        let landed = self.store.navigate(route);
        match landed {
            Route::RecipeNew => self.recipe_form = RecipeForm::new_recipe(),
            Route::RecipeEdit(index) => match self.store.state().recipes.recipes.get(index) {
                Some(recipe) => self.recipe_form = RecipeForm::edit(index, recipe),
                None => {
                    self.store.navigate(Route::Recipes);
                }
            },
            _ => {}
        }
        self.form_errors.clear();
    }

    fn error_toast(&mut self, error: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Error,
            text: WidgetText::from(error),
            options: ToastOptions::default()
                .duration_in_seconds(3.0)
                .show_progress(true)
                .show_icon(true),
        });
    }

    fn apply(&mut self, outbox: Outbox) {
        for action in outbox.actions {
            self.dispatch(action);
        }
        if let Some(route) = outbox.route {
            self.go(route);
        }
    }
}

impl eframe::App for RecipeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        if self.runtime.block_on(self.store.process_scheduled()) > 0 {
            tracing::info!("session expired");
        }
        let auth_error = self.store.state().auth.auth_error.clone();
        if auth_error.is_some() && auth_error != self.shown_auth_error {
            if let Some(error) = auth_error.clone() {
                self.error_toast(error);
            }
        }
        self.shown_auth_error = auth_error;

        let mut outbox = Outbox::default();
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            views::navigation(ui, self.store.state(), self.store.route(), &mut outbox);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.store.route() {
                Route::Auth => views::auth(ui, &mut self.auth_entry, self.store.state(), &mut outbox),
                Route::Recipes => {
                    views::recipe_list(ui, self.store.state(), None, &mut outbox);
                }
                Route::RecipeDetail(index) => {
                    ui.columns(2, |columns| {
                        views::recipe_list(&mut columns[0], self.store.state(), Some(index), &mut outbox);
                        views::recipe_detail(&mut columns[1], self.store.state(), index, &mut outbox);
                    });
                }
                Route::RecipeNew | Route::RecipeEdit(_) => {
                    views::recipe_edit(ui, &mut self.recipe_form, &mut self.form_errors, &mut outbox);
                }
                Route::ShoppingList => {
                    views::shopping_list(ui, &mut self.ingredient_entry, self.store.state(), &mut outbox);
                }
            }
        });
        self.apply(outbox);
        self.toasts.show(ctx);
        ctx.request_repaint_after(Duration::from_secs(1));
    }
}
