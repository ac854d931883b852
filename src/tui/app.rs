use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use super::screens::{RecipeSearch, SavedRecipes, ShoppingList};
use crate::catalog::RecipeCatalog;
use crate::models::api::{Ingredient, Recipe, ShoppingListItem};

pub enum AppAction {
    Continue,              // Keep running
    Execute(StoreCommand), // Run against storage, then refresh
    Exit,                  // Esc pressed on a tab
}

/// A storage mutation requested by a screen
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    SaveRecipe(Recipe),
    RemoveRecipe(String),
    AddToShoppingList {
        ingredients: Vec<Ingredient>,
        recipe_title: String,
    },
    ToggleShoppingItem(usize),
    ClearShoppingList,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tab {
    Search,
    Saved,
    ShoppingList,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Search, Tab::Saved, Tab::ShoppingList];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Saved => "My Recipes",
            Tab::ShoppingList => "Shopping List",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Search => 0,
            Tab::Saved => 1,
            Tab::ShoppingList => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    pub(crate) fn screen(self, context: &AppContext) -> Box<dyn RecipeState> {
        match self {
            Tab::Search => Box::new(RecipeSearch::new(context)),
            Tab::Saved => Box::new(SavedRecipes::new()),
            Tab::ShoppingList => Box::new(ShoppingList::new()),
        }
    }
}

pub struct AppContext {
    pub catalog: RecipeCatalog,
    pub query: String,
    /// Last query that was actually searched; `None` while showing popular recipes
    pub searched: Option<String>,
    pub results: Vec<Recipe>,
    pub saved_recipes: Vec<Recipe>,
    pub shopping_list: Vec<ShoppingListItem>,
    pub active_tab: Tab,
    pub status: Option<String>,
    pub command: Option<StoreCommand>, // Set by a screen, taken by the app
    pub exit: bool,
}

impl AppContext {
    pub fn new(
        catalog: RecipeCatalog,
        saved_recipes: Vec<Recipe>,
        shopping_list: Vec<ShoppingListItem>,
    ) -> Self {
        Self {
            results: catalog.popular().to_vec(),
            catalog,
            query: String::new(),
            searched: None,
            saved_recipes,
            shopping_list,
            active_tab: Tab::Search,
            status: None,
            command: None,
            exit: false,
        }
    }

    pub fn is_saved(&self, recipe_id: &str) -> bool {
        self.saved_recipes.iter().any(|recipe| recipe.id == recipe_id)
    }
}

pub(crate) trait RecipeState {
    fn render(&self, context: &AppContext, frame: &mut Frame, area: Rect);
    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>>;
    /// Key hints shown in the footer
    fn help(&self) -> &'static str;
}

pub struct RecipeApp {
    state: Box<dyn RecipeState>,
    context: AppContext,
}

impl RecipeApp {
    pub fn new(
        catalog: RecipeCatalog,
        saved_recipes: Vec<Recipe>,
        shopping_list: Vec<ShoppingListItem>,
    ) -> Self {
        let context = AppContext::new(catalog, saved_recipes, shopping_list);
        Self {
            state: Tab::Search.screen(&context),
            context,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(1),    // Screen
                Constraint::Length(1), // Status / help
            ])
            .split(frame.area());

        let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
            .select(self.context.active_tab.index())
            .block(Block::default().borders(Borders::ALL).title("Sous Chef"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        self.state.render(&self.context, frame, chunks[1]);

        let footer = match &self.context.status {
            Some(status) => Line::styled(status.as_str(), Style::default().fg(Color::Yellow)),
            None => Line::styled(self.state.help(), Style::default().add_modifier(Modifier::DIM)),
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        self.context.status = None;

        // global tab switching
        match key {
            KeyCode::Tab => {
                self.switch_tab(self.context.active_tab.next());
                return AppAction::Continue;
            }
            KeyCode::BackTab => {
                self.switch_tab(self.context.active_tab.previous());
                return AppAction::Continue;
            }
            _ => {}
        }

        // otherwise let the state handle it
        if let Some(next_state) = self.state.handle_key(key, &mut self.context) {
            self.state = next_state
        }

        if self.context.exit {
            AppAction::Exit
        } else if let Some(command) = self.context.command.take() {
            AppAction::Execute(command)
        } else {
            AppAction::Continue
        }
    }

    /// Replace the persisted collections after a store command ran
    pub fn refresh(&mut self, saved_recipes: Vec<Recipe>, shopping_list: Vec<ShoppingListItem>) {
        self.context.saved_recipes = saved_recipes;
        self.context.shopping_list = shopping_list;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.context.status = Some(status.into());
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.context.active_tab = tab;
        self.state = tab.screen(&self.context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::{catalog, cheeseburger};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::*;

    fn type_text(app: &mut RecipeApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    fn screen_text(app: &RecipeApp) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(100, 30)).expect("Failed to create test terminal");
        terminal
            .draw(|frame| app.render(frame))
            .expect("Failed to draw frame");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[fixture]
    fn app(catalog: RecipeCatalog) -> RecipeApp {
        RecipeApp::new(catalog, Vec::new(), Vec::new())
    }

    #[test]
    fn test_tab_cycles() {
        assert_eq!(Tab::Search.next(), Tab::Saved);
        assert_eq!(Tab::ShoppingList.next(), Tab::Search);
        assert_eq!(Tab::Search.previous(), Tab::ShoppingList);
    }

    #[rstest]
    fn test_starts_on_search_with_popular_recipes(app: RecipeApp) {
        let context = app.context();

        assert_eq!(context.active_tab, Tab::Search);
        assert_eq!(context.searched, None);
        assert_eq!(context.results.len(), 2);
    }

    #[rstest]
    fn test_search_runs_on_enter(mut app: RecipeApp) {
        type_text(&mut app, "chees");
        assert!(matches!(app.handle_key(KeyCode::Enter), AppAction::Continue));

        let context = app.context();
        assert_eq!(context.searched.as_deref(), Some("chees"));
        let titles: Vec<&str> = context.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Classic Cheeseburger", "Chicken Caesar Salad"]);
    }

    #[rstest]
    fn test_blank_query_does_not_search(mut app: RecipeApp) {
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.context().searched, None);
        assert_eq!(app.context().results.len(), 2);
    }

    #[rstest]
    fn test_pending_query_survives_tab_switch(mut app: RecipeApp) {
        type_text(&mut app, "pizza");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.context().active_tab, Tab::Search);

        // Enter still searches instead of opening a popular recipe
        assert!(matches!(app.handle_key(KeyCode::Enter), AppAction::Continue));
        let context = app.context();
        assert_eq!(context.searched.as_deref(), Some("pizza"));
        assert_eq!(context.results.len(), 1);
        assert!(screen_text(&app).contains("Results for \"pizza\""));
    }

    #[rstest]
    fn test_searched_query_opens_after_tab_switch(mut app: RecipeApp) {
        type_text(&mut app, "pizza");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::BackTab);

        app.handle_key(KeyCode::Enter);
        assert!(screen_text(&app).contains("Nutrition Info"));
    }

    #[rstest]
    fn test_search_without_match_shows_empty_results(mut app: RecipeApp) {
        type_text(&mut app, "lasagna");
        app.handle_key(KeyCode::Enter);

        assert!(app.context().results.is_empty());
        assert!(screen_text(&app).contains("No recipes found"));
    }

    #[rstest]
    fn test_favorite_from_detail(mut app: RecipeApp, cheeseburger: Recipe) {
        // Enter on a clean query opens the selected popular recipe
        app.handle_key(KeyCode::Enter);
        assert!(screen_text(&app).contains("Classic Cheeseburger"));

        match app.handle_key(KeyCode::Char('f')) {
            AppAction::Execute(StoreCommand::SaveRecipe(recipe)) => {
                assert_eq!(recipe.id, cheeseburger.id)
            }
            _ => panic!("Expected SaveRecipe command"),
        }

        // Once saved, f removes it
        app.refresh(vec![cheeseburger], Vec::new());
        match app.handle_key(KeyCode::Char('f')) {
            AppAction::Execute(StoreCommand::RemoveRecipe(id)) => assert_eq!(id, "1"),
            _ => panic!("Expected RemoveRecipe command"),
        }
    }

    #[rstest]
    fn test_add_scaled_ingredients_from_detail(mut app: RecipeApp) {
        app.handle_key(KeyCode::Enter);

        // 4 -> 8 servings
        for _ in 0..4 {
            app.handle_key(KeyCode::Char('+'));
        }

        match app.handle_key(KeyCode::Char('a')) {
            AppAction::Execute(StoreCommand::AddToShoppingList {
                ingredients,
                recipe_title,
            }) => {
                assert_eq!(recipe_title, "Classic Cheeseburger");
                assert_eq!(ingredients[0], Ingredient::new("Ground beef", "2 lb"));
                assert_eq!(ingredients[9], Ingredient::new("Salt and pepper", "to taste"));
            }
            _ => panic!("Expected AddToShoppingList command"),
        }
    }

    #[rstest]
    fn test_servings_never_drop_below_one(mut app: RecipeApp) {
        app.handle_key(KeyCode::Enter);

        for _ in 0..10 {
            app.handle_key(KeyCode::Char('-'));
        }

        match app.handle_key(KeyCode::Char('a')) {
            AppAction::Execute(StoreCommand::AddToShoppingList { ingredients, .. }) => {
                // 1 lb for 4 servings -> 1 serving
                assert_eq!(ingredients[0].quantity, "0.3 lb");
            }
            _ => panic!("Expected AddToShoppingList command"),
        }
        assert!(screen_text(&app).contains("1 servings"));
    }

    #[rstest]
    fn test_escape_from_detail_returns_then_exits(mut app: RecipeApp) {
        app.handle_key(KeyCode::Enter);

        assert!(matches!(app.handle_key(KeyCode::Esc), AppAction::Continue));
        assert!(matches!(app.handle_key(KeyCode::Esc), AppAction::Exit));
    }

    #[rstest]
    fn test_saved_tab_remove(mut app: RecipeApp, cheeseburger: Recipe) {
        app.refresh(vec![cheeseburger], Vec::new());
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.context().active_tab, Tab::Saved);
        assert!(screen_text(&app).contains("Classic Cheeseburger"));

        match app.handle_key(KeyCode::Char('d')) {
            AppAction::Execute(StoreCommand::RemoveRecipe(id)) => assert_eq!(id, "1"),
            _ => panic!("Expected RemoveRecipe command"),
        }
    }

    #[rstest]
    fn test_shopping_list_toggle_and_clear(mut app: RecipeApp) {
        app.refresh(
            Vec::new(),
            vec![
                ShoppingListItem::new(Ingredient::new("Salt", "1 tsp"), "Recipe A, Recipe B"),
                ShoppingListItem::new(Ingredient::new("Pepper", "1 tsp"), "Recipe B"),
            ],
        );
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.context().active_tab, Tab::ShoppingList);
        assert!(screen_text(&app).contains("Salt: 1 tsp (Recipe A, Recipe B)"));

        app.handle_key(KeyCode::Down);
        match app.handle_key(KeyCode::Char(' ')) {
            AppAction::Execute(StoreCommand::ToggleShoppingItem(index)) => assert_eq!(index, 1),
            _ => panic!("Expected ToggleShoppingItem command"),
        }

        // Declining the confirmation does nothing
        assert!(matches!(app.handle_key(KeyCode::Char('c')), AppAction::Continue));
        assert!(matches!(app.handle_key(KeyCode::Char('n')), AppAction::Continue));

        app.handle_key(KeyCode::Char('c'));
        assert!(screen_text(&app).contains("clear your shopping list"));
        assert!(matches!(
            app.handle_key(KeyCode::Char('y')),
            AppAction::Execute(StoreCommand::ClearShoppingList)
        ));
    }

    #[rstest]
    fn test_status_shows_until_next_key(mut app: RecipeApp) {
        app.set_status("Something went wrong. Please try again.");
        assert!(screen_text(&app).contains("Something went wrong"));

        app.handle_key(KeyCode::Down);
        assert_eq!(app.context().status, None);
    }
}
