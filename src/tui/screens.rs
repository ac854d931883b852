use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{AppContext, RecipeState, StoreCommand, Tab};
use crate::models::api::Recipe;

fn move_selection(selected: usize, len: usize, key: KeyCode) -> usize {
    match key {
        KeyCode::Up => selected.saturating_sub(1),
        KeyCode::Down => (selected + 1).min(len.saturating_sub(1)),
        _ => selected,
    }
}

/// Highlight the selected line; the index is clamped since lists shrink after refreshes
fn highlight<'a>(lines: Vec<Line<'a>>, selected: usize) -> Vec<Line<'a>> {
    let selected = selected.min(lines.len().saturating_sub(1));
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == selected {
                line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                line
            }
        })
        .collect()
}

fn recipe_line(recipe: &Recipe) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            recipe.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} · {} servings · {} cal",
            recipe.cook_time, recipe.servings, recipe.nutrition.calories
        )),
    ])
}

pub(crate) struct RecipeSearch {
    selected: usize,
    dirty: bool, // Query edited since the last search
}

impl RecipeSearch {
    /// A query typed but not yet searched stays pending across tab switches
    pub fn new(context: &AppContext) -> Self {
        let searched = context.searched.as_deref().unwrap_or_default();
        Self {
            selected: 0,
            dirty: context.query != searched,
        }
    }
}

impl RecipeState for RecipeSearch {
    fn render(&self, context: &AppContext, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let input = Paragraph::new(context.query.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search for a recipe (Enter to search)"),
        );
        frame.render_widget(input, chunks[0]);

        let title = match &context.searched {
            Some(query) => format!("Results for \"{}\"", query),
            None => "Popular recipes".to_string(),
        };

        let results = if context.results.is_empty() {
            Paragraph::new(
                "No recipes found. Search for any dish like \"cheeseburger\" or \"pizza\".",
            )
        } else {
            Paragraph::new(highlight(
                context.results.iter().map(recipe_line).collect(),
                self.selected,
            ))
        };
        frame.render_widget(
            results.block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        );
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char(c) => {
                context.query.push(c);
                self.dirty = true;
                None
            }
            KeyCode::Backspace => {
                context.query.pop();
                self.dirty = true;
                None
            }
            KeyCode::Up | KeyCode::Down => {
                self.selected = move_selection(self.selected, context.results.len(), key);
                None
            }
            KeyCode::Enter if self.dirty => {
                self.dirty = false;
                self.selected = 0;
                let query = context.query.trim();

                // Clearing the query goes back to the popular list
                if query.is_empty() {
                    context.searched = None;
                    context.results = context.catalog.popular().to_vec();
                } else {
                    context.results = context.catalog.search(query);
                    context.searched = Some(query.to_string());
                }
                None
            }
            KeyCode::Enter => {
                let recipe = context
                    .results
                    .get(self.selected.min(context.results.len().saturating_sub(1)))?;
                Some(Box::new(RecipeDetail::new(recipe.clone(), Tab::Search)))
            }
            KeyCode::Esc => {
                context.exit = true;
                None
            }
            _ => None,
        }
    }

    fn help(&self) -> &'static str {
        "Type to search · Enter search/open · ↑↓ select · Tab switch · Esc quit"
    }
}

pub(crate) struct SavedRecipes {
    selected: usize,
}

impl SavedRecipes {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    fn current<'a>(&self, context: &'a AppContext) -> Option<&'a Recipe> {
        let len = context.saved_recipes.len();
        context.saved_recipes.get(self.selected.min(len.saturating_sub(1)))
    }
}

impl RecipeState for SavedRecipes {
    fn render(&self, context: &AppContext, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Saved recipes ({})",
            context.saved_recipes.len()
        ));

        let list = if context.saved_recipes.is_empty() {
            Paragraph::new("No saved recipes yet. Press f on a recipe to save it.")
        } else {
            Paragraph::new(highlight(
                context.saved_recipes.iter().map(recipe_line).collect(),
                self.selected,
            ))
        };
        frame.render_widget(list.block(block), area);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Up | KeyCode::Down => {
                self.selected = move_selection(self.selected, context.saved_recipes.len(), key);
                None
            }
            KeyCode::Enter => {
                let recipe = self.current(context)?;
                Some(Box::new(RecipeDetail::new(recipe.clone(), Tab::Saved)))
            }
            KeyCode::Char('d') => {
                let recipe_id = self.current(context)?.id.clone();
                context.command = Some(StoreCommand::RemoveRecipe(recipe_id));
                None
            }
            KeyCode::Esc => {
                context.exit = true;
                None
            }
            _ => None,
        }
    }

    fn help(&self) -> &'static str {
        "Enter open · d remove · ↑↓ select · Tab switch · Esc quit"
    }
}

pub(crate) struct ShoppingList {
    selected: usize,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl RecipeState for ShoppingList {
    fn render(&self, context: &AppContext, frame: &mut Frame, area: Rect) {
        let remaining = context
            .shopping_list
            .iter()
            .filter(|item| !item.checked)
            .count();
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Shopping list ({} of {} left)",
            remaining,
            context.shopping_list.len()
        ));

        let list = if context.shopping_list.is_empty() {
            Paragraph::new("Your shopping list is empty. Press a on a recipe to add its ingredients.")
        } else {
            let lines = context
                .shopping_list
                .iter()
                .map(|item| {
                    if item.checked {
                        Line::styled(
                            format!("[x] {}", item),
                            Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM),
                        )
                    } else {
                        Line::raw(format!("[ ] {}", item))
                    }
                })
                .collect();
            Paragraph::new(highlight(lines, self.selected))
        };
        frame.render_widget(list.block(block), area);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>> {
        let len = context.shopping_list.len();
        match key {
            KeyCode::Up | KeyCode::Down => {
                self.selected = move_selection(self.selected, len, key);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter if len > 0 => {
                let index = self.selected.min(len - 1);
                context.command = Some(StoreCommand::ToggleShoppingItem(index));
                None
            }
            KeyCode::Char('c') if len > 0 => Some(Box::new(ConfirmClear)),
            KeyCode::Esc => {
                context.exit = true;
                None
            }
            _ => None,
        }
    }

    fn help(&self) -> &'static str {
        "Space toggle · c clear · ↑↓ select · Tab switch · Esc quit"
    }
}

pub(crate) struct ConfirmClear;

impl RecipeState for ConfirmClear {
    fn render(&self, _context: &AppContext, frame: &mut Frame, area: Rect) {
        let message = "Are you sure you want to clear your shopping list?\n\n(Y)es / (N)o";

        let block = Paragraph::new(message).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Clear Shopping List"),
        );
        frame.render_widget(block, area);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                context.command = Some(StoreCommand::ClearShoppingList);
                Some(Box::new(ShoppingList::new()))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Some(Box::new(ShoppingList::new()))
            }
            _ => None, // Ignore other keys
        }
    }

    fn help(&self) -> &'static str {
        "y clear · n cancel"
    }
}

pub(crate) struct RecipeDetail {
    recipe: Recipe,
    servings: u32,
    scroll: u16,
    back_to: Tab,
}

impl RecipeDetail {
    pub fn new(recipe: Recipe, back_to: Tab) -> Self {
        Self {
            servings: recipe.servings.max(1),
            recipe,
            scroll: 0,
            back_to,
        }
    }
}

impl RecipeState for RecipeDetail {
    fn render(&self, context: &AppContext, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title and servings
                Constraint::Length(3), // Nutrition
                Constraint::Min(1),    // Ingredients and instructions
            ])
            .split(area);

        let favorite = if context.is_saved(&self.recipe.id) {
            "♥ Saved"
        } else {
            "♡ Not saved"
        };
        let header = Paragraph::new(vec![
            Line::styled(
                self.recipe.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(format!(
                "{} · {} servings · {}",
                self.recipe.cook_time, self.servings, favorite
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let nutrition = self.recipe.nutrition;
        let facts = Paragraph::new(format!(
            "{} calories · {}g protein · {}g carbs · {}g fat",
            nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
        ))
        .block(Block::default().borders(Borders::ALL).title("Nutrition Info"));
        frame.render_widget(facts, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        let ingredient_lines: Vec<Line> = self
            .recipe
            .scaled_ingredients(self.servings)
            .into_iter()
            .map(|ingredient| {
                Line::from(vec![
                    Span::raw(ingredient.name),
                    Span::raw(" "),
                    Span::styled(
                        ingredient.quantity,
                        Style::default().add_modifier(Modifier::ITALIC),
                    ),
                ])
            })
            .collect();
        let ingredients = Paragraph::new(ingredient_lines)
            .block(Block::default().borders(Borders::ALL).title("Ingredients"));
        frame.render_widget(ingredients, body[0]);

        // Render numbered instructions
        let instructions_text: String = self
            .recipe
            .instructions
            .iter()
            .map(|instruction| format!("{}. {}", instruction.step, instruction.text))
            .collect::<Vec<_>>()
            .join("\n");
        let instructions = Paragraph::new(instructions_text)
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Instructions"));
        frame.render_widget(instructions, body[1]);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        context: &mut AppContext,
    ) -> Option<Box<dyn RecipeState>> {
        match key {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                self.servings = self.servings.saturating_add(1);
                None
            }
            KeyCode::Char('-') | KeyCode::Left => {
                if self.servings > 1 {
                    self.servings -= 1;
                }
                None
            }
            KeyCode::Char('f') => {
                context.command = Some(if context.is_saved(&self.recipe.id) {
                    StoreCommand::RemoveRecipe(self.recipe.id.clone())
                } else {
                    StoreCommand::SaveRecipe(self.recipe.clone())
                });
                None
            }
            KeyCode::Char('a') => {
                context.command = Some(StoreCommand::AddToShoppingList {
                    ingredients: self.recipe.scaled_ingredients(self.servings),
                    recipe_title: self.recipe.title.clone(),
                });
                None
            }
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            KeyCode::Esc => Some(self.back_to.screen(context)),
            _ => None,
        }
    }

    fn help(&self) -> &'static str {
        "+/- servings · f favorite · a add to shopping list · ↑↓ scroll · Esc back"
    }
}
