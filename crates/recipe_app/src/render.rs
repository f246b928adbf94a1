//! Plain-text rendering of the feed view model.
use std::fmt::Write;

use recipe_core::{CategoryView, DetailView, FeedStatus, FeedViewModel, RecipeCard, RecipeDetailView};

pub fn render(view: &FeedViewModel) -> String {
    match &view.detail {
        DetailView::Hidden => render_feed(view),
        DetailView::Loading => "Loading recipe...\n".to_string(),
        DetailView::NotFound => "Recipe not found. Type `back` to return.\n".to_string(),
        DetailView::Ready(detail) => render_detail(detail),
    }
}

pub fn render_feed(view: &FeedViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);
    if let Some(hint) = &view.search_hint {
        let _ = writeln!(out, "({hint})");
    }

    match view.status {
        FeedStatus::Idle => {
            let _ = writeln!(out, "Pick a cuisine or search.");
        }
        FeedStatus::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        FeedStatus::Error => {}
        FeedStatus::Loaded if view.recipes.is_empty() => {
            let _ = writeln!(out, "{}", view.empty_message);
        }
        FeedStatus::Loaded => {
            for card in &view.recipes {
                let _ = writeln!(out, "{}", card_line(card));
            }
            let _ = writeln!(
                out,
                "-- {} of {} --",
                view.recipes.len(),
                view.total_results
            );
            if view.is_loading_more {
                let _ = writeln!(out, "Loading more...");
            } else if view.has_more {
                let _ = writeln!(out, "Type `more` for the next page.");
            }
        }
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error} Type `retry` to try again.");
    }
    out
}

pub fn render_cuisines(categories: &[CategoryView]) -> String {
    if categories.is_empty() {
        return "No cuisines loaded.\n".to_string();
    }
    let mut out = String::new();
    for category in categories {
        let marker = if category.selected { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<12} {}", category.id, category.name);
    }
    out
}

pub fn render_favorites(favorites: &[RecipeCard]) -> String {
    if favorites.is_empty() {
        return "No favorites yet. Open a recipe and type `fav`.\n".to_string();
    }
    let mut out = String::from("== Favorites ==\n");
    for card in favorites {
        let _ = writeln!(out, "{}", card_line(card));
    }
    out
}

fn card_line(card: &RecipeCard) -> String {
    format!("{:>8}  {}", card.id(), card.title())
}

fn render_detail(detail: &RecipeDetailView) -> String {
    let recipe = &detail.recipe;
    let mut out = String::new();
    let heart = if detail.is_favorite { " [favorite]" } else { "" };
    let _ = writeln!(out, "== {}{} ==", recipe.title, heart);
    let tags = recipe.tags();
    if !tags.is_empty() {
        let _ = writeln!(out, "[{}]", tags.join("] ["));
    }
    if detail.offline {
        let _ = writeln!(out, "(saved copy)");
    }
    let _ = writeln!(
        out,
        "{} min | serves {} | health score {:.0}",
        recipe.ready_in_minutes, recipe.servings, recipe.health_score
    );

    let summary = recipe.summary_text();
    if !summary.is_empty() {
        let _ = writeln!(out, "\nSummary:\n  {summary}");
    }
    if !detail.ingredients.is_empty() {
        let _ = writeln!(out, "\nIngredients:");
        for ingredient in &detail.ingredients {
            let _ = writeln!(out, "  - {}", ingredient.original);
        }
    }
    if !detail.steps.is_empty() {
        let _ = writeln!(out, "\nInstructions:");
        for (index, step) in detail.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, step);
        }
    }
    let _ = writeln!(out, "\n`fav` toggles favorite, `back` returns.");
    out
}
