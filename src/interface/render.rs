use std::io::{self, Write};

use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::engine::{EngineSnapshot, SpinState};
use crate::models::{Item, Justification};

/// Print the session banner.
pub fn display_welcome(catalog: &Catalog) {
    println!();
    println!("=== What's for lunch today? ===");
    println!("Picking your favorite meal from {} candidates ✨", catalog.len());
    println!();
}

/// Follow the spin on stdout until it settles.
///
/// Redraws one line per displayed item and returns once the engine leaves
/// `Spinning`.
pub async fn follow_spin(mut snapshots: watch::Receiver<EngineSnapshot>) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        match snapshot.state {
            SpinState::Spinning => {
                if let Some(item) = &snapshot.current_display {
                    print!("\r  {} {:<48}", item.emoji, item.name);
                    let _ = io::stdout().flush();
                }
            }
            SpinState::Settled | SpinState::Idle => {
                print!("\r{:<54}\r", "");
                let _ = io::stdout().flush();
                break;
            }
        }
    }
}

/// Print the settled item card.
pub fn display_settled(item: &Item) {
    println!();
    println!("  {}  {}", item.emoji, item.name);
    println!("     [{}]", item.category);
    println!();
}

pub fn display_loading() {
    println!("  🍲 The chef is writing you a note...");
}

pub fn display_justification(justification: &Justification) {
    println!("  \u{201c} {} \u{201d}", justification.reason);
    println!("  ✨ Mood: {}", justification.mood);
    println!();
}

pub fn display_no_eligible() {
    println!();
    println!("Your filters are too strict: no item matches. Loosen the preferences and try again.");
    println!();
}

/// Print the current preferences and how many items they leave.
pub fn display_preferences(snapshot: &EngineSnapshot, catalog: &Catalog) {
    let excluded: Vec<&str> = snapshot
        .preferences
        .excluded_tags
        .iter()
        .map(|t| catalog.label_for(t))
        .collect();

    println!();
    println!(
        "Vegetarian only: {}",
        if snapshot.preferences.only_vegetarian { "yes" } else { "no" }
    );
    println!(
        "Excluded: {}",
        if excluded.is_empty() { "(none)".to_string() } else { excluded.join(", ") }
    );
    if let Some(crowd) = snapshot.crowd {
        println!("Crowd type: {} ({})", crowd.as_str(), crowd.label());
    }
    println!("Eligible items: {}", snapshot.eligible_count);
    println!();
}

/// Print recent picks, newest first.
pub fn display_history(history: &[Item]) {
    if history.is_empty() {
        println!("No picks yet.");
        return;
    }

    println!();
    println!("=== Recent picks ===");
    for (i, item) in history.iter().enumerate() {
        println!("{:>3}. {} {}", i + 1, item.emoji, item.short_name());
    }
    println!();
}

/// Print a list of items with their tags.
pub fn display_item_list(items: &[&Item], catalog: &Catalog, title: &str) {
    if items.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, items.len());
    println!();

    let max_name_len = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(10);

    for item in items {
        let tags: Vec<&str> = item.tags.iter().map(|t| catalog.label_for(t)).collect();
        let veg = if item.is_vegetarian { " 🌱" } else { "" };
        println!(
            "  {} {:<width$}  {}{}{}",
            item.emoji,
            item.name,
            item.category,
            veg,
            if tags.is_empty() { String::new() } else { format!("  [{}]", tags.join(", ")) },
            width = max_name_len
        );
    }

    println!();
}
