use dialoguer::{Confirm, MultiSelect, Select};

use crate::catalog::Catalog;
use crate::engine::EngineSnapshot;
use crate::error::Result;
use crate::models::{CrowdType, Preferences};

/// Top-level menu entries of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Pick,
    Preferences,
    CrowdType,
    History,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::Pick,
        MenuAction::Preferences,
        MenuAction::CrowdType,
        MenuAction::History,
        MenuAction::Quit,
    ];

    fn label(self, snapshot: &EngineSnapshot) -> String {
        match self {
            MenuAction::Pick if snapshot.justification_pending => format!(
                "🎲 Pick again ({} eligible, note still cooking)",
                snapshot.eligible_count
            ),
            MenuAction::Pick => format!("🎲 Pick for me ({} eligible)", snapshot.eligible_count),
            MenuAction::Preferences => "⚙️  Preferences".to_string(),
            MenuAction::CrowdType => format!(
                "🏃 Crowd type ({})",
                snapshot.crowd.map(|c| c.as_str()).unwrap_or("anyone")
            ),
            MenuAction::History => format!("📜 Recent picks ({})", snapshot.history.len()),
            MenuAction::Quit => "👋 Quit".to_string(),
        }
    }
}

/// Prompt for the next session action.
pub fn prompt_menu_action(snapshot: &EngineSnapshot) -> Result<MenuAction> {
    let labels: Vec<String> = MenuAction::ALL.iter().map(|a| a.label(snapshot)).collect();

    let selection = Select::new()
        .with_prompt("What now?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(MenuAction::ALL
        .get(selection)
        .copied()
        .unwrap_or(MenuAction::Quit))
}

/// Prompt for vegetarian-only and excluded tags.
pub fn prompt_preferences(catalog: &Catalog, current: &Preferences) -> Result<Preferences> {
    let only_vegetarian = Confirm::new()
        .with_prompt("Vegetarian only? 🥗")
        .default(current.only_vegetarian)
        .interact()?;

    let tags = catalog.tag_vocabulary();
    let labels: Vec<String> = tags
        .iter()
        .map(|t| format!("{} ({})", catalog.label_for(t), t))
        .collect();
    let checked: Vec<bool> = tags.iter().map(|t| current.is_excluded(t)).collect();

    let selected = MultiSelect::new()
        .with_prompt("Exclude what you don't like (space to toggle, enter to confirm)")
        .items(&labels)
        .defaults(&checked)
        .interact()?;

    Ok(Preferences {
        only_vegetarian,
        excluded_tags: selected
            .into_iter()
            .filter_map(|i| tags.get(i).map(|t| t.to_string()))
            .collect(),
    })
}

/// Prompt for the crowd type. `None` means no restriction.
pub fn prompt_crowd_type(current: Option<CrowdType>) -> Result<Option<CrowdType>> {
    let mut options = vec!["anyone".to_string()];
    options.extend(
        CrowdType::ALL
            .iter()
            .map(|c| format!("{} ({})", c.as_str(), c.label())),
    );

    let default = current
        .and_then(|c| CrowdType::ALL.iter().position(|x| *x == c))
        .map(|i| i + 1)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Who is eating?")
        .items(&options)
        .default(default)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .and_then(|i| CrowdType::ALL.get(i).copied()))
}
