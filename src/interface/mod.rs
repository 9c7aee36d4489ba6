pub mod prompts;
pub mod render;

pub use prompts::{MenuAction, prompt_crowd_type, prompt_menu_action, prompt_preferences};
pub use render::{
    display_history, display_item_list, display_justification, display_loading,
    display_no_eligible, display_preferences, display_settled, display_welcome, follow_spin,
};
