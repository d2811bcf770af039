pub mod progress_bar;
pub mod settings_item;
