pub mod banner;
pub mod progress;
pub mod render;
pub mod tui;

/// Prints the welcome banner and applies the prompt theme. Call once at startup.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
