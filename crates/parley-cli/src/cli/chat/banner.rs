//! Welcome banner display for chat sessions.

use console::style;

use parley_types::wire::RequestShape;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(endpoint: &str, shape: RequestShape, restored: usize) {
    println!();
    println!("  {} {}", style("*").cyan(), style("Parley").cyan().bold());
    println!();
    println!("  {}  {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!("  {}  {}", style("Requests:").bold(), style(shape_label(shape)).dim());
    if restored > 0 {
        println!(
            "  {}  {}",
            style("Restored:").bold(),
            style(format!("{restored} messages")).dim()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

fn shape_label(shape: RequestShape) -> &'static str {
    match shape {
        RequestShape::FullHistory => "full conversation",
        RequestShape::SingleTurn => "latest message only",
    }
}
