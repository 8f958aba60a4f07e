use console::style;

pub fn print_banner(version: &str) {
    println!();
    println!(
        "  {}  {} {}",
        style("📚").cyan(),
        style("docgen").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("  {} {}", style("✓").green(), message);
}

pub fn print_warning(message: &str) {
    println!("  {} {}", style("!").yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("  {} {}", style("✗").red(), message);
}

pub fn print_stat(label: &str, value: impl std::fmt::Display) {
    println!("  {:<18}{}", format!("{}:", label), value);
}
