//! Colored startup output.

use std::path::Path;

use colored::Colorize;

pub fn print_banner() {
    println!();
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("║  {}  ║", format!("{:<39}", "Detection Report v0.1.0").bold().white());
    println!("║  {}  ║", format!("{:<39}", "Object detection events, newest first").dimmed());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
}

pub fn print_startup(addr: &str, db_path: &Path) {
    println!("{} {}", "✓".green().bold(), "Server ready".white().bold());
    println!("  {} {}", "→".dimmed(), format!("http://{}", addr).cyan().underline());
    println!("  {} {}", "store:".dimmed(), db_path.display().to_string().white());
    println!();
    println!("{}", "Endpoints:".white().bold());
    println!("  {} {}        {}", "GET".green(), "/".white(), "Detection table".dimmed());
    println!("  {} {}  {}", "GET".green(), "/health".white(), "Health check".dimmed());
    println!();
}
