//! Console formatting used across all scripts

/// Print a section header
pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Print a labelled value, aligned with its siblings
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", label, value);
}

pub fn print_success(msg: &str) {
    println!("✅ {}", msg);
}

pub fn print_error(msg: &str) {
    println!("❌ {}", msg);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {}", msg);
}

pub fn print_waiting(msg: &str) {
    println!("⏳ {}", msg);
}

/// Install the env-filtered log subscriber on stderr
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
