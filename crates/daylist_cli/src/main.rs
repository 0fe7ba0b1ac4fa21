//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daylist_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("daylist_core ping={}", daylist_core::ping());
    println!("daylist_core version={}", daylist_core::core_version());
    println!(
        "daylist_core schema_version={}",
        daylist_core::db::migrations::latest_version()
    );
}
