//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `duetrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("duetrack_core ping={}", duetrack_core::ping());
    println!("duetrack_core version={}", duetrack_core::core_version());
}
