//! List command implementation

use crate::devices;

/// List all compiled-in LCD bus backends
pub fn list_devices() {
    let available = devices::available_devices();
    if available.is_empty() {
        println!("No LCD backends available (recompile with backend features enabled)");
        return;
    }

    println!("Available LCD backends:");
    println!();
    for d in &available {
        let aliases = if d.aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", d.aliases.join(", "))
        };
        println!("  {:10} - {}{}", d.name, d.description, aliases);
    }
}
