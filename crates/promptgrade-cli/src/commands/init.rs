//! The `promptgrade init` command.

use anyhow::Result;

use promptgrade_core::parser::to_toml_string;
use promptgrade_core::seed::reference_set;

pub fn execute() -> Result<()> {
    // Create promptgrade.toml
    if std::path::Path::new("promptgrade.toml").exists() {
        println!("promptgrade.toml already exists, skipping.");
    } else {
        std::fs::write("promptgrade.toml", SAMPLE_CONFIG)?;
        println!("Created promptgrade.toml");
    }

    // Create example eval set from the built-in prompts
    std::fs::create_dir_all("eval-sets")?;
    let example_path = std::path::Path::new("eval-sets/example.toml");
    if example_path.exists() {
        println!("eval-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, to_toml_string(&reference_set())?)?;
        println!("Created eval-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit eval-sets/example.toml with your own prompts");
    println!("  2. Run: promptgrade validate --eval-set eval-sets/example.toml");
    println!("  3. Run: promptgrade session --eval-set eval-sets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# promptgrade configuration

# How long copy notifications stay visible, in milliseconds.
notice_duration_ms = 2000

# Print notifications to stderr.
echo_notifications = true

# Item list to grade instead of the built-in prompts.
# eval_set = "eval-sets/example.toml"

[clipboard]
# "system" picks pbcopy, wl-copy, xclip or clip.exe automatically.
type = "system"

# To use a specific program instead:
# type = "command"
# program = "xclip"
# args = ["-selection", "clipboard"]
# timeout_ms = 5000
"#;
