//! The `certify init` command.

use anyhow::Result;

use certify_core::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    let catalog_path = std::path::Path::new("catalog.toml");
    if catalog_path.exists() {
        println!("catalog.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, EXAMPLE_CATALOG)?;
        println!("Created catalog.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to change the admin password");
    println!("  2. Run: certify validate --catalog catalog.toml");
    println!("  3. Run: certify run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# certify configuration

catalog = "catalog.toml"

# The password may also reference an environment variable, e.g.
# password = "${CERTIFY_ADMIN_PASSWORD}"
[admin]
id = "admin"
password = "admin123"
"#;

const EXAMPLE_CATALOG: &str = r#"[[courses]]
code = "CS101"
name = "Data Structures"

[[courses.questions]]
question = "Which data structure is first-in, first-out?"
options = ["Stack", "Queue", "Binary tree", "Hash map"]
answer = "B"

[[courses.questions]]
question = "What is the worst-case lookup time of a balanced binary search tree?"
options = ["O(1)", "O(n)", "O(log n)", "O(n log n)"]
answer = "C"

[[courses]]
code = "CS102"
name = "Algorithms"

[[courses.questions]]
question = "Which algorithm finds shortest paths with non-negative edge weights?"
options = ["Dijkstra", "Kruskal", "Prim", "Floyd-Warshall"]
answer = "A"

[[courses.questions]]
question = "What is the average-case time complexity of quicksort?"
options = ["O(n)", "O(n log n)", "O(n^2)", "O(log n)"]
answer = "B"
"#;
