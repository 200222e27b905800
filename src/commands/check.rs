use console::style;
use miette::Result;

use appbuild::check::check_project;
use appbuild::BuildOptions;

pub fn run(options: BuildOptions) -> Result<()> {
    let root = &options.root;

    println!(
        "{} {}",
        style("Checking project at").bold(),
        style(root.display()).cyan()
    );

    let result = check_project(root)?;

    println!("  Manifests: {}", result.manifest_count);
    println!("  Targets: {}", result.target_count);

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &result.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    if !result.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &result.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!(
            "\n{} Project has {} error(s)",
            style("✗").red().bold(),
            result.errors.len()
        );
        std::process::exit(1);
    } else {
        println!("\n{} Project is valid!", style("✓").green().bold());
    }

    Ok(())
}
