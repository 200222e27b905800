use console::style;
use miette::Result;

use appbuild::listing::list_targets;
use appbuild::BuildOptions;

pub fn run(options: BuildOptions) -> Result<()> {
    let project = appbuild::open_project(&options)?;
    let listing = list_targets(&project);

    if listing.targets.is_empty() {
        println!(
            "No build targets found under {}",
            style(project.root.display()).cyan()
        );
        return Ok(());
    }

    println!(
        "{} for platform {} at release {}\n",
        style("Build targets").bold(),
        style(listing.context.platform).cyan(),
        style(listing.context.release).cyan()
    );

    let mut current_manifest = None;
    for target in &listing.targets {
        if current_manifest != Some(&target.manifest) {
            println!("  {}", style(target.manifest.display()).dim());
            current_manifest = Some(&target.manifest);
        }
        let marker = if target.selected {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!(
            "    {} {} {} → {} {}",
            marker,
            style(&target.app).bold(),
            target.action,
            target.outfile.display(),
            style(format!(
                "[{}; {}]",
                target.release_status,
                target.platforms_label()
            ))
            .dim()
        );
    }

    println!(
        "\n  {} {}",
        style("navigation:").dim(),
        if listing.navigation.is_empty() {
            "(none)".to_string()
        } else {
            listing.navigation.join(", ")
        }
    );

    Ok(())
}
