use console::style;
use miette::Result;

use appbuild::{BuildOptions, FullBuildPlan};

pub fn run(options: BuildOptions, dry_run: bool, verbose: bool) -> Result<()> {
    let plan = appbuild::plan_build(options)?;

    println!(
        "{} Building for platform {} with release threshold {}",
        style("==>").cyan().bold(),
        style(plan.context.platform).cyan(),
        style(plan.context.release).cyan()
    );
    if !plan.navigation.is_empty() {
        println!(
            "  {} {}",
            style("navigation:").dim(),
            plan.navigation.join(", ")
        );
    }
    println!();

    if plan.render_plan.files.is_empty() {
        eprintln!(
            "{} {}",
            style("warning:").yellow().bold(),
            style("no build targets selected").yellow()
        );
    }

    if dry_run {
        print_dry_run(&plan, verbose);
    } else {
        appbuild::execute_build(plan)?;
    }

    Ok(())
}

fn print_dry_run(plan: &FullBuildPlan, verbose: bool) {
    for file in &plan.render_plan.files {
        println!(
            "  {} {} {} {}",
            style(&file.app).bold(),
            style(&file.action).green(),
            style("→").dim(),
            file.relative_path.display()
        );

        if verbose {
            println!("  {}", style("──────").dim());
            for line in file.content.lines() {
                println!("  {}", line);
            }
            println!("  {}", style("──────").dim());
            println!();
        }
    }

    println!(
        "\nSummary: {} would be written, {} skipped",
        plan.render_plan.files.len(),
        plan.skipped
    );
    println!(
        "\n{} Dry run, no files written.",
        style("\u{2139}").blue().bold()
    );
}
