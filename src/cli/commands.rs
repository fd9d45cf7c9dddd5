//! Command dispatch and the interactive exploration loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::domain::builder::TreeBuilder;
use crate::domain::navigator::Navigator;
use crate::domain::{ChildSlot, RiverTree, TreeResult, TributaryNode};

pub fn execute_command(cli: &Cli) -> TreeResult<()> {
    match &cli.command {
        Some(Commands::Explore { file }) => _explore(file),
        Some(Commands::Tree { file }) => _tree(file),
        Some(Commands::Headwaters { file }) => _headwaters(file),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

/// Build a tree from the record source, surfacing skipped-record
/// diagnostics as warnings.
fn build_tree(file: &Path) -> TreeResult<RiverTree> {
    let mut builder = TreeBuilder::new();
    let result = builder.build_from_csv(file);
    for skipped in builder.skipped() {
        output::warning(skipped);
    }
    result
}

#[instrument]
fn _explore(file: &Path) -> TreeResult<()> {
    debug!("file: {:?}", file);
    let tree = build_tree(file)?;
    output::success("Tree built successfully.");
    let stdin = io::stdin();
    explore_session(&tree, stdin.lock(), io::stdout())
}

#[instrument]
fn _tree(file: &Path) -> TreeResult<()> {
    debug!("file: {:?}", file);
    let tree = build_tree(file)?;
    if let Some(rendered) = tree.root().and_then(|root| tree.display_tree(root)) {
        output::info(&rendered);
    }
    output::detail(&format!("depth: {}", tree.depth()));
    Ok(())
}

#[instrument]
fn _headwaters(file: &Path) -> TreeResult<()> {
    debug!("file: {:?}", file);
    let tree = build_tree(file)?;
    for name in tree.headwaters() {
        output::info(&name);
    }
    Ok(())
}

/// Run the interactive menu loop over a tributary tree.
///
/// Generic over the line source and the output sink so sessions can be
/// scripted in tests. The loop ends on the Exit command or when the input
/// collaborator reaches end-of-file; navigation refusals and unrecognized
/// input only print a message and re-prompt.
pub fn explore_session<R: BufRead, W: Write>(
    tree: &RiverTree,
    mut input: R,
    mut out: W,
) -> TreeResult<()> {
    let mut navigator = Navigator::new(tree)?;
    let mut line = String::new();

    loop {
        writeln!(out)?;
        writeln!(out, "You are in the tributary: {}", navigator.current().data.name)?;
        write_menu(&mut out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim().parse::<u32>() {
            Ok(1) => write_node(&mut out, navigator.current())?,
            Ok(2) => report(&mut out, navigator.descend(ChildSlot::Left))?,
            Ok(3) => report(&mut out, navigator.descend(ChildSlot::Right))?,
            Ok(4) => report(&mut out, navigator.ascend())?,
            Ok(5) => {
                writeln!(out, "Exiting tree exploration. Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Options:")?;
    writeln!(out, "1. View current tributary details")?;
    writeln!(out, "2. Navigate to left child")?;
    writeln!(out, "3. Navigate to right child")?;
    writeln!(out, "4. Return to parent")?;
    writeln!(out, "5. Exit")?;
    write!(out, "Enter your choice: ")?;
    out.flush()
}

fn write_node<W: Write>(out: &mut W, node: &TributaryNode) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Tributary: {} (Flow Rate: {} cubic meters/sec)",
        node.data.name, node.data.flow_rate
    )?;
    writeln!(out, "Dams:")?;
    for dam in &node.data.dams {
        writeln!(out, "{} (Built: {})", dam.name, dam.year_built)?;
    }
    Ok(())
}

/// Print a navigation refusal; the cursor state is already unchanged.
fn report<W: Write>(out: &mut W, result: TreeResult<()>) -> io::Result<()> {
    if let Err(refusal) = result {
        writeln!(out, "{}", refusal)?;
    }
    Ok(())
}
