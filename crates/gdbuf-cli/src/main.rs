//! gdbuf CLI
//!
//! Thin wrapper around the resolution engine:
//! - Build a descriptor set (`google.protobuf.FileDescriptorSet`) as JSON
//!   by shelling out to `buf build`.
//! - Resolve a descriptor set JSON into the Godot binding model consumed
//!   by the template emitter.
//!
//! All algorithmic content lives in `gdbuf-resolve`; this binary only
//! moves bytes between files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gdbuf_descriptor::FileDescriptorSet;
use std::fs;
use std::path::{Path, PathBuf};

mod buf;

#[derive(Parser)]
#[command(name = "gdbuf")]
#[command(
    author,
    version,
    about = "Protobuf descriptor sets → Godot GDExtension binding models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Buf descriptor set (`google.protobuf.FileDescriptorSet`) as JSON.
    BuildDescriptor {
        /// Buf module root (directory containing `buf.yaml`).
        root: PathBuf,
        /// Output JSON file (descriptor set).
        #[arg(short, long)]
        out: PathBuf,
        /// Exclude imports from the descriptor set.
        #[arg(long)]
        exclude_imports: bool,
        /// Exclude source info (comments + spans) from the descriptor set.
        #[arg(long)]
        exclude_source_info: bool,
    },

    /// Resolve a descriptor set JSON into a binding-model JSON.
    Resolve {
        /// Descriptor set JSON (as produced by `build-descriptor`).
        descriptor: PathBuf,
        /// Output binding-model JSON.
        #[arg(short, long)]
        out: PathBuf,
        /// Pretty-print the output model.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::BuildDescriptor {
            root,
            out,
            exclude_imports,
            exclude_source_info,
        } => {
            buf::build_descriptor_set_json(&root, &out, exclude_imports, exclude_source_info)?;
            println!("  {} {}", "→".cyan(), out.display());
            Ok(())
        }
        Commands::Resolve {
            descriptor,
            out,
            pretty,
        } => cmd_resolve(&descriptor, &out, pretty),
    }
}

fn cmd_resolve(descriptor: &Path, out: &Path, pretty: bool) -> Result<()> {
    println!(
        "{} {}",
        "Resolving descriptor set".green().bold(),
        descriptor.display()
    );

    let set = FileDescriptorSet::from_json_file(descriptor)?;
    let model = gdbuf_resolve::resolve_descriptor_set(&set)
        .with_context(|| format!("failed to resolve {}", descriptor.display()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&model)?
    } else {
        serde_json::to_string(&model)?
    };
    fs::create_dir_all(out.parent().unwrap_or(Path::new(".")))?;
    fs::write(out, &json).with_context(|| format!("failed to write {}", out.display()))?;
    println!("  {} {}", "→".cyan(), out.display());

    let messages: usize = model.files.iter().map(|f| f.messages.len()).sum();
    let enums: usize = model.files.iter().map(|f| f.enums.len()).sum();
    let fields: usize = model
        .files
        .iter()
        .flat_map(|f| &f.messages)
        .map(|m| m.fields.len())
        .sum();
    println!(
        "  stats: files={} messages={} fields={} enums={}",
        model.files.len(),
        messages,
        fields,
        enums
    );

    Ok(())
}
