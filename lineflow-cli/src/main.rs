//! Lineflow CLI
//!
//! Lays out a JSON description of inline content and prints the resulting
//! line boxes.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use lineflow_layout::layout::{LayerId, PlacedFloat, Point};
use lineflow_layout::{
    ApproximateFontMetrics, BlockFormattingContext, ContentEvent, ElementRef, InlineChild,
    InlineLayout, InlineStyle, LineBox, WhitespaceBreaker,
};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "lineflow")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Print the line box tree
    lineflow demos/paragraph.json

    # Override the containing block width
    lineflow --width 240 demos/paragraph.json

    # Dump the layout as JSON
    lineflow --json demos/paragraph.json
")]
struct Cli {
    /// Path to a JSON document describing the containers to lay out
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Containing block width, overriding the document's
    #[arg(short, long)]
    width: Option<f32>,

    /// Print the layout as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Log layout decisions (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// The input document: block containers stacked in one formatting context.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Document {
    width: f32,
    #[serde(default)]
    shrink_wrap: bool,
    /// Style of containers that do not declare their own.
    #[serde(default)]
    style: Rc<InlineStyle>,
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    style: Option<Rc<InlineStyle>>,
    content: Vec<ContentEvent>,
}

#[derive(Serialize)]
struct Report<'a> {
    height: f32,
    containers: &'a [InlineLayout],
    left_floats: &'a [PlacedFloat],
    right_floats: &'a [PlacedFloat],
    layers: &'a [LayerId],
    absolutes: &'a [(ElementRef, Point)],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let document = load_document(&cli.file)?;
    let width = cli.width.unwrap_or(document.width);

    let metrics = ApproximateFontMetrics;
    let breaker = WhitespaceBreaker::new(ApproximateFontMetrics);
    let mut bfc = BlockFormattingContext::new(width);
    let mut containers = Vec::with_capacity(document.blocks.len());
    for (index, block) in document.blocks.iter().enumerate() {
        let style = block
            .style
            .as_ref()
            .map_or_else(|| Rc::clone(&document.style), Rc::clone);
        let layout = bfc
            .layout_container(
                style,
                &block.content,
                document.shrink_wrap,
                &metrics,
                &breaker,
            )
            .with_context(|| format!("laying out block {index}"))?;
        containers.push(layout);
    }
    if let Some(stack) = bfc.pending_elements() {
        log::warn!("{} element(s) still open at the end of the document", stack.len());
    }

    // [§ 10.6.7](https://www.w3.org/TR/CSS2/visudet.html#root-height)
    // Floats hanging below the last line still extend the formatting context.
    let height = bfc.current_y.max(bfc.floats.max_float_bottom());

    if cli.json {
        let report = Report {
            height,
            containers: &containers,
            left_floats: &bfc.floats.left_floats,
            right_floats: &bfc.floats.right_floats,
            layers: bfc.blocks.attached_layers(),
            absolutes: bfc.blocks.absolute_positions(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_layout(&bfc, &containers, width, height);
    }

    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Print the line box tree of every container.
fn print_layout(
    bfc: &BlockFormattingContext,
    containers: &[InlineLayout],
    width: f32,
    height: f32,
) {
    println!(
        "{}",
        format!("=== Line Boxes (width: {width}, height: {height}) ===").bold()
    );
    let mut top = 0.0;
    for (index, layout) in containers.iter().enumerate() {
        println!(
            "\n{} y={top} height={} content-width={}",
            format!("[container {index}]").cyan().bold(),
            layout.height,
            layout.content_width
        );
        for (n, line) in layout.lines.iter().enumerate() {
            print_line(n, line);
        }
        if let Some(stack) = &layout.pending_elements {
            println!("  {} {} open element(s)", "continues:".yellow(), stack.len());
        }
        top += layout.height;
    }

    let floats = bfc
        .floats
        .left_floats
        .iter()
        .chain(&bfc.floats.right_floats);
    for float in floats {
        let r = float.margin_box;
        println!(
            "{} {:?} at ({}, {}) {}x{}",
            "[float]".magenta(),
            float.side,
            r.x,
            r.y,
            r.width,
            r.height
        );
    }
    for (element, position) in bfc.blocks.absolute_positions() {
        println!(
            "{} #{} static position ({}, {})",
            "[absolute]".magenta(),
            element.0,
            position.x,
            position.y
        );
    }
}

fn print_line(n: usize, line: &LineBox) {
    let mut flags = String::new();
    if line.ended_by_forced_break {
        flags.push_str(" forced-break");
    }
    if line.contains_block_level_content {
        flags.push_str(" atomic");
    }
    println!(
        "  {} x={} y={} width={} height={}{}",
        format!("line {n}").green(),
        line.x,
        line.y,
        line.content_width,
        line.height,
        flags.dimmed()
    );
    print_children(&line.children, 2);
}

fn print_children(children: &[InlineChild], depth: usize) {
    let indent = "  ".repeat(depth);
    for child in children {
        match child {
            InlineChild::Inline(b) => {
                let continues = if b.ends_here { "" } else { " (continues)" };
                println!(
                    "{indent}{} x={} y={} width={}{}",
                    format!("<#{}>", b.element.0).blue(),
                    b.x,
                    b.y,
                    b.inline_width,
                    continues.dimmed()
                );
                print_children(&b.children, depth + 1);
            }
            InlineChild::Text(t) => {
                println!("{indent}{:?} x={} width={}", t.text(), t.x, t.width);
            }
            InlineChild::Atomic(a) => {
                let layer = a.layer.map(|LayerId(id)| format!(" layer={id}"));
                println!(
                    "{indent}{} x={} y={} {}x{}{}",
                    format!("[#{}]", a.element.0).blue(),
                    a.x,
                    a.y,
                    a.width,
                    a.height,
                    layer.unwrap_or_default()
                );
            }
        }
    }
}
