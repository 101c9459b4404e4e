use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use reef_analysis::{
    parse_type_string, symbols_at_line, type_to_string, Analyzer, MethodSignature, NodeId,
    SyntaxTree, TypeDescriptor,
};

#[derive(Parser)]
#[command(
    name = "reef",
    version,
    about = "Inspect reef source files.",
    long_about = "Parse a reef source file and inspect its structural tree, \
inferred types, visible symbols, and type members."
)]
struct Cli {
    /// Path to a reef source file.
    input: PathBuf,

    /// Print the structural tree.
    #[arg(long)]
    dump_tree: bool,

    /// Print the inferred type of every binding (the default mode).
    #[arg(long)]
    types: bool,

    /// List the symbols visible at the given 1-based line.
    #[arg(long, value_name = "LINE")]
    symbols_at: Option<usize>,

    /// List the members of a type, e.g. `List<Int>` or a user-defined name.
    #[arg(long, value_name = "TYPE")]
    members: Option<String>,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let mut analyzer = Analyzer::new();
    let analysis = analyzer.analyze(&text);
    for diagnostic in analysis.diagnostics.entries() {
        eprintln!("warning: {}", diagnostic.message);
    }

    let show_types =
        cli.types || (!cli.dump_tree && cli.symbols_at.is_none() && cli.members.is_none());

    // Sorted for deterministic output.
    let types: BTreeMap<&str, &TypeDescriptor> = analysis
        .types
        .iter()
        .map(|(name, descriptor)| (name.as_str(), descriptor))
        .collect();

    if cli.json {
        let mut report = serde_json::Map::new();
        if cli.dump_tree {
            report.insert("tree".into(), tree_to_json(&analysis.tree, analysis.tree.root()));
        }
        if show_types {
            let rendered: BTreeMap<&str, String> = types
                .iter()
                .map(|(name, descriptor)| (*name, type_to_string(descriptor)))
                .collect();
            report.insert("types".into(), json!(rendered));
        }
        if let Some(line) = cli.symbols_at {
            report.insert(
                "symbols".into(),
                json!(symbols_at_line(&analysis.tree, line)),
            );
        }
        if let Some(type_source) = &cli.members {
            let descriptor = parse_type_string(type_source);
            report.insert(
                "methods".into(),
                json!(analyzer.registry().methods_for_type(&descriptor)),
            );
            report.insert(
                "fields".into(),
                json!(analyzer.registry().fields_for_type(&descriptor)),
            );
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.dump_tree {
        print_tree(&analysis.tree, analysis.tree.root(), 0);
    }
    if show_types {
        for (name, descriptor) in &types {
            println!("{name}: {}", type_to_string(descriptor));
        }
    }
    if let Some(line) = cli.symbols_at {
        for symbol in symbols_at_line(&analysis.tree, line) {
            println!(
                "{} {} (line {})",
                symbol.category.describe(),
                symbol.name,
                symbol.declaration_line
            );
        }
    }
    if let Some(type_source) = &cli.members {
        let descriptor = parse_type_string(type_source);
        for method in analyzer.registry().methods_for_type(&descriptor) {
            println!("{}", describe_method(&method));
        }
        for field in analyzer.registry().fields_for_type(&descriptor) {
            let binding = if field.mutable { "var" } else { "val" };
            println!("{binding} {}: {}", field.name, type_to_string(&field.ty));
        }
    }

    Ok(())
}

fn describe_method(method: &MethodSignature) -> String {
    let parameters = method
        .parameters
        .iter()
        .map(|parameter| format!("{}: {}", parameter.name, type_to_string(&parameter.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}({parameters}): {}",
        method.name,
        type_to_string(&method.return_type)
    )
}

fn print_tree(tree: &SyntaxTree, id: NodeId, indent: usize) {
    let node = tree.node(id);
    let name = if node.name.is_empty() {
        "<document>"
    } else {
        node.name.as_str()
    };
    println!(
        "{:indent$}{} {} [{}..{}]",
        "",
        node.kind.describe(),
        name,
        node.span.start,
        node.span.end,
        indent = indent * 2
    );
    for &child in &node.children {
        print_tree(tree, child, indent + 1);
    }
}

fn tree_to_json(tree: &SyntaxTree, id: NodeId) -> serde_json::Value {
    let node = tree.node(id);
    json!({
        "kind": node.kind.describe(),
        "name": node.name,
        "span": { "start": node.span.start, "end": node.span.end },
        "children": node
            .children
            .iter()
            .map(|&child| tree_to_json(tree, child))
            .collect::<Vec<_>>(),
    })
}
