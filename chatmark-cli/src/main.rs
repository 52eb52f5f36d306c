// Command-line interface for chatmark
//
// The binary reads one input file and converts it in one of three
// directions:
//
//  chatmark <input> --to html      - parse markdown and render HTML
//  chatmark <input> --to ast       - parse markdown and dump the AST as JSON
//  chatmark <input> --to markdown  - rewrite an HTML fragment as chat markdown
//
// Parsing uses the dialect named in the configuration file, overridable per
// invocation with --dialect. Output goes to stdout unless -o is given.

use chatmark::{markup_to_markdown, parse, render, MarkdownTemplates, RenderCapabilities};
use chatmark_config::{ChatmarkConfig, Loader};
use clap::{Arg, Command, ValueHint};
use std::fs;

fn build_cli() -> Command {
    Command::new("chatmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting chat markdown, HTML and AST dumps")
        .long_about(
            "chatmark converts between chat markdown, HTML and a JSON AST dump.\n\n\
            Targets:\n  \
            - html:     parse markdown and render an HTML fragment\n  \
            - ast:      parse markdown and print the AST as JSON\n  \
            - markdown: rewrite an HTML fragment as chat markdown\n\n\
            Examples:\n  \
            chatmark message.md --to html                 # Render to stdout\n  \
            chatmark message.md --to html --dialect chat  # Constrained chat grammar\n  \
            chatmark message.md --to ast -o tree.json     # Dump the AST to a file\n  \
            chatmark input.html --to markdown             # HTML back to markdown",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Conversion target (required)")
                .long_help(
                    "Conversion target.\n\n\
                    html and ast parse the input as markdown; markdown treats the\n\
                    input as an HTML fragment and rewrites it as chat markdown.",
                )
                .required(true)
                .value_parser(clap::builder::PossibleValuesParser::new([
                    "html", "markdown", "ast",
                ]))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("dialect")
                .long("dialect")
                .help("Grammar variant (overrides the configuration file)")
                .value_parser(clap::builder::PossibleValuesParser::new([
                    "standard", "chat",
                ]))
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (defaults to stdout)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a chatmark.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("dialect").map(|s| s.as_str()),
    );

    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = matches.get_one::<String>("to").expect("to is required");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());

    handle_convert_command(input, to, output, &config);
}

fn handle_convert_command(input: &str, to: &str, output: Option<&str>, config: &ChatmarkConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let result = match to {
        "html" => {
            let nodes = parse(&source, config.parse.dialect.into()).unwrap_or_else(|e| {
                eprintln!("Parse error: {e}");
                std::process::exit(1);
            });
            render(&nodes, &RenderCapabilities::from(&config.render))
        }
        "ast" => {
            let nodes = parse(&source, config.parse.dialect.into()).unwrap_or_else(|e| {
                eprintln!("Parse error: {e}");
                std::process::exit(1);
            });
            let mut json = serde_json::to_string_pretty(&nodes).unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            });
            json.push('\n');
            json
        }
        "markdown" => markup_to_markdown(&source, &MarkdownTemplates::from(&config.templates)),
        other => {
            eprintln!("Unknown target '{other}'. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>, dialect: Option<&str>) -> ChatmarkConfig {
    let loader = Loader::new().with_optional_file("chatmark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if let Some(dialect) = dialect {
        loader
            .set_override("parse.dialect", dialect)
            .unwrap_or_else(|err| {
                eprintln!("Failed to apply --dialect: {err}");
                std::process::exit(1);
            })
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
