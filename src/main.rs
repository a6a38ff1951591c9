use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

use yamlkit::config::Config;
use yamlkit::file::loader::{load_yaml_file, load_yaml_from_stdin};
use yamlkit::file::saver::save_yaml_file;
use yamlkit::YamlNode;

/// yamlkit - query and edit YAML documents by dot path
#[derive(Parser)]
#[command(name = "yamlkit")]
#[command(version)]
#[command(about = "Query and edit YAML documents by dot path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at PATH (the whole document if omitted)
    Get {
        /// YAML file, or `-` for stdin
        file: String,
        /// Dot path such as `servers.0.host`
        path: Option<String>,
        /// Print the value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the value at PATH, creating missing containers
    Set {
        /// YAML file, or `-` to read stdin and print the result
        file: String,
        path: String,
        /// Parsed as YAML, so `8080` is a number and `[a, b]` a sequence
        value: String,
    },
    /// Delete the entry at PATH
    Delete {
        /// YAML file, or `-` to read stdin and print the result
        file: String,
        path: String,
    },
    /// List the keys of the mapping at PATH
    Keys {
        file: String,
        path: Option<String>,
    },
    /// Convert a YAML document to JSON
    ToJson { file: String },
    /// Convert a JSON document to YAML
    FromJson { file: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yamlkit=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Command::Get { file, path, json } => {
            let doc = load(&file)?;
            let node = select(&doc, path.as_deref());
            if json {
                print_json(&node, &config)?;
            } else if node.is_object() || node.is_array() {
                print!("{}", node.to_yaml_string()?);
            } else {
                println!("{}", node.as_string());
            }
        }
        Command::Set { file, path, value } => {
            let doc = load(&file)?;
            let value = YamlNode::parse(&value).unwrap_or_else(|_| YamlNode::new(value));
            doc.set_path(&path, value)
                .with_context(|| format!("Failed to set '{}'", path))?;
            store(&file, &doc, &config)?;
        }
        Command::Delete { file, path } => {
            let doc = load(&file)?;
            doc.delete_path(&path)
                .with_context(|| format!("Failed to delete '{}'", path))?;
            store(&file, &doc, &config)?;
        }
        Command::Keys { file, path } => {
            let doc = load(&file)?;
            for key in select(&doc, path.as_deref()).keys() {
                println!("{}", key);
            }
        }
        Command::ToJson { file } => {
            let doc = load(&file)?;
            print_json(&doc, &config)?;
        }
        Command::FromJson { file } => {
            let text = if file == "-" {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read from stdin")?;
                buffer
            } else {
                std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file))?
            };
            let json: serde_json::Value =
                serde_json::from_str(&text).context("Failed to parse JSON")?;
            let doc = YamlNode::from_json(&json)?;
            print!("{}", doc.to_yaml_string()?);
        }
    }

    Ok(())
}

fn load(file: &str) -> Result<YamlNode> {
    let doc = if file == "-" {
        load_yaml_from_stdin()?
    } else {
        load_yaml_file(file)?
    };
    Ok(doc)
}

fn select(doc: &YamlNode, path: Option<&str>) -> YamlNode {
    match path {
        Some(path) => doc.path(path),
        None => doc.clone(),
    }
}

/// Writes back to the file, or prints to stdout when the input was stdin.
fn store(file: &str, doc: &YamlNode, config: &Config) -> Result<()> {
    if file == "-" {
        print!("{}", doc.to_yaml_string()?);
    } else {
        save_yaml_file(file, doc, config).with_context(|| format!("Failed to save {}", file))?;
    }
    Ok(())
}

fn print_json(node: &YamlNode, config: &Config) -> Result<()> {
    let json = node.to_json()?;
    let text = if config.json_pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    println!("{}", text);
    Ok(())
}
