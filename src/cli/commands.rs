//! Command dispatch and the interactive outline session.
//!
//! The session is the presentation collaborator of the tree engine: it owns
//! the current snapshot, routes each line command into exactly one store
//! operation, and re-renders from the result. Stale or unknown targets are
//! reported as warnings; the engine itself never fails.

use std::io::{self, BufRead};

use colored::Colorize;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{NodeId, NodePath, Snapshot, TreeArena};
use crate::layout::{LayoutParams, PositionedNode};
use crate::outline::TreeRender;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Edit {
            node_width,
            node_height,
            h_spacing,
            v_spacing,
        }) => _edit(*node_width, *node_height, *h_spacing, *v_spacing),
        Some(Commands::Config { command }) => _config(command),
        None => _edit(None, None, None, None),
    }
}

#[instrument]
fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&toml::to_string_pretty(&settings)?);
        }
        ConfigCommands::Path => match Settings::global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory found"),
        },
        ConfigCommands::Init => {
            let Some(path) = Settings::global_config_path() else {
                return Err(CliError::Usage("no home directory found".to_string()));
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, Settings::template()?)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

#[instrument]
fn _edit(
    node_width: Option<f64>,
    node_height: Option<f64>,
    h_spacing: Option<f64>,
    v_spacing: Option<f64>,
) -> CliResult<()> {
    let settings = Settings::load()?;
    let mut params = settings.layout_params();
    if let Some(width) = node_width {
        params.node_width = width;
    }
    if let Some(height) = node_height {
        params.node_height = height;
    }
    if let Some(h) = h_spacing {
        params.h_spacing = h;
    }
    if let Some(v) = v_spacing {
        params.v_spacing = v;
    }

    let mut session = Session::new(params, settings.outline.show_ids);
    output::header("rsmind outline session ('help' for commands, 'quit' to leave)");
    session.print_rows();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        output::prompt(">");
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_command(line) {
            Ok(command) => {
                debug!(?command, "session command");
                if !session.apply(command) {
                    break;
                }
            }
            Err(e) => output::error(&e),
        }
    }
    Ok(())
}

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    AddChild { id: Option<String> },
    AddSibling { path: NodePath },
    SetContent { id: String, text: String },
    Delete { id: String },
    Fold { id: String },
    Indent { path: NodePath },
    Outdent { path: NodePath },
    List,
    Tree,
    Map,
    Help,
    Quit,
}

fn parse_command(line: &str) -> CliResult<SessionCommand> {
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let rest = rest.trim();
    let arg = || {
        rest.split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| CliError::Usage(format!("{verb}: missing argument")))
    };

    match verb {
        "add" | "a" => Ok(SessionCommand::AddChild {
            id: rest.split_whitespace().next().map(str::to_string),
        }),
        "sib" | "s" => Ok(SessionCommand::AddSibling { path: arg()?.parse()? }),
        "set" | "e" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .map(|(id, text)| (id, text.trim_start()))
                .unwrap_or((rest, ""));
            if id.is_empty() {
                return Err(CliError::Usage("set: missing node id".to_string()));
            }
            Ok(SessionCommand::SetContent {
                id: id.to_string(),
                text: text.to_string(),
            })
        }
        "del" | "d" => Ok(SessionCommand::Delete { id: arg()? }),
        "fold" | "f" => Ok(SessionCommand::Fold { id: arg()? }),
        "in" | ">" => Ok(SessionCommand::Indent { path: arg()?.parse()? }),
        "out" | "<" => Ok(SessionCommand::Outdent { path: arg()?.parse()? }),
        "ls" | "list" => Ok(SessionCommand::List),
        "tree" | "t" => Ok(SessionCommand::Tree),
        "map" | "m" => Ok(SessionCommand::Map),
        "help" | "h" | "?" => Ok(SessionCommand::Help),
        "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
        _ => Err(CliError::Usage(format!(
            "unknown command: {verb} (try 'help')"
        ))),
    }
}

struct Session {
    store: TreeArena,
    snapshot: Snapshot,
    params: LayoutParams,
    show_ids: bool,
}

impl Session {
    fn new(params: LayoutParams, show_ids: bool) -> Self {
        let (store, snapshot) = TreeArena::create_tree();
        Self {
            store,
            snapshot,
            params,
            show_ids,
        }
    }

    /// Returns false when the session should end.
    fn apply(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::AddChild { id } => {
                let parent = match id {
                    Some(prefix) => self.resolve_id(&prefix),
                    None => self.store.root_id(self.snapshot),
                };
                if let Some(parent) = parent {
                    let snapshot = self.store.add_child(self.snapshot, parent);
                    self.commit(snapshot);
                }
            }
            SessionCommand::AddSibling { path } => {
                let insert = self.store.add_sibling(self.snapshot, &path);
                match insert.new_id {
                    Some(new_id) => {
                        self.commit(insert.snapshot);
                        output::focus(&new_id.short());
                    }
                    None => output::warning(&format!("no sibling slot at {path}")),
                }
            }
            SessionCommand::SetContent { id, text } => {
                if let Some(id) = self.resolve_id(&id) {
                    let snapshot = self.store.update_content(self.snapshot, id, &text);
                    self.commit(snapshot);
                }
            }
            SessionCommand::Delete { id } => {
                if let Some(id) = self.resolve_id(&id) {
                    let snapshot = self.store.delete_node(self.snapshot, id);
                    if snapshot == self.snapshot {
                        output::warning("the root cannot be deleted");
                    } else {
                        self.commit(snapshot);
                    }
                }
            }
            SessionCommand::Fold { id } => {
                if let Some(id) = self.resolve_id(&id) {
                    let snapshot = self.store.toggle_collapse(self.snapshot, id);
                    if snapshot == self.snapshot {
                        output::warning("leaves cannot be collapsed");
                    } else {
                        self.commit(snapshot);
                    }
                }
            }
            SessionCommand::Indent { path } => {
                let snapshot = self.store.indent(self.snapshot, &path);
                if snapshot == self.snapshot {
                    output::warning(&format!("cannot indent {path}"));
                } else {
                    self.commit(snapshot);
                }
            }
            SessionCommand::Outdent { path } => {
                let snapshot = self.store.outdent(self.snapshot, &path);
                if snapshot == self.snapshot {
                    output::warning(&format!("cannot outdent {path}"));
                } else {
                    self.commit(snapshot);
                }
            }
            SessionCommand::List => self.print_rows(),
            SessionCommand::Tree => println!("{}", self.store.to_tree_string(self.snapshot)),
            SessionCommand::Map => self.print_map(),
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => return false,
        }
        true
    }

    fn commit(&mut self, snapshot: Snapshot) {
        if snapshot != self.snapshot {
            self.snapshot = snapshot;
            self.store.collect_garbage(&[self.snapshot]);
        }
    }

    /// Resolves a short id prefix against the full tree, collapsed branches
    /// included. Misses and ambiguity are user feedback, not engine errors.
    fn resolve_id(&self, prefix: &str) -> Option<NodeId> {
        let prefix = prefix.to_ascii_lowercase();
        let matches: Vec<NodeId> = self
            .store
            .iter(self.snapshot)
            .map(|(_, node)| node.data.id)
            .filter(|id| id.matches_prefix(&prefix))
            .collect();
        match matches.as_slice() {
            [id] => Some(*id),
            [] => {
                output::warning(&format!("no node matches id '{prefix}'"));
                None
            }
            _ => {
                output::warning(&format!(
                    "id '{prefix}' is ambiguous ({} matches)",
                    matches.len()
                ));
                None
            }
        }
    }

    fn print_rows(&self) {
        for row in self.store.outline_rows(self.snapshot) {
            let indent = "  ".repeat(row.depth);
            let marker = if row.collapsed { " [+]" } else { "" };
            if self.show_ids {
                println!(
                    "{:>8}  {}  {}{}{}",
                    row.path.to_string(),
                    row.id.short().dimmed(),
                    indent,
                    row.content,
                    marker
                );
            } else {
                println!("{:>8}  {}{}{}", row.path.to_string(), indent, row.content, marker);
            }
        }
    }

    fn print_map(&self) {
        let Some((root, total_height)) = self.store.compute_layout(self.snapshot, &self.params)
        else {
            output::warning("layout unavailable for current snapshot");
            return;
        };
        print_positioned(&root, 0);
        output::detail(&format!("total height: {total_height:.0}"));
    }
}

fn print_positioned(node: &PositionedNode, depth: usize) {
    let coords = format!(
        "({:>5.0},{:>5.0}) {:.0}x{:.0}",
        node.x, node.y, node.width, node.height
    );
    let marker = if node.collapsed { " [+]" } else { "" };
    println!(
        "{}  {}{}{}",
        coords.dimmed(),
        "  ".repeat(depth),
        node.content,
        marker
    );
    for child in &node.children {
        print_positioned(child, depth + 1);
    }
}

fn print_help() {
    output::info("commands:");
    output::detail("add [id]        append child under id (default: root)");
    output::detail("sib <path>      insert sibling after path, focus moves to it");
    output::detail("set <id> [txt]  replace node content");
    output::detail("del <id>        delete node and subtree");
    output::detail("fold <id>       collapse/expand node");
    output::detail("in <path>       indent: node joins its preceding sibling");
    output::detail("out <path>      outdent: node becomes sibling of its parent");
    output::detail("ls              outline rows (path, id, content)");
    output::detail("tree            outline as a tree");
    output::detail("map             diagram layout with coordinates");
    output::detail("quit            leave the session");
}
