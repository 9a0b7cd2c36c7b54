use crate::manifest::{segments, Entry, Manifest};
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Build the directory tree the manifest describes, rooted at `destination`.
///
/// Ancestors missing from the manifest are added as directories. Unrecognized
/// entries are left out since nothing is written for them.
fn build_tree(manifest: &Manifest, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // relative path -> node
    let mut lookup: HashMap<String, Rc<RefCell<TreeNode>>> = HashMap::new();

    for (relative, entry) in manifest.entries() {
        if matches!(entry, Entry::Unrecognized { .. }) {
            log::debug!("leaving unrecognized entry out of preview: {}", relative);
            continue;
        }

        let parts: Vec<&str> = segments(relative).collect();
        let mut parent = Rc::clone(&root);
        let mut key = String::new();

        for (index, segment) in parts.iter().enumerate() {
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(segment);

            let is_leaf = index == parts.len() - 1;

            let node = match lookup.get(&key) {
                Some(node) => Rc::clone(node),
                None => {
                    let is_file = is_leaf && entry.is_file();
                    let node = Rc::new(RefCell::new(TreeNode::new(segment.to_string(), is_file)));

                    parent.borrow_mut().children.push(Rc::clone(&node));
                    lookup.insert(key.clone(), Rc::clone(&node));

                    node
                }
            };

            parent = node;
        }
    }

    root
}

/// Render the tree with a nice ASCII style, one line per node.
fn render_tree(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
    let node_borrow = node.borrow();

    let connector = if is_last { "└── " } else { "├── " };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    lines.push(format!("{}{}{}", prefix.yellow(), connector.yellow(), name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        render_tree(child, &child_prefix, last, lines);
    }
}

/// Lines of the tree preview for `manifest` materialized under `destination`.
pub fn tree_lines(manifest: &Manifest, destination: &Path) -> Vec<String> {
    let tree_root = build_tree(manifest, destination);

    let mut lines = Vec::new();
    render_tree(&tree_root, "", true, &mut lines);

    lines
}

pub fn preview_as_tree(manifest: &Manifest, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    for line in tree_lines(manifest, destination) {
        println!("{}", line);
    }

    let fancy_prompt = format!(
        "\n{} {}\n",
        "└─".bold().bright_blue(),
        "Dry run, nothing was written".bright_green()
    );

    println!("{}", fancy_prompt);
}
