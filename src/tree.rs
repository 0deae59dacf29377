/*!
 * Directory tree building and rendering
 */

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::types::{FileTree, TreeFormat};

/// Build a naming hierarchy from `/`-separated relative file paths
pub fn build_tree<S: AsRef<str>>(paths: &[S]) -> FileTree {
    let mut tree = FileTree::default();

    for path in paths {
        let mut level = &mut tree;
        for segment in path.as_ref().split('/').filter(|s| !s.is_empty()) {
            level = level.children.entry(segment.to_string()).or_default();
        }
    }

    tree
}

/// Render `paths` as a tree titled `root_name`
pub fn format_tree<S: AsRef<str>>(paths: &[S], format: TreeFormat, root_name: &str) -> Result<String> {
    let tree = build_tree(paths);

    match format {
        TreeFormat::Markdown => Ok(format_markdown(&tree, root_name)),
        TreeFormat::Xml => format_xml(&tree, root_name),
        TreeFormat::Ascii => Ok(format_ascii(&tree, root_name)),
    }
}

/// Nested bullet list, two spaces per level
pub fn format_markdown(tree: &FileTree, root_name: &str) -> String {
    let mut output = String::new();
    write_markdown(tree, root_name, "", &mut output);
    output
}

fn write_markdown(tree: &FileTree, name: &str, indent: &str, output: &mut String) {
    output.push_str(&format!("{}- {}\n", indent, name));

    let child_indent = format!("{}  ", indent);
    for (key, child) in &tree.children {
        if child.is_leaf() {
            output.push_str(&format!("{}- {}\n", child_indent, key));
        } else {
            write_markdown(child, key, &child_indent, output);
        }
    }
}

/// Nested tags; files are self-closing
pub fn format_xml(tree: &FileTree, root_name: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_xml(tree, root_name, &mut writer)?;

    let mut output = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    output.push('\n');
    Ok(output)
}

fn write_xml(tree: &FileTree, name: &str, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;

    for (key, child) in &tree.children {
        if child.is_leaf() {
            writer.write_event(Event::Empty(BytesStart::new(key.as_str())))?;
        } else {
            write_xml(child, key, writer)?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Box-drawing tree in the style of `tree(1)`
pub fn format_ascii(tree: &FileTree, root_name: &str) -> String {
    let mut output = format!("{}\n", root_name);
    write_ascii_children(tree, "", &mut output);
    output
}

fn write_ascii_children(tree: &FileTree, prefix: &str, output: &mut String) {
    let last_index = tree.children.len().saturating_sub(1);

    for (index, (key, child)) in tree.children.iter().enumerate() {
        let is_last = index == last_index;
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{}{}{}\n", prefix, branch, key));

        if !child.is_leaf() {
            let continuation = if is_last { "    " } else { "│   " };
            write_ascii_children(child, &format!("{}{}", prefix, continuation), output);
        }
    }
}
