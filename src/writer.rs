/*!
 * Markdown rendering of aggregated file contents
 */

use crate::types::TextFile;

/// Render one file as a heading followed by a fenced block
pub fn format_section(file: &TextFile) -> String {
    format!("## {}\n```\n{}\n```\n", file.path, file.content)
}

/// Concatenate file sections, separated by blank lines
pub fn format_files(files: &[TextFile]) -> String {
    files
        .iter()
        .map(format_section)
        .collect::<Vec<_>>()
        .join("\n")
}
