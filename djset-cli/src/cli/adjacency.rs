//! Line-oriented adjacency list parsing.
//!
//! Each non-blank line names a source element followed by its neighbours,
//! either as `a: b c d` or `a b c d`. Text after `#` is ignored.

use std::io::BufRead;
use std::path::Path;

use super::commands::CliError;

/// One parsed adjacency line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyEntry {
    /// 1-based line number in the input.
    pub line: usize,
    /// Element whose neighbours follow.
    pub source: usize,
    /// Elements to unite with `source`, in file order.
    pub neighbours: Vec<usize>,
}

/// Parses every adjacency line from `reader`; `path` is only used in errors.
///
/// # Errors
/// Returns [`CliError::Io`] when reading fails and [`CliError::Parse`] for
/// lines without a source or with non-numeric indices.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use djset_cli::cli::parse_adjacency;
///
/// let input = "# hub\n0: 1 2\n\n3 4\n";
/// let entries = parse_adjacency(input.as_bytes(), Path::new("inline"))?;
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].source, 3);
/// assert_eq!(entries[1].neighbours, vec![4]);
/// # Ok::<(), djset_cli::cli::CliError>(())
/// ```
pub fn parse_adjacency(reader: impl BufRead, path: &Path) -> Result<Vec<AdjacencyEntry>, CliError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let text = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(entry) = parse_line(&text, line_number)
            .map_err(|message| CliError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                message,
            })?
        {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_line(text: &str, line: usize) -> Result<Option<AdjacencyEntry>, String> {
    let content = text.split_once('#').map_or(text, |(before, _)| before).trim();
    if content.is_empty() {
        return Ok(None);
    }

    let (source, rest) = match content.split_once(':') {
        Some((source, rest)) => (source.trim(), rest),
        None => content
            .split_once(char::is_whitespace)
            .unwrap_or((content, "")),
    };
    if source.is_empty() {
        return Err("missing source index before `:`".to_owned());
    }
    let source = parse_index(source)?;
    let neighbours = rest
        .split_whitespace()
        .map(parse_index)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(AdjacencyEntry {
        line,
        source,
        neighbours,
    }))
}

fn parse_index(token: &str) -> Result<usize, String> {
    token
        .parse()
        .map_err(|err| format!("invalid element index `{token}`: {err}"))
}
