//! C header reader
//!
//! Pulls function prototypes out of a C header so the declarations native
//! callers compile against can be checked against the [`ContractRegistry`].
//! Only the subset of C used by this crate's headers is understood:
//! comments, preprocessor lines, `typedef` declarations and one prototype
//! per statement.
//!
//! [`ContractRegistry`]: super::ContractRegistry

use super::types::FfiSignature;
use crate::error::{BoundaryError, BoundaryResult};

/// Parse every function prototype in `source`.
pub fn parse_header(source: &str) -> BoundaryResult<Vec<FfiSignature>> {
    let cleaned = strip_comments(source);
    let mut signatures = Vec::new();

    let mut statement = String::new();
    let mut statement_line = 0;
    let mut depth = 0usize;

    for (index, line) in cleaned.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || (statement.is_empty() && trimmed.starts_with('#')) {
            continue;
        }
        if statement.is_empty() {
            statement_line = line_no;
        }

        for c in trimmed.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            if c == ';' && depth == 0 {
                handle_statement(&statement, statement_line, &mut signatures)?;
                statement.clear();
                statement_line = line_no;
            } else {
                statement.push(c);
            }
        }
        if !statement.is_empty() {
            statement.push(' ');
        }
    }

    if !statement.trim().is_empty() {
        return Err(BoundaryError::HeaderParse {
            line: statement_line,
            msg: "unterminated declaration".to_string(),
        });
    }

    Ok(signatures)
}

fn handle_statement(
    statement: &str,
    line: usize,
    signatures: &mut Vec<FfiSignature>,
) -> BoundaryResult<()> {
    let statement = statement.trim();
    if statement.is_empty() || statement.starts_with("typedef") || !statement.contains('(') {
        return Ok(());
    }

    let signature = FfiSignature::parse(statement).ok_or_else(|| BoundaryError::HeaderParse {
        line,
        msg: format!("unsupported prototype `{}`", statement),
    })?;
    signatures.push(signature);
    Ok(())
}

/// Replace `/* */` and `//` comments with whitespace, keeping line breaks.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_block = false;
    let mut in_line = false;

    while let Some(c) = chars.next() {
        if in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block = false;
            } else if c == '\n' {
                out.push('\n');
            }
            continue;
        }
        if in_line {
            if c == '\n' {
                in_line = false;
                out.push('\n');
            }
            continue;
        }
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            in_block = true;
        } else if c == '/' && chars.peek() == Some(&'/') {
            chars.next();
            in_line = true;
        } else {
            out.push(c);
        }
    }

    out
}
