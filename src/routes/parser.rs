// Parser for the routes file format:
//   <network> <netmask> <gateway> <interface> [<options...>]

use super::{RouteOptions, RouteRecord};
use crate::error::{MalformedReason, RouteFileError, RouteFileResult};

const MANDATORY_FIELDS: usize = 4;

/// Parse a whole routes file. Fails on the first malformed line and returns
/// nothing in that case.
pub fn parse(filename: &str, text: &str) -> RouteFileResult<Vec<RouteRecord>> {
    let mut routes = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let route = parse_line(trimmed).map_err(|reason| {
            tracing::debug!("{}:{}: rejecting route line: {}", filename, index + 1, reason);
            RouteFileError::MalformedLine {
                file: filename.to_string(),
                line: index + 1,
                reason,
            }
        })?;

        tracing::trace!("Parsed route {} via {}", route.name(), route.gateway());
        routes.push(route);
    }

    tracing::debug!("Parsed {} route(s) from {}", routes.len(), display_name(filename));
    Ok(routes)
}

fn parse_line(line: &str) -> Result<RouteRecord, MalformedReason> {
    let (fields, rest) = split_fields(line, MANDATORY_FIELDS);
    if fields.len() < MANDATORY_FIELDS {
        return Err(MalformedReason::TooFewFields { found: fields.len() });
    }

    let options = match rest {
        Some(text) => RouteOptions::Present(text.to_string()),
        None => RouteOptions::Absent,
    };

    let route = RouteRecord::new(fields[0], fields[1], fields[2], fields[3], options)?;
    Ok(route)
}

/// Split off up to `count` whitespace-separated fields. Whatever follows the
/// last of them is returned verbatim, minus its leading whitespace.
fn split_fields(line: &str, count: usize) -> (Vec<&str>, Option<&str>) {
    let mut fields = Vec::with_capacity(count);
    let mut rest = line.trim_start_matches(|c: char| c.is_ascii_whitespace());

    while fields.len() < count && !rest.is_empty() {
        let end = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start_matches(|c: char| c.is_ascii_whitespace());
    }

    let rest = if rest.is_empty() { None } else { Some(rest) };
    (fields, rest)
}

fn display_name(filename: &str) -> &str {
    if filename.is_empty() { "<input>" } else { filename }
}
