// Formatter producing routes file text from route-like entities

use super::RouteFields;
use crate::error::{RouteField, RouteFileError, RouteFileResult};

/// Render routes as file text, one line per route in input order.
///
/// Every record is checked for `netmask`, `gateway` and `interface` before
/// its line is written, and each field must fit on the line as written so
/// that parsing the output gives back the same routes. On failure no text
/// is returned at all.
pub fn format<R: RouteFields>(filename: &str, routes: &[R]) -> RouteFileResult<String> {
    let mut contents = String::new();

    for route in routes {
        let line = route_line(route).map_err(|problem| {
            tracing::debug!("Not formatting route {}: {:?}", route.name(), problem);
            problem.into_error(filename, route.name())
        })?;
        contents.push_str(&line);
        contents.push('\n');
    }

    tracing::debug!("Formatted {} route(s)", routes.len());
    Ok(contents)
}

#[derive(Debug)]
enum FieldProblem {
    Missing(RouteField),
    Invalid(RouteField, String),
}

impl FieldProblem {
    fn into_error(self, filename: &str, record: &str) -> RouteFileError {
        match self {
            FieldProblem::Missing(field) => RouteFileError::MissingField {
                file: filename.to_string(),
                record: record.to_string(),
                field,
            },
            FieldProblem::Invalid(field, value) => RouteFileError::InvalidField {
                file: filename.to_string(),
                record: record.to_string(),
                field,
                value,
            },
        }
    }
}

fn route_line<R: RouteFields>(route: &R) -> Result<String, FieldProblem> {
    let netmask = route.netmask().ok_or(FieldProblem::Missing(RouteField::Netmask))?;
    let gateway = route.gateway().ok_or(FieldProblem::Missing(RouteField::Gateway))?;
    let interface = route
        .interface()
        .ok_or(FieldProblem::Missing(RouteField::Interface))?;

    let fields = [
        (RouteField::Network, route.network()),
        (RouteField::Netmask, netmask),
        (RouteField::Gateway, gateway),
        (RouteField::Interface, interface),
    ];
    for (field, value) in fields {
        if !is_token(value) {
            return Err(FieldProblem::Invalid(field, value.to_string()));
        }
    }
    // A leading '#' would be read back as a comment
    if route.network().starts_with('#') {
        return Err(FieldProblem::Invalid(RouteField::Network, route.network().to_string()));
    }

    let mut line = fields.map(|(_, value)| value).join(" ");
    if let Some(options) = route.options().as_deref().filter(|o| !o.is_empty()) {
        if !is_trailing_text(options) {
            return Err(FieldProblem::Invalid(RouteField::Options, options.to_string()));
        }
        line.push(' ');
        line.push_str(options);
    }
    Ok(line)
}

/// A single non-empty field, split the same way the parser splits lines.
fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.contains(|c: char| c.is_ascii_whitespace())
}

/// Options stay on one line and keep their exact text when read back: the
/// parser strips leading ASCII whitespace and any trailing whitespace.
fn is_trailing_text(options: &str) -> bool {
    !options.contains(['\n', '\r'])
        && !options.starts_with(|c: char| c.is_ascii_whitespace())
        && !options.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{RouteDraft, RouteOptions, RouteRecord};

    fn draft(network: &str, interface: &str, options: RouteOptions) -> RouteDraft {
        RouteDraft {
            name: Some(network.to_string()),
            network: network.to_string(),
            netmask: Some("255.255.255.0".to_string()),
            gateway: Some("172.18.6.2".to_string()),
            interface: Some(interface.to_string()),
            options,
        }
    }

    fn table_200() -> RouteOptions {
        RouteOptions::Present("table 200".to_string())
    }

    fn line_for<'a>(content: &'a str, network: &str) -> &'a str {
        let lines: Vec<&str> = content
            .lines()
            .filter(|l| l.starts_with(&format!("{} ", network)))
            .collect();
        assert_eq!(lines.len(), 1);
        lines[0]
    }

    #[test]
    fn test_writes_all_five_fields() {
        let routes = vec![
            draft("172.17.67.0", "vlan200", table_200()),
            draft("172.28.45.0", "eth0", table_200()),
        ];
        let content = format("", &routes).unwrap();

        let line = line_for(&content, "172.17.67.0");
        assert_eq!(line.splitn(5, ' ').count(), 5);
        assert_eq!(line, "172.17.67.0 255.255.255.0 172.18.6.2 vlan200 table 200");
    }

    #[test]
    fn test_writes_only_mandatory_fields_when_options_absent() {
        let routes = vec![
            draft("172.17.67.0", "vlan200", RouteOptions::Absent),
            draft("172.28.45.0", "eth0", RouteOptions::Absent),
        ];
        let content = format("", &routes).unwrap();

        let line = line_for(&content, "172.17.67.0");
        assert_eq!(line.splitn(5, ' ').count(), 4);
        assert_eq!(line, "172.17.67.0 255.255.255.0 172.18.6.2 vlan200");
        assert_eq!(
            content,
            "172.17.67.0 255.255.255.0 172.18.6.2 vlan200\n\
             172.28.45.0 255.255.255.0 172.18.6.2 eth0\n"
        );
    }

    #[test]
    fn test_empty_options_are_not_written() {
        let routes = vec![draft("10.0.0.0", "eth0", RouteOptions::Present(String::new()))];
        let content = format("", &routes).unwrap();
        assert_eq!(content, "10.0.0.0 255.255.255.0 172.18.6.2 eth0\n");
    }

    #[test]
    fn test_fails_without_netmask() {
        let mut second = draft("172.28.45.0", "eth0", table_200());
        second.netmask = None;
        let routes = vec![draft("172.17.67.0", "vlan200", table_200()), second];

        let err = format("routes", &routes).unwrap_err();
        assert!(matches!(
            err,
            RouteFileError::MissingField { ref record, field: RouteField::Netmask, .. }
                if record == "172.28.45.0"
        ));
    }

    #[test]
    fn test_fails_without_gateway() {
        let mut second = draft("172.28.45.0", "eth0", RouteOptions::Absent);
        second.gateway = None;
        let routes = vec![draft("172.17.67.0", "vlan200", RouteOptions::Absent), second];

        let err = format("", &routes).unwrap_err();
        assert!(matches!(
            err,
            RouteFileError::MissingField { field: RouteField::Gateway, .. }
        ));
    }

    #[test]
    fn test_netmask_checked_before_gateway() {
        let mut route = draft("172.28.45.0", "eth0", RouteOptions::Absent);
        route.netmask = None;
        route.gateway = None;
        route.interface = None;

        let err = format("", &[route]).unwrap_err();
        assert!(matches!(
            err,
            RouteFileError::MissingField { field: RouteField::Netmask, .. }
        ));
    }

    #[test]
    fn test_fails_without_interface() {
        let mut route = draft("172.28.45.0", "eth0", RouteOptions::Absent);
        route.interface = None;

        let err = format("", &[route]).unwrap_err();
        assert!(matches!(
            err,
            RouteFileError::MissingField { field: RouteField::Interface, .. }
        ));
    }

    fn assert_invalid(routes: &[RouteDraft], expected: RouteField) {
        let err = format("routes", routes).unwrap_err();
        assert!(
            matches!(err, RouteFileError::InvalidField { field, .. } if field == expected),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_rejects_empty_interface_of_record() {
        let record = RouteRecord::new(
            "10.0.0.0",
            "255.0.0.0",
            "10.0.0.1",
            "",
            RouteOptions::Absent,
        )
        .unwrap();

        let err = format("routes", &[record]).unwrap_err();
        assert!(matches!(
            err,
            RouteFileError::InvalidField { ref record, field: RouteField::Interface, .. }
                if record == "10.0.0.0/8"
        ));
    }

    #[test]
    fn test_rejects_whitespace_inside_a_field() {
        assert_invalid(&[draft("10.0.0.0", "eth0 table", RouteOptions::Absent)], RouteField::Interface);

        let mut route = draft("10.0.0.0", "eth0", RouteOptions::Absent);
        route.network = "10.0.0.0\t".to_string();
        assert_invalid(&[route], RouteField::Network);
    }

    #[test]
    fn test_rejects_network_read_back_as_comment() {
        assert_invalid(&[draft("#10.0.0.0", "eth0", RouteOptions::Absent)], RouteField::Network);
    }

    #[test]
    fn test_rejects_empty_gateway() {
        let mut route = draft("10.0.0.0", "eth0", RouteOptions::Absent);
        route.gateway = Some(String::new());
        assert_invalid(&[route], RouteField::Gateway);

        let mut route = draft("10.0.0.0", "eth0", RouteOptions::Absent);
        route.netmask = Some(" ".to_string());
        assert_invalid(&[route], RouteField::Netmask);
    }

    #[test]
    fn test_rejects_options_spanning_lines() {
        let options = RouteOptions::Present("table 1\n10.9.9.9 255.0.0.0 1.1.1.1 eth9".to_string());
        assert_invalid(&[draft("10.0.0.0", "eth0", options)], RouteField::Options);

        let options = RouteOptions::Present("table 1\r".to_string());
        assert_invalid(&[draft("10.0.0.0", "eth0", options)], RouteField::Options);
    }

    #[test]
    fn test_rejects_options_with_surrounding_whitespace() {
        let options = RouteOptions::Present(" table 1".to_string());
        assert_invalid(&[draft("10.0.0.0", "eth0", options)], RouteField::Options);

        let options = RouteOptions::Present("table 1 ".to_string());
        assert_invalid(&[draft("10.0.0.0", "eth0", options)], RouteField::Options);
    }

    #[test]
    fn test_invalid_record_produces_no_text() {
        let mut bad = draft("172.28.45.0", "eth0", RouteOptions::Absent);
        bad.interface = Some("eth0 eth1".to_string());
        let routes = vec![draft("172.17.67.0", "vlan200", table_200()), bad];

        let err = format("routes", &routes).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(
            err.to_string(),
            "routes: route '172.28.45.0' has an invalid interface \"eth0 eth1\""
        );
    }

    #[test]
    fn test_empty_input_formats_to_empty_text() {
        let routes: Vec<RouteDraft> = Vec::new();
        assert_eq!(format("", &routes).unwrap(), "");
    }
}
