//! Route table export
//!
//! The router is an external collaborator; this module only turns the
//! artifact set into data it can consume.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::{ArtifactSet, RouteBinding};
use crate::domain::value_objects::{Guard, Operation};

/// One row of the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub route_name: String,
    /// `/<key>/<suffix>`
    pub url_path: String,
    pub module_key: String,
    pub operation: Operation,
    pub template: String,
    pub guard: Guard,
    pub context: BTreeMap<String, String>,
}

impl From<RouteBinding> for RouteEntry {
    fn from(r: RouteBinding) -> Self {
        Self {
            url_path: r.url_path(),
            route_name: r.route_name,
            module_key: r.module_key,
            operation: r.operation,
            template: r.template,
            guard: r.guard,
            context: r.context,
        }
    }
}

/// Routes in registration order, operations in canonical order
pub fn route_table(artifacts: &ArtifactSet) -> Vec<RouteEntry> {
    artifacts.routes().into_iter().map(RouteEntry::from).collect()
}

/// Fixed-width text table for terminals
pub fn render_table(routes: &[RouteEntry]) -> String {
    let name_w = routes
        .iter()
        .map(|r| r.route_name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let path_w = routes
        .iter()
        .map(|r| r.url_path.len())
        .max()
        .unwrap_or(0)
        .max("PATH".len());

    let mut out = format!("{:<name_w$}  {:<path_w$}  TEMPLATE\n", "NAME", "PATH");
    for r in routes {
        out.push_str(&format!(
            "{:<name_w$}  {:<path_w$}  {}\n",
            r.route_name, r.url_path, r.template
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{artifacts, dental, farmacia};

    #[test]
    fn table_follows_registration_then_canonical_order() {
        let routes = route_table(&artifacts(vec![farmacia(), dental()]));
        let names: Vec<_> = routes.iter().map(|r| r.route_name.as_str()).collect();
        assert_eq!(names, vec!["farmacia:dashboard", "dental:dashboard", "dental:list"]);
    }

    #[test]
    fn entries_carry_paths_and_context() {
        let routes = route_table(&artifacts(vec![dental()]));

        assert_eq!(routes[0].url_path, "/dental/");
        assert_eq!(routes[1].url_path, "/dental/list/");
        assert_eq!(routes[0].template, "dental/dashboard.html");
        assert_eq!(routes[0].guard, Guard::AuthenticationRequired);
        assert_eq!(routes[0].context.get("module_type").map(String::as_str), Some("hms"));
        assert_eq!(routes[1].context.get("module_type"), None);
        assert_eq!(routes[1].context.get("module_name").map(String::as_str), Some("Dental"));
    }

    #[test]
    fn text_table_aligns_columns() {
        let table = render_table(&route_table(&artifacts(vec![dental()])));
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert_eq!(lines[1].find("/dental/"), lines[2].find("/dental/list/"));
    }

    #[test]
    fn json_uses_snake_case_values() {
        let routes = route_table(&artifacts(vec![farmacia()]));
        let json = serde_json::to_value(&routes).unwrap();

        assert_eq!(json[0]["operation"], "dashboard");
        assert_eq!(json[0]["guard"], "authentication_required");
        assert_eq!(json[0]["url_path"], "/farmacia/");
    }
}
