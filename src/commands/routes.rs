use std::path::Path;

use anyhow::Result;

use hms_scaffold::application::{render_table, route_table};

pub fn cmd_routes(config: &Path, json: bool) -> Result<()> {
    let project = super::load_project(config, false)?;
    let routes = route_table(&project.generate()?);

    if json {
        crate::ui::json::emit_complete(
            "routes",
            true,
            &serde_json::json!({ "routes": routes }),
        )?;
    } else {
        print!("{}", render_table(&routes));
    }
    Ok(())
}
