//! `apps` handler: list applications with the file each would export to.

use serde::Serialize;
use tabled::Tabled;

use ablyform_core::aggregate::file_name_for;
use ablyform_core::{Application, ResourceSource};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct AppListing {
    #[serde(flatten)]
    app: Application,
    file: String,
}

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "TLS Only")]
    tls_only: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&AppListing> for AppRow {
    fn from(listing: &AppListing) -> Self {
        let app = &listing.app;
        Self {
            id: app.id.clone(),
            name: app.name.clone(),
            status: app.status.clone().unwrap_or_else(|| "-".into()),
            tls_only: app.tls_only.map_or_else(|| "-".into(), |t| t.to_string()),
            file: listing.file.clone(),
        }
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let (_, control) = util::connection_settings(global)?;
    let source = util::connect(&control).await?;

    let listings: Vec<AppListing> = source
        .list_applications()
        .await?
        .into_iter()
        .map(Application::from)
        .map(|app| AppListing {
            file: file_name_for(&app),
            app,
        })
        .collect();

    let out = output::render_list(&global.output, &listings, |l| AppRow::from(l), |l| {
        l.app.id.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
