use anyhow::Result;
use clap::Args;
use tenkft_api::Client;

use super::{finish_all, print_summary, PageArgs};
use crate::output::{build_project_rows, render, OutputFormat};

#[derive(Args)]
pub struct ProjectsArgs {
    /// Show a single project by ID
    #[arg(long)]
    pub id: Option<i64>,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &ProjectsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let opts = args.paging.to_options();

    if let Some(id) = args.id {
        let project = client.get_project(id, &opts).await?;
        let projects = [project];
        return render(&projects, build_project_rows(&projects), format);
    }

    let projects = if args.paging.all {
        let all = finish_all(client.get_all_projects(&opts).await, "projects")?;
        eprintln!("{} projects", all.len());
        all
    } else {
        let page = client.get_projects(&opts).await?;
        print_summary(&page.paging, page.len(), "projects");
        page
    };

    render(&projects.data, build_project_rows(&projects.data), format)
}
