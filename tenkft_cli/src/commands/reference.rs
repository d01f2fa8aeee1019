//! Project sub-collections and account-wide reference data.

use anyhow::Result;
use clap::Args;
use tenkft_api::Client;

use super::{finish_all, print_summary, PageArgs};
use crate::output::{
    build_bill_rate_rows, build_leave_type_rows, build_phase_rows, build_placeholder_rows,
    build_role_rows, render, OutputFormat,
};

#[derive(Args)]
pub struct ProjectScopedArgs {
    /// Project ID
    #[arg(long)]
    pub project: i64,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Args)]
pub struct ReferenceArgs {
    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run_phases(
    args: &ProjectScopedArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let phases = client
        .get_project_phases(args.project, &args.paging.to_options())
        .await?;
    print_summary(&phases.paging, phases.len(), "phases");
    render(&phases.data, build_phase_rows(&phases.data), format)
}

pub async fn run_bill_rates(
    args: &ProjectScopedArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let opts = args.paging.to_options();
    let rates = if args.paging.all {
        finish_all(
            client.get_all_project_bill_rates(args.project, &opts).await,
            "bill rates",
        )?
    } else {
        let page = client.get_project_bill_rates(args.project, &opts).await?;
        print_summary(&page.paging, page.len(), "bill rates");
        page
    };
    render(&rates.data, build_bill_rate_rows(&rates.data), format)
}

pub async fn run_leave_types(
    args: &ReferenceArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let opts = args.paging.to_options();
    let leave_types = if args.paging.all {
        finish_all(client.get_all_leave_types(&opts).await, "leave types")?
    } else {
        client.get_leave_types(&opts).await?
    };
    render(
        &leave_types.data,
        build_leave_type_rows(&leave_types.data),
        format,
    )
}

pub async fn run_roles(args: &ReferenceArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let opts = args.paging.to_options();
    let roles = if args.paging.all {
        finish_all(client.get_all_roles(&opts).await, "roles")?
    } else {
        client.get_roles(&opts).await?
    };
    render(&roles.data, build_role_rows(&roles.data), format)
}

pub async fn run_placeholders(
    args: &ReferenceArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let opts = args.paging.to_options();
    let placeholders = if args.paging.all {
        finish_all(
            client.get_all_placeholder_resources(&opts).await,
            "placeholders",
        )?
    } else {
        client.get_placeholder_resources(&opts).await?
    };
    render(
        &placeholders.data,
        build_placeholder_rows(&placeholders.data),
        format,
    )
}
