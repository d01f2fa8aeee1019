use anyhow::{bail, Result};
use clap::Args;
use tenkft_api::Client;

use super::{finish_all, print_summary, PageArgs};
use crate::output::{build_assignment_rows, render, OutputFormat};

#[derive(Args)]
pub struct AssignmentsArgs {
    /// List assignments for this user
    #[arg(long, conflicts_with = "project")]
    pub user: Option<i64>,

    /// List assignments on this project
    #[arg(long)]
    pub project: Option<i64>,

    /// Only assignments ending on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only assignments starting on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &AssignmentsArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let mut opts = args.paging.to_options();
    if let Some(ref from) = args.from {
        opts.set("from", &validate_date(from)?);
    }
    if let Some(ref to) = args.to {
        opts.set("to", &validate_date(to)?);
    }

    let assignments = match (args.user, args.project) {
        (Some(user_id), _) if args.paging.all => {
            let all = finish_all(
                client.get_all_user_assignments(user_id, &opts).await,
                "assignments",
            )?;
            eprintln!("{} assignments", all.len());
            all
        }
        (Some(user_id), _) => {
            let page = client.get_user_assignments(user_id, &opts).await?;
            print_summary(&page.paging, page.len(), "assignments");
            page
        }
        (None, Some(project_id)) => {
            let page = client.get_project_assignments(project_id, &opts).await?;
            print_summary(&page.paging, page.len(), "assignments");
            page
        }
        (None, None) => bail!("either --user or --project is required"),
    };

    render(
        &assignments.data,
        build_assignment_rows(&assignments.data),
        format,
    )
}

fn validate_date(value: &str) -> Result<String> {
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date.to_string()),
        Err(_) => bail!("invalid date '{}', expected YYYY-MM-DD", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_date_accepts_iso_dates() {
        assert_eq!(validate_date("2024-03-01").unwrap(), "2024-03-01");
    }

    #[test]
    fn validate_date_rejects_other_formats() {
        assert!(validate_date("03/01/2024").is_err());
        assert!(validate_date("2024-13-01").is_err());
    }
}
