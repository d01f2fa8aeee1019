use anyhow::Result;
use clap::Args;
use tenkft_api::Client;

use super::{finish_all, print_summary, PageArgs};
use crate::output::{build_user_rows, render, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    /// Only users staffed on this project
    #[arg(long)]
    pub project: Option<i64>,

    #[command(flatten)]
    pub paging: PageArgs,
}

pub async fn run(args: &UsersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let opts = args.paging.to_options();

    let users = match args.project {
        Some(project_id) => {
            let page = client.get_project_users(project_id, &opts).await?;
            print_summary(&page.paging, page.len(), "users");
            page
        }
        None if args.paging.all => {
            let all = finish_all(client.get_all_users(&opts).await, "users")?;
            eprintln!(
                "{} users ({} excluding the account owner)",
                all.len(),
                all.non_owner_count()
            );
            all
        }
        None => {
            let page = client.get_users(&opts).await?;
            print_summary(&page.paging, page.len(), "users");
            page
        }
    };

    render(&users.data, build_user_rows(&users.data), format)
}
