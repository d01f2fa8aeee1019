//! CLI subcommand implementations.

pub mod assignments;
pub mod projects;
pub mod reference;
pub mod users;

use anyhow::Result;
use clap::Args;
use tenkft_api::types::{Collection, Paging};
use tenkft_api::{ListOptions, PaginationError};

/// Paging flags shared by every list command.
#[derive(Args)]
pub struct PageArgs {
    /// Follow `next` links and fetch every page
    #[arg(long)]
    pub all: bool,

    /// Page number (ignored with --all)
    #[arg(long)]
    pub page: Option<i64>,

    /// Results per page
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Extra fields to embed, comma-separated (e.g. tags,summary)
    #[arg(long)]
    pub fields: Option<String>,
}

impl PageArgs {
    pub fn to_options(&self) -> ListOptions {
        let mut opts = ListOptions::new();
        if let Some(page) = self.page {
            if !self.all {
                opts = opts.with_page(page);
            }
        }
        if let Some(per_page) = self.per_page {
            opts = opts.with_per_page(per_page);
        }
        if let Some(ref fields) = self.fields {
            opts = opts.with_fields(fields);
        }
        opts
    }
}

/// Reports how far a multi-page fetch got before it failed.
pub fn finish_all<T>(
    result: Result<Collection<T>, PaginationError<T>>,
    noun: &str,
) -> Result<Collection<T>>
where
    T: std::fmt::Debug + Send + Sync + 'static,
{
    result.map_err(|err| {
        eprintln!(
            "Fetched {} {} before page {} failed",
            err.partial.len(),
            noun,
            err.page
        );
        anyhow::Error::new(err)
    })
}

pub fn print_summary(paging: &Paging, count: usize, noun: &str) {
    if paging.has_next() {
        eprintln!("Page {} ({} {}, more available)", paging.page, count, noun);
    } else {
        eprintln!("Page {} ({} {})", paging.page, count, noun);
    }
}
