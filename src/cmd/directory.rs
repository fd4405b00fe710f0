use clap::Args;

use crate::cmd::{Outcome, render};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::services::QueryParams;
use crate::workflow::controller::DIRECTORY_PAGE_SIZE;
use crate::workflow::view::SelectOption;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Maximum number of entries to fetch.
    #[arg(short, long, default_value_t = DIRECTORY_PAGE_SIZE)]
    pub limit: u32,
}

pub async fn run_projects(ctx: &AppContext, args: ListArgs) -> AppResult<Outcome> {
    let page = ctx
        .itsm
        .list_projects(&QueryParams::with_limit(args.limit))
        .await?;
    let options = page
        .items
        .into_iter()
        .map(|project| SelectOption {
            value: project.id,
            label: project.name,
        })
        .collect::<Vec<_>>();
    render::options("Projects", &options);
    Ok(Outcome::Done)
}

pub async fn run_users(ctx: &AppContext, args: ListArgs) -> AppResult<Outcome> {
    let page = ctx
        .itsm
        .list_users(&QueryParams::with_limit(args.limit))
        .await?;
    let options = page
        .items
        .into_iter()
        .map(|user| SelectOption {
            label: match &user.email {
                Some(email) => format!("{} <{email}>", user.name),
                None => user.name.clone(),
            },
            value: user.id,
        })
        .collect::<Vec<_>>();
    render::options("Users", &options);
    Ok(Outcome::Done)
}
