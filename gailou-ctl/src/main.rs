use std::time::Duration;

use anyhow::{anyhow, Context};
use gailou_client::{api::CommentId, ArticleSession, CommentTree, DataService};

mod http;
use http::HttpService;

mod print;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base url of the data service
    #[structopt(long, env = "GAILOU_HOST", default_value = "http://localhost:8000")]
    host: String,

    /// Give up on a data service request after this many seconds
    #[structopt(long, default_value = "30")]
    timeout_secs: u64,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Fetch an article and print its comment threads
    Show {
        /// Article link or id
        query: String,

        /// Ask the data service to re-fetch the article instead of using its cache
        #[structopt(short, long)]
        force: bool,

        /// Hide the replies of this comment (can be repeated)
        #[structopt(short, long)]
        collapse: Vec<String>,
    },

    /// List previously fetched articles
    History,
}

async fn show(
    svc: &impl DataService,
    query: &str,
    force: bool,
    collapse: Vec<String>,
) -> anyhow::Result<()> {
    let mut session = ArticleSession::new();
    let ticket = match force {
        false => session.submit_query(query)?,
        true => session.load_article(ArticleSession::parse_query(query)?, true),
    };
    if let Some(h) = session.complete_load(ticket.fetch(svc).await) {
        session.complete_history(h.fetch(svc).await);
    }
    if let Some(e) = session.error() {
        return Err(e.clone()).with_context(|| format!("loading article {query:?}"));
    }
    let article = session
        .article()
        .ok_or_else(|| anyhow!("no article loaded for {query:?}"))?;

    let mut tree = CommentTree::new(article.comments.clone());
    for id in collapse {
        tree.toggle(&CommentId(id));
    }
    print::article(&mut std::io::stdout().lock(), article, &tree).context("printing article")
}

async fn history(svc: &impl DataService) -> anyhow::Result<()> {
    let mut session = ArticleSession::new();
    let ticket = session.refresh_history();
    session.complete_history(ticket.fetch(svc).await);
    if let Some(e) = session.history_error() {
        return Err(e.clone()).context("fetching history");
    }
    print::history(&mut std::io::stdout().lock(), session.history()).context("printing history")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let svc = HttpService::new(opt.host, Duration::from_secs(opt.timeout_secs))?;
    match opt.cmd {
        Command::Show {
            query,
            force,
            collapse,
        } => show(&svc, &query, force, collapse).await,
        Command::History => history(&svc).await,
    }
}
