use std::{
    net::TcpListener,
    path::{Path, PathBuf},
};

use anyhow::Context;
use gailou_client::api::{self, Article};
use gailou_mock_server::{MockServer, MockService};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Directory of article fixtures, every `*.json` file in it is served
    #[structopt(short, long)]
    fixtures: PathBuf,

    #[structopt(short, long, default_value = "8000")]
    port: u16,
}

fn load_fixtures(server: &mut MockServer, dir: &Path) -> anyhow::Result<usize> {
    let mut loaded = 0;
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {:?}", dir))? {
        let path = entry.with_context(|| format!("listing {:?}", dir))?.path();
        if path.extension().map_or(true, |e| e != "json") {
            continue;
        }
        let data = std::fs::read(&path).with_context(|| format!("reading {:?}", path))?;
        let article: Article = api::json::from_slice(&data)
            .with_context(|| format!("parsing article fixture {:?}", path))?;
        tracing::info!(id = %article.id, title = %article.title, "loaded fixture");
        server.publish(article);
        loaded += 1;
    }
    Ok(loaded)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let mut server = MockServer::new();
    let loaded = load_fixtures(&mut server, &opt.fixtures)?;
    tracing::info!("serving {loaded} articles");

    let listener = TcpListener::bind(("0.0.0.0", opt.port))
        .with_context(|| format!("binding port {}", opt.port))?;
    gailou_mock_server::serve(listener, MockService::new(server)).await
}
