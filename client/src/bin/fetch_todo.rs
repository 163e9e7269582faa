use anyhow::Context;
use clap::Parser;
use todo_client::{build_fetch, fetch, parse_fetch, HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Fetch one todo document and decode it strictly.
#[derive(Debug, Parser)]
#[command(name = "fetch-todo", version)]
struct Args {
    /// Document URL.
    #[arg(default_value = fetch::DEFAULT_URL)]
    url: String,
}

/// Execute a GET with ureq, returning 4xx/5xx as data rather than `Err`.
fn execute(req: HttpRequest) -> anyhow::Result<HttpResponse> {
    anyhow::ensure!(req.method == HttpMethod::Get, "fetch-todo only issues GET requests");

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut request = agent.get(&req.path);
    for (name, value) in &req.headers {
        request = request.header(name, value);
    }
    let mut response = request
        .call()
        .with_context(|| format!("GET {}", req.path))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(url = %args.url, "fetching");

    let response = execute(build_fetch(&args.url))?;
    let todo = parse_fetch(response).inspect_err(|err| error!(%err, "Decoder Error"))?;
    println!("Data from API: {todo:?}");
    Ok(())
}
