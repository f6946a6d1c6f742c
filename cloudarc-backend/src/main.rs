use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cloudarc_backend::config::BackendConfig;
use cloudarc_common::backend::StorageBackend;

const DEFAULT_CONFIG_PATH: &str = "cloudarc.toml";

fn usage() -> ! {
    eprintln!("usage: cloudarc-backend <url> put <local-file> [remote-name]");
    eprintln!("       cloudarc-backend <url> get <remote-name> <local-dest>");
    eprintln!("       cloudarc-backend <url> list");
    eprintln!("       cloudarc-backend <url> delete <remote-name>...");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (url, command) = match (args.get(1), args.get(2)) {
        (Some(url), Some(command)) => (url.clone(), command.clone()),
        _ => usage(),
    };
    let rest = &args[3..];

    let config_path = PathBuf::from(
        std::env::var("CLOUDARC_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
    );
    let config = if config_path.exists() {
        BackendConfig::load(&config_path)?
    } else {
        BackendConfig::default()
    };
    info!(program = %config.program, url = %url, "backend configured");

    let backend = cloudarc_backend::from_url(&url, &config).await?;

    match command.as_str() {
        "put" => {
            let source = rest.first().map(PathBuf::from).unwrap_or_else(|| usage());
            let remote_name = rest.get(1).map(String::as_str);
            backend.put(&source, remote_name).await?;
            info!(file = %source.display(), "stored");
        }
        "get" => {
            let (remote_name, dest) = match (rest.first(), rest.get(1)) {
                (Some(name), Some(dest)) => (name.as_str(), PathBuf::from(dest)),
                _ => usage(),
            };
            backend.get(remote_name, &dest).await?;
            info!(file = %dest.display(), "restored");
        }
        "list" => {
            for name in backend.list().await? {
                println!("{name}");
            }
        }
        "delete" => {
            if rest.is_empty() {
                usage();
            }
            backend.delete(rest).await?;
            info!(count = rest.len(), "deleted");
        }
        _ => usage(),
    }

    Ok(())
}
