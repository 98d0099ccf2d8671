use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

use jsonapi_store::action::{self, ApiAction, RequestOptions};
use jsonapi_store::config::Config;
use jsonapi_store::dispatch::{Dispatcher, NormalizedPayload};
use jsonapi_store::logging::init_tracing;
use jsonapi_store::middleware::ApiMiddleware;
use jsonapi_store::resolver;
use jsonapi_store::resource::Resource;
use jsonapi_store::store::{Store, STATE_KEY};

#[derive(Debug, Parser)]
#[command(name = "jsonapi-store", version, about = "Fetch and reconcile JSON:API resources")]
struct Cli {
    /// Path to config file (default: ~/.config/jsonapi-store/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured API host
    #[arg(long, global = true)]
    host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read a resource or a collection
    Get {
        resource_type: String,
        id: Option<String>,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Create a resource from a JSON attributes object
    Create {
        resource_type: String,
        #[arg(long)]
        attributes: String,
    },
    /// Update a resource from a JSON attributes object
    Update {
        resource_type: String,
        id: String,
        #[arg(long)]
        attributes: String,
    },
    /// Delete a resource
    Delete { resource_type: String, id: String },
    /// Read a resource and load all of its relationships
    Resolve { resource_type: String, id: String },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_attributes(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(raw).context("Attributes must be valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("Attributes must be a JSON object"),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = &cli.host {
        config.client.host = host.clone();
    }
    config.validate()?;
    Ok(config)
}

fn output(payload: Option<NormalizedPayload>, store: &Store) -> Result<()> {
    let body = json!({ "payload": payload, STATE_KEY: store.state() });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn run(cli: Cli, middleware: ApiMiddleware) -> Result<()> {
    let request: ApiAction = match cli.command {
        Command::Get {
            resource_type,
            id,
            params,
        } => {
            let mut resource = Resource::new(resource_type);
            resource.id = id;
            let options = params
                .into_iter()
                .fold(RequestOptions::default(), |options, (k, v)| options.with_param(k, v));
            action::read(resource, options)
        }
        Command::Create {
            resource_type,
            attributes,
        } => {
            let mut resource = Resource::new(resource_type);
            resource.attributes = parse_attributes(&attributes)?;
            action::write(resource, RequestOptions::default())
        }
        Command::Update {
            resource_type,
            id,
            attributes,
        } => {
            let mut resource = Resource::new(resource_type).with_id(id);
            resource.attributes = parse_attributes(&attributes)?;
            action::write(resource, RequestOptions::default())
        }
        Command::Delete { resource_type, id } => action::remove(
            Resource::new(resource_type).with_id(id),
            RequestOptions::default(),
        ),
        Command::Resolve { resource_type, id } => {
            let target = Resource::new(resource_type).with_id(id);
            middleware
                .dispatch(action::read(&target, RequestOptions::default()))
                .await?;

            let snapshot = middleware.store().state();
            let stored = target
                .id
                .as_deref()
                .and_then(|id| snapshot.get(&target.resource_type, id))
                .with_context(|| format!("{} was not returned by the server", target.resource_type))?;

            let hydrated = resolver::resolve(&middleware, stored, RequestOptions::default()).await?;
            println!("{}", serde_json::to_string_pretty(&hydrated.to_json())?);
            return Ok(());
        }
    };

    let payload = middleware.dispatch(request).await?;
    output(payload, middleware.store())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    let dispatcher = match Dispatcher::new(&config.client) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let middleware = ApiMiddleware::new(dispatcher, Store::new());

    if let Err(e) = run(cli, middleware).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
