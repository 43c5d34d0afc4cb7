//! Grafana datasource CLI binary.
//!
//! A command-line interface for managing datasources through the Grafana API.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use grafapi::cli::{Cli, Command, Target};
use grafapi::{
    Create, Datasource, DatasourceType, Delete, Get, GrafanaClient, GrafanaError, List, OrgId,
    PrettyPrint, Update,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = match GrafanaClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set GRAFANA_API_KEY or GRAFANA_BASIC_AUTH environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &GrafanaClient, cli: Cli) -> grafapi::Result<()> {
    let org = OrgId(cli.org);
    match cli.command {
        Command::List => {
            let datasources = Datasource::list(client, org).await?;
            output_rows(&datasources, cli.json, DatasourceRow::from)
        }
        Command::Get(target) => {
            let ds = match target {
                Target { id: Some(id), .. } => Datasource::get(client, id, org).await?,
                Target { name: Some(name), .. } => {
                    Datasource::get_by_name(client, &name, org).await?
                }
                _ => return Err(missing_target()),
            };
            output_single(&ds, cli.json)
        }
        Command::Create { file } => {
            let ds = read_datasource(&file)?;
            let status = Datasource::create(client, &ds, org).await?;
            output_single(&status, cli.json)
        }
        Command::Update { file } => {
            let ds = read_datasource(&file)?;
            if ds.id == 0 {
                return Err(GrafanaError::InvalidArgument(
                    "datasource JSON must carry the id to update".to_string(),
                ));
            }
            let status = Datasource::update(client, &ds, org).await?;
            output_single(&status, cli.json)
        }
        Command::Delete(target) => {
            let status = match target {
                Target { id: Some(id), .. } => Datasource::delete(client, id, org).await?,
                Target { name: Some(name), .. } => {
                    Datasource::delete_by_name(client, &name, org).await?
                }
                _ => return Err(missing_target()),
            };
            output_single(&status, cli.json)
        }
        Command::Types => {
            // Sorted for stable output
            let types: BTreeMap<String, DatasourceType> =
                DatasourceType::list_all(client, org).await?.into_iter().collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&types)?);
                Ok(())
            } else {
                let rows: Vec<TypeRow> = types.iter().map(TypeRow::from).collect();
                println!("{}", Table::new(rows));
                Ok(())
            }
        }
    }
}

fn missing_target() -> GrafanaError {
    GrafanaError::InvalidArgument("either an ID or --name is required".to_string())
}

fn read_datasource(path: &Path) -> grafapi::Result<Datasource> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> grafapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_rows<'a, T, R, F>(items: &'a [T], json: bool, to_row: F) -> grafapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&'a T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} datasource(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct DatasourceRow {
    id: u64,
    uid: String,
    name: String,
    #[tabled(rename = "type")]
    ds_type: String,
    url: String,
    default: String,
}

impl From<&Datasource> for DatasourceRow {
    fn from(d: &Datasource) -> Self {
        Self {
            id: d.id,
            uid: d.uid.clone().unwrap_or_default(),
            name: d.name.clone(),
            ds_type: d.ds_type.clone(),
            url: d.url.clone(),
            default: if d.is_default { "yes" } else { "" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    key: String,
    name: String,
    #[tabled(rename = "type")]
    ds_type: String,
    plugin: String,
    module: String,
}

impl From<(&String, &DatasourceType)> for TypeRow {
    fn from((key, t): (&String, &DatasourceType)) -> Self {
        Self {
            key: key.clone(),
            name: t.name.clone(),
            ds_type: t.ds_type.clone(),
            plugin: t.plugin_type.clone().unwrap_or_default(),
            module: t.module.clone().unwrap_or_default(),
        }
    }
}
