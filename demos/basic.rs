//! Basic example demonstrating the Grafana datasource client.
//!
//! Run with:
//! ```
//! GRAFANA_BASIC_AUTH=admin:admin cargo run --example basic
//! ```

use grafapi::{
    Create, Datasource, DatasourceType, Delete, Get, GrafanaClient, List, OrgId, Update,
};

#[tokio::main]
async fn main() -> grafapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let org = OrgId::CURRENT;

    println!("Creating Grafana client...");
    let client = GrafanaClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Installed Datasource Types ---");
    let types = DatasourceType::list_all(&client, org).await?;
    let mut names: Vec<_> = types.keys().collect();
    names.sort();
    for name in names.iter().take(10) {
        println!("  - {}", name);
    }
    println!("({} total)", types.len());

    println!("\n--- Existing Datasources ---");
    for ds in Datasource::list(&client, org).await? {
        let marker = if ds.is_default { " (default)" } else { "" };
        println!("  #{} {} [{}]{}", ds.id, ds.name, ds.ds_type, marker);
    }

    println!("\n--- Create / Update / Delete ---");
    let ds = Datasource::new("grafapi-demo", "prometheus", "http://localhost:9090");
    let status = Datasource::create(&client, &ds, org).await?;
    println!("Create: {:?}", status.message);

    let Some(id) = status.id else {
        println!("Create did not return an id, stopping");
        return Ok(());
    };

    let mut created = Datasource::get(&client, id, org).await?;
    created.url = "http://localhost:9091".to_string();
    let status = Datasource::update(&client, &created, org).await?;
    println!("Update: {:?}", status.message);

    let status = Datasource::delete(&client, id, org).await?;
    println!("Delete: {:?}", status.message);

    println!("\nDone!");
    Ok(())
}
