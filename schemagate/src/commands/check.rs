// schemagate/src/commands/check.rs
//
// USE CASE: Load the schema once and report what would be served.

use std::path::PathBuf;

use schemagate_core::application::build_host;

pub async fn execute(config_dir: PathBuf) -> anyhow::Result<()> {
    let config = super::load_config(&config_dir)?;
    let host = build_host(&config, &config_dir, vec![]).await?;

    let service = match host.start().await {
        Ok(service) => service,
        Err(e) => {
            eprintln!("\n💥 SCHEMA LOAD FAILED: {}", e);
            let _ = host.stop().await;
            std::process::exit(1);
        }
    };

    let types = service.schema.type_names();
    println!(
        "📜 Schema generation {} ({} types)",
        service.schema.generation(),
        types.len()
    );
    println!("   Types: {}", types.join(", "));
    println!(
        "   Executor: {}",
        if service.executor.is_some() {
            "provided by schema source"
        } else {
            "none (execute against schema)"
        }
    );
    println!("   Notifications: {}", host.capability());
    match &config.document_store {
        Some(store) => println!("   Document store: enabled (max {} bytes)", store.max_size),
        None => println!("   Document store: disabled"),
    }
    println!(
        "   Introspection: {}",
        if config.introspection_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );

    host.stop().await?;
    println!("\n✨ Schema OK");
    Ok(())
}
