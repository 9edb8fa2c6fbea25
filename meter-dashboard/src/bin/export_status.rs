use anyhow::{bail, Result};
use meter_client::api::{Backend, ExceptionQuery, HttpBackend};
use meter_dashboard::{config::AppConfig, controller::window, export, observability};
use std::{env, fs::File, io, time::Duration};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: export_status <billing_date> [output.csv]");
    }
    let billing_date = &args[1];

    let cfg = AppConfig::load()?;
    let backend = HttpBackend::new(
        &cfg.backend.base_url,
        Duration::from_secs(cfg.backend.request_timeout_secs),
    )?;

    let window = window::query_window(billing_date)?;
    let query = ExceptionQuery {
        billing_date: billing_date.clone(),
        start_target: window.start_target,
        end_target: window.end_target,
    };
    let records = backend.meter_exceptions(&query).await?;

    match args.get(2) {
        Some(path) => export::write_csv(&records, File::create(path)?)?,
        None => export::write_csv(&records, io::stdout())?,
    }

    let exceptions = records.iter().filter(|r| !r.is_found()).count();
    tracing::info!(
        billing_date = %billing_date,
        records = records.len(),
        exceptions,
        "meter status export complete"
    );

    Ok(())
}
