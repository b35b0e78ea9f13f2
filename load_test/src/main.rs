use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use search_load_test::cli::{Cli, Mode, PayloadArgs};
use search_load_test::metrics::{json_report, reporter};
use search_load_test::runner::LoadTest;
use search_load_test::tasks::{self, SearchTask, TemplateSearch};

fn init_tracing(verbose: bool) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn print_payload(args: &PayloadArgs) -> Result<()> {
    let template = TemplateSearch::new(&args.template_file);
    let task: Arc<dyn SearchTask> = if args.operation == template.operation_name() {
        Arc::new(template)
    } else {
        tasks::catalog().get(&args.operation).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown operation '{}'; run `search-load-test tasks` to list them",
                args.operation
            )
        })?
    };

    let payload = task.payload()?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Run(args) => {
            init_tracing(args.verbose)?;

            let load_test = match LoadTest::prepare(&args) {
                Ok(load_test) => load_test,
                Err(e) => {
                    println!("CONFIGURATION ERROR: {e}");
                    std::process::exit(1);
                }
            };
            let config = load_test.config().clone();

            let collector = load_test.run().await?;

            reporter::print_final_report(&collector);

            if let Some(path) = &config.report_json {
                json_report::write_json_report(&collector, &config, path)?;
                tracing::info!("JSON report: {}", path.display());
            }

            tracing::info!("Load test complete");
        }

        Mode::Tasks => {
            println!("Available tasks:");
            for name in tasks::catalog().operation_names() {
                println!("  {name}");
            }
            println!("  {}  (reads --template-file)", tasks::template::OPERATION);
        }

        Mode::Payload(args) => print_payload(&args)?,
    }

    Ok(())
}
