//! solar-sizer entry point — CLI wiring from project config to quote.

use std::fs;
use std::path::Path;
use std::process;

use solar_sizer::catalog::Catalog;
use solar_sizer::config::ProjectConfig;
use solar_sizer::document::render_quotation;
use solar_sizer::io::export::{export_costs_csv, export_loads_csv};
use solar_sizer::pipeline::run_pipeline;

/// Parsed CLI arguments.
struct CliArgs {
    project_path: Option<String>,
    preset: Option<String>,
    catalog_path: Option<String>,
    quote_out: Option<String>,
    loads_csv: Option<String>,
    costs_csv: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-sizer — Off-grid solar system sizing and quotation calculator");
    eprintln!();
    eprintln!("Usage: solar-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --project <path>      Load project from TOML config file");
    eprintln!("  --preset <name>       Use a built-in preset (baseline)");
    eprintln!("  --catalog <path>      Replace the built-in component catalog");
    eprintln!("  --quote-out <path>    Write the quotation document to a file");
    eprintln!("  --loads-csv <path>    Export the load audit to CSV");
    eprintln!("  --costs-csv <path>    Export the cost breakdown to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve               Start REST API server");
        eprintln!("  --port <u16>          API server port (default: 3000)");
    }
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("If no --project or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        project_path: None,
        preset: None,
        catalog_path: None,
        quote_out: None,
        loads_csv: None,
        costs_csv: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--project" => {
                cli.project_path = Some(take_value(&args, &mut i, "--project", "a path"));
            }
            "--preset" => {
                cli.preset = Some(take_value(&args, &mut i, "--preset", "a name"));
            }
            "--catalog" => {
                cli.catalog_path = Some(take_value(&args, &mut i, "--catalog", "a path"));
            }
            "--quote-out" => {
                cli.quote_out = Some(take_value(&args, &mut i, "--quote-out", "a path"));
            }
            "--loads-csv" => {
                cli.loads_csv = Some(take_value(&args, &mut i, "--loads-csv", "a path"));
            }
            "--costs-csv" => {
                cli.costs_csv = Some(take_value(&args, &mut i, "--costs-csv", "a path"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let raw = take_value(&args, &mut i, "--port", "a u16");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn take_value(args: &[String], i: &mut usize, flag: &str, expected: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires {expected} argument");
        process::exit(1);
    }
    args[*i].clone()
}

fn main() {
    let cli = parse_args();

    // Load config: --project takes priority, then --preset, then baseline
    let project = if let Some(ref path) = cli.project_path {
        match ProjectConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ProjectConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ProjectConfig::baseline()
    };

    // Validate
    let errors = project.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Catalog: file override or built-in
    let catalog = if let Some(ref path) = cli.catalog_path {
        match Catalog::from_toml_file(Path::new(path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        Catalog::builtin()
    };

    // Build the ledger from the configured loads
    let ledger = match project.ledger() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Run the pipeline
    let quote = match run_pipeline(&ledger, &project.sizing, &project.finance, &catalog) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print the report
    println!("{}", quote.summary);
    println!("\n{}", quote.sizing);
    println!("\n{}", quote.costs);
    match &quote.finance {
        Some(fin) => println!("\n{fin}"),
        None => println!("\n(no ROI analysis: load audit is empty)"),
    }

    // Write the quotation document if requested
    if let Some(ref path) = cli.quote_out {
        let doc = match render_quotation(
            &project.company,
            &project.client,
            &ledger,
            &project.sizing,
            &project.finance,
            &quote,
        ) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };
        if let Err(e) = fs::write(path, doc) {
            eprintln!("error: failed to write quotation: {e}");
            process::exit(1);
        }
        eprintln!("Quotation written to {path}");
    }

    // CSV exports
    if let Some(ref path) = cli.loads_csv {
        if let Err(e) = export_loads_csv(&ledger, Path::new(path)) {
            eprintln!("error: failed to write loads CSV: {e}");
            process::exit(1);
        }
        eprintln!("Load audit written to {path}");
    }
    if let Some(ref path) = cli.costs_csv {
        if let Err(e) = export_costs_csv(&quote.costs, &project.sizing, Path::new(path)) {
            eprintln!("error: failed to write costs CSV: {e}");
            process::exit(1);
        }
        eprintln!("Cost breakdown written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_sizer::api::AppState::new(
            catalog,
            project.sizing.clone(),
            project.finance.clone(),
        ));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(solar_sizer::api::serve(state, addr));
    }
}
