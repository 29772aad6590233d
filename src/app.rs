use crate::cli::{Cli, Commands, OutputFormat};
use crate::graph::{GraphBuilder, GraphOptions};
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = failure, 2 = usage error).
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = crate::cli::Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Analyze {
            file,
            root,
            config,
            depth,
            format,
            include_external,
            exclude,
            alias,
            ext,
            max_content_length,
            output,
            debug,
        } => {
            init_logging(debug);

            let file_path = PathBuf::from(&file);
            let detected = crate::utils::project_root::detect(&file_path);
            let root_flag = root.map(PathBuf::from);
            let cfg = if let Some(cfg_path) = config.as_ref() {
                crate::utils::config::load_config_at(Path::new(cfg_path))
            } else {
                crate::utils::config::load_config_near(
                    root_flag.as_deref().unwrap_or(&detected),
                )
            }
            .unwrap_or_default();

            // Precedence: flag, then config file, then detection/defaults.
            let root_dir = root_flag
                .or_else(|| cfg.root.as_ref().map(PathBuf::from))
                .unwrap_or(detected);

            let mut options = GraphOptions::new(root_dir.clone());
            options.max_depth = depth.or(cfg.max_depth);
            options.include_external = include_external || cfg.include_external.unwrap_or(false);
            if let Some(n) = max_content_length.or(cfg.max_content_length) {
                options.max_content_length = n;
            }
            if let Some(patterns) = cfg.exclude {
                options.exclude = patterns;
            }
            options.exclude.extend(exclude);
            if let Some(extensions) = cfg.extensions {
                options.extensions = extensions;
            }
            if !ext.is_empty() {
                options.extensions = ext;
            }
            if let Some(aliases) = cfg.aliases {
                for (k, v) in aliases {
                    upsert_alias(&mut options.aliases, k, v);
                }
            }
            for spec in &alias {
                match spec.split_once('=') {
                    Some((k, v)) if !k.is_empty() && !v.is_empty() => {
                        upsert_alias(&mut options.aliases, k.to_string(), v.to_string());
                    }
                    _ => {
                        eprintln!("Invalid --alias '{spec}': expected KEY=TARGET");
                        return 2;
                    }
                }
            }

            if cli.verbose > 0 {
                eprintln!("Using project root: {}", root_dir.display());
            }

            let mut builder = GraphBuilder::new(options);
            let tree = match builder.build(&file_path) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Analyze failed: {e}");
                    return 1;
                }
            };
            let summary = builder.summary();

            let rendered = match format {
                OutputFormat::Tree => crate::render::tree(&tree, &summary),
                OutputFormat::List => crate::render::list(&tree),
                OutputFormat::Json => match crate::render::json(&tree, &summary) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("JSON encode error: {e}");
                        return 1;
                    }
                },
                OutputFormat::Content => crate::render::content(&tree),
            };

            if let Some(out_path) = output {
                if let Err(e) = fs::write(&out_path, rendered) {
                    eprintln!("Failed to write output {out_path}: {e}");
                    return 1;
                }
                if !cli.quiet {
                    println!("Wrote {out_path}");
                }
            } else {
                println!("{rendered}");
            }
            0
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // The CLI may be invoked twice in-process from tests.
    let _ = builder.try_init();
}

fn upsert_alias(aliases: &mut Vec<(String, String)>, key: String, target: String) {
    if let Some(entry) = aliases.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = target;
    } else {
        aliases.push((key, target));
    }
}
