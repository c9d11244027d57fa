// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Prereqmap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prereqmap CLI entrypoint.
//!
//! Reads a scene file (or stdin with `-`), routes every prerequisite edge and
//! prints the layout document as JSON on stdout.

use std::error::Error;
use std::io::{self, Read};
use std::path::Path;

use prereqmap::config::SelectionPolicy;
use prereqmap::scene::{load_config, scene_schema, LayoutDocument, Scene, SceneError};

const LOG_ENV: &str = "PREREQMAP_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <scene.json|-> [--select <id>] [--policy node|neighbors] [--config <path>] [--pretty]\n  {program} --schema [--pretty]\n\nUse `-` to read the scene from stdin.\n--select and --policy override the scene's selection and selection policy.\n--config replaces the scene's layout config with a standalone JSON file.\n\nSet {LOG_ENV} (e.g. `{LOG_ENV}=debug`) to log degradations on stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    scene: Option<String>,
    select: Option<String>,
    policy: Option<SelectionPolicy>,
    config: Option<String>,
    pretty: bool,
    schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--select" => {
                if options.select.is_some() {
                    return Err(());
                }
                options.select = Some(args.next().ok_or(())?);
            }
            "--policy" => {
                if options.policy.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.policy = Some(raw.parse().map_err(|_| ())?);
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--pretty" => {
                if options.pretty {
                    return Err(());
                }
                options.pretty = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            "-" => {
                if options.scene.is_some() {
                    return Err(());
                }
                options.scene = Some(arg);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.scene.is_some() {
                    return Err(());
                }
                options.scene = Some(arg);
            }
        }
    }

    if options.schema {
        let layout_flags = options.scene.is_some()
            || options.select.is_some()
            || options.policy.is_some()
            || options.config.is_some();
        if layout_flags {
            return Err(());
        }
    } else if options.scene.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn read_scene(location: &str) -> Result<Scene, SceneError> {
    if location == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|source| SceneError::Io { path: "-".into(), source })?;
        return Scene::from_json_str(&input);
    }
    Scene::load(Path::new(location))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "prereqmap".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        if options.schema {
            println!("{}", to_json(&scene_schema(), options.pretty)?);
            return Ok(());
        }

        let mut scene = read_scene(options.scene.as_deref().unwrap_or("-"))?;
        if let Some(path) = options.config.as_deref() {
            scene.config = load_config(Path::new(path))?;
        }
        if let Some(policy) = options.policy {
            scene.config.selection_policy = policy;
        }
        if options.select.is_some() {
            scene.selection = options.select;
        }

        let layout = scene.compute();
        if !layout.skipped.is_empty() {
            tracing::info!(skipped = layout.skipped.len(), "edges without both endpoints");
        }

        let document = LayoutDocument::new(&layout, &scene.config.theme);
        println!("{}", to_json(&document, options.pretty)?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("prereqmap: {err}");
        std::process::exit(1);
    }
}
