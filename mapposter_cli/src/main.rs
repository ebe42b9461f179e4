// Copyright 2025 the mapposter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `mapposter`: render a street-map poster with centered captions to SVG.
//!
//! Run with:
//! - `cargo run -p mapposter_cli -- "Berlin, Germany"`
//! - `cargo run -p mapposter_cli --features parley -- --paper a3 --mode block_centered Paris`
//!
//! Logging goes to stderr and honors `RUST_LOG`.

mod config;
mod gazetteer;
mod poster;
mod streets;
mod svg;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::PosterConfig;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid color {value:?}: {message}")]
    Color { value: String, message: String },
    #[error(transparent)]
    Layout(#[from] mapposter_layout::Error),
    #[error(transparent)]
    Streets(#[from] streets::StreetError),
}

fn usage() -> &'static str {
    "mapposter\n\
\n\
USAGE:\n\
  mapposter [OPTIONS] <place | \"lat, lon\">\n\
\n\
OPTIONS:\n\
  --config <path>           JSON config; flags override its values\n\
  --paper a3|a4             paper format (default a4)\n\
  --margin <mm>             page margin in millimeters (default 25)\n\
  --dpi <n>                 output resolution (default 300)\n\
  --mode map_centered|block_centered\n\
  --title <text>            caption text (default: the place name)\n\
  --no-coords               omit the coordinate caption\n\
  --padding-factor <f>      map-to-title gap, in title heights (default 0.3)\n\
  --between-factor <f>      title-to-coordinates gap, in title heights (default 0.5)\n\
  --network drive|walk|bike|all\n\
  --radius <m>              fetch radius in meters (default 5000, max 50000)\n\
  --out <path>              output SVG path (default poster.svg)\n\
  --help                    print this message\n"
}

/// Command-line overrides; unset fields keep the config value.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    location: Option<String>,
    paper: Option<String>,
    margin_mm: Option<f64>,
    dpi: Option<f64>,
    mode: Option<String>,
    title: Option<String>,
    no_coords: bool,
    padding_factor: Option<f64>,
    between_factor: Option<f64>,
    network_type: Option<String>,
    radius_m: Option<f64>,
    out: Option<String>,
}

impl Args {
    fn apply(self, config: &mut PosterConfig) {
        if let Some(v) = self.location {
            config.location = Some(v);
        }
        if let Some(v) = self.paper {
            config.paper = v;
        }
        if let Some(v) = self.margin_mm {
            config.margin_mm = v;
        }
        if let Some(v) = self.dpi {
            config.dpi = v;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        if let Some(v) = self.title {
            config.title = Some(v);
        }
        if self.no_coords {
            config.show_coords = false;
        }
        if let Some(v) = self.padding_factor {
            config.padding_factor = v;
        }
        if let Some(v) = self.between_factor {
            config.between_factor = v;
        }
        if let Some(v) = self.network_type {
            config.network_type = v;
        }
        if let Some(v) = self.radius_m {
            config.radius_m = v;
        }
        if let Some(v) = self.out {
            config.out = v;
        }
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    fn value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
        it.next().ok_or(CliError::Usage(usage()))
    }
    fn number<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
        value(it)?
            .trim()
            .parse::<f64>()
            .map_err(|_| CliError::Usage(usage()))
    }

    let mut args = Args::default();
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--config" => args.config = Some(PathBuf::from(value(&mut it)?)),
            "--paper" => args.paper = Some(value(&mut it)?.clone()),
            "--margin" => args.margin_mm = Some(number(&mut it)?),
            "--dpi" => args.dpi = Some(number(&mut it)?),
            "--mode" => args.mode = Some(value(&mut it)?.clone()),
            "--title" => args.title = Some(value(&mut it)?.clone()),
            "--no-coords" => args.no_coords = true,
            "--padding-factor" => args.padding_factor = Some(number(&mut it)?),
            "--between-factor" => args.between_factor = Some(number(&mut it)?),
            "--network" => args.network_type = Some(value(&mut it)?.clone()),
            "--radius" => args.radius_m = Some(number(&mut it)?),
            "--out" | "-o" => args.out = Some(value(&mut it)?.clone()),
            // Negative latitudes look like flags; only reject what cannot be coordinates.
            flag if flag.starts_with("--") => return Err(CliError::Usage(usage())),
            location => {
                if args.location.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.location = Some(location.to_string());
            }
        }
    }
    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let mut config = match &args.config {
        Some(path) => PosterConfig::load(path)?,
        None => PosterConfig::default(),
    };
    args.apply(&mut config);

    let poster = poster::render_poster(&config)?;
    std::fs::write(&config.out, &poster.svg).map_err(|source| CliError::Io {
        path: config.out.clone(),
        source,
    })?;
    tracing::info!(
        out = %config.out,
        center = %poster.center,
        map_bottom = poster.layout.map.y0,
        "wrote poster"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let argv: Vec<String> = std::env::args().collect();
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        core::iter::once("mapposter")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn flags_override_config() {
        let args = parse_args(&argv(&[
            "--paper",
            "A3",
            "--margin",
            "15",
            "--mode",
            "block_centered",
            "--no-coords",
            "Hamburg, Germany",
        ]))
        .unwrap();
        let mut config = PosterConfig::default();
        args.apply(&mut config);
        assert_eq!(config.paper, "A3");
        assert_eq!(config.margin_mm, 15.0);
        assert_eq!(config.mode, "block_centered");
        assert!(!config.show_coords);
        assert_eq!(config.location.as_deref(), Some("Hamburg, Germany"));
        assert_eq!(config.out, "poster.svg");
    }

    #[test]
    fn negative_coordinates_are_positional() {
        let args = parse_args(&argv(&["-33.87,151.21"])).unwrap();
        assert_eq!(args.location.as_deref(), Some("-33.87,151.21"));
    }

    #[test]
    fn bad_invocations_are_usage_errors() {
        let cases: [&[&str]; 5] = [
            &["--help"],
            &["--margin"],
            &["--dpi", "lots"],
            &["--frobnicate"],
            &["Berlin", "Paris"],
        ];
        for bad in cases {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn missing_config_file_reports_the_path() {
        let err = run(&argv(&["--config", "/nonexistent/poster.json", "Berlin"])).unwrap_err();
        match err {
            CliError::Io { path, .. } => assert_eq!(path, "/nonexistent/poster.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn writes_the_svg() {
        let out = std::env::temp_dir().join(format!("mapposter-test-{}.svg", std::process::id()));
        let out_str = out.display().to_string();
        run(&argv(&["--dpi", "72", "--out", &out_str, "Berlin"])).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        let _ = std::fs::remove_file(&out);
        assert!(svg.contains(">52.52° N, 13.40° E</text>"));
        assert!(svg.contains(">Berlin</text>"));
    }
}
