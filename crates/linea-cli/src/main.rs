use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;

use linea_cli::config::resolve_engine_config;
use linea_cli::input::{parse_basis, parse_matrix, parse_square_matrix};
use linea_cli::menu::run_menu;
use linea_cli::render::{
    render_change_of_basis, render_eigen, render_kernel_image, render_plane, render_task_error,
    Presenter, Style,
};
use linea_core::config::EngineConfig;
use linea_core::tasks::{change_of_basis, eigen_analysis, kernel_and_image, plane_basis};

fn matrix_arg(id: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(id)
        .help(help)
        .required(true)
        .allow_hyphen_values(true)
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .value_hint(ValueHint::Other)
}

fn coefficient_arg(id: &'static str) -> Arg {
    Arg::new(id)
        .help(format!("Coefficient {} of ax + by + cz = 0", id))
        .required(true)
        .allow_negative_numbers(true)
        .value_parser(clap::value_parser!(f64))
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("LINEA_LOG", "error,linea=info"))
        .init();

    let matches = Command::new("linea")
        .version(clap::crate_version!())
        .about("Linear algebra console: subspaces, change of basis and eigenvalues")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("style")
                .long("style")
                .help("Output style")
                .global(true)
                .value_parser(["plain", "decorated"])
                .default_value("decorated"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to an engine configuration file (JSON)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("plane")
                .about("Basis and dimension of the plane ax + by + cz = 0 in R^3")
                .arg(coefficient_arg("a"))
                .arg(coefficient_arg("b"))
                .arg(coefficient_arg("c")),
        )
        .subcommand(
            Command::new("kernel")
                .about("Kernel and image of the linear map given by a matrix")
                .arg(matrix_arg(
                    "matrix",
                    'm',
                    "Matrix in canonical bases, rows separated by ';', e.g. \"1 2; 3 4\"",
                )),
        )
        .subcommand(
            Command::new("change-basis")
                .about("Matrix of a linear map with respect to bases beta and gamma")
                .arg(matrix_arg(
                    "matrix",
                    'm',
                    "Matrix of T: V -> W in canonical bases",
                ))
                .arg(matrix_arg(
                    "beta",
                    'b',
                    "Basis of V, one vector per ';'-separated group",
                ))
                .arg(matrix_arg(
                    "gamma",
                    'g',
                    "Basis of W, one vector per ';'-separated group",
                )),
        )
        .subcommand(
            Command::new("eigen")
                .about("Eigenvalues and eigenspaces of a 2x2 or 3x3 operator")
                .arg(matrix_arg("matrix", 'm', "Square matrix of the operator")),
        )
        .subcommand(Command::new("menu").about("Interactive console reading from stdin"))
        .subcommand(Command::new("config").about("Print the effective engine configuration"))
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let style: Style = matches
        .get_one::<String>("style")
        .map(|s| s.parse::<Style>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(Style::Decorated);
    let config = resolve_engine_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let presenter = style.presenter();

    match matches.subcommand() {
        Some(("plane", sub_m)) => handle_plane(sub_m, presenter.as_ref(), &config),
        Some(("kernel", sub_m)) => handle_kernel(sub_m, presenter.as_ref(), &config),
        Some(("change-basis", sub_m)) => handle_change_basis(sub_m, presenter.as_ref(), &config),
        Some(("eigen", sub_m)) => handle_eigen(sub_m, presenter.as_ref(), &config),
        Some(("menu", _)) => handle_menu(presenter.as_ref(), &config),
        Some(("config", _)) => handle_config(&config),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn matrix_value<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing --{}", id))
}

fn handle_plane(matches: &ArgMatches, presenter: &dyn Presenter, config: &EngineConfig) -> Result<()> {
    let mut coefficients = [0.0; 3];
    for (slot, id) in coefficients.iter_mut().zip(["a", "b", "c"]) {
        *slot = matches
            .get_one::<f64>(id)
            .copied()
            .with_context(|| format!("missing coefficient {}", id))?;
    }
    let [a, b, c] = coefficients;
    log::info!("[linea] Plane basis for {}x + {}y + {}z = 0", a, b, c);

    let plane = plane_basis(a, b, c, config.eps);
    render_plane(presenter, &mut io::stdout().lock(), &plane)?;
    Ok(())
}

fn handle_kernel(matches: &ArgMatches, presenter: &dyn Presenter, config: &EngineConfig) -> Result<()> {
    let a = parse_matrix(matrix_value(matches, "matrix")?).context("Invalid --matrix")?;
    log::info!("[linea] Kernel and image of a {}x{} map", a.nrows(), a.ncols());

    let result = kernel_and_image(&a, config.eps);
    render_kernel_image(presenter, &mut io::stdout().lock(), &result)?;
    Ok(())
}

fn handle_change_basis(
    matches: &ArgMatches,
    presenter: &dyn Presenter,
    config: &EngineConfig,
) -> Result<()> {
    let a = parse_matrix(matrix_value(matches, "matrix")?).context("Invalid --matrix")?;
    let p_beta = parse_basis(matrix_value(matches, "beta")?).context("Invalid --beta")?;
    let p_gamma = parse_basis(matrix_value(matches, "gamma")?).context("Invalid --gamma")?;
    log::info!(
        "[linea] Change of basis for a {}x{} map",
        a.nrows(),
        a.ncols()
    );

    match change_of_basis(&a, &p_beta, &p_gamma, config.eps) {
        Ok(result) => {
            render_change_of_basis(presenter, &mut io::stdout().lock(), &a, &result)?;
            Ok(())
        }
        Err(e) => {
            log::error!("Change of basis failed: {}", e);
            render_task_error(presenter, &mut io::stderr().lock(), &e)?;
            std::process::exit(1)
        }
    }
}

fn handle_eigen(matches: &ArgMatches, presenter: &dyn Presenter, config: &EngineConfig) -> Result<()> {
    let a = parse_square_matrix(matrix_value(matches, "matrix")?).context("Invalid --matrix")?;
    log::info!("[linea] Eigen analysis of a {}x{} operator", a.nrows(), a.ncols());

    match eigen_analysis(&a, config) {
        Ok(analysis) => {
            render_eigen(presenter, &mut io::stdout().lock(), &a, &analysis)?;
            Ok(())
        }
        Err(e) => {
            log::error!("Eigen analysis failed: {}", e);
            render_task_error(presenter, &mut io::stderr().lock(), &e)?;
            std::process::exit(1)
        }
    }
}

fn handle_menu(presenter: &dyn Presenter, config: &EngineConfig) -> Result<()> {
    log::info!("[linea] Starting interactive console");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu(stdin.lock(), stdout.lock(), presenter, config).context("Console session failed")
}

fn handle_config(config: &EngineConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json)?;
    Ok(())
}
