use super::render::{print_entries, print_messages};
use super::setup::{Cli, Commands};
use clap::{CommandFactory, Parser};
use startupapp::api::{AddRequest, OpenTarget, Result, StartupError};
use startupapp::init::{initialize, StartupContext};
use std::path::{Path, PathBuf};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // Bare invocation: show usage and fail, there is nothing sensible to default to.
        let _ = Cli::command().write_help(&mut std::io::stderr());
        eprintln!();
        std::process::exit(1);
    };

    let mut ctx = initialize(cli.config_dir).map_err(failed("startup"))?;
    tracing::debug!(
        config_dir = %ctx.config_dir.display(),
        backend = %ctx.config.backend,
        "context initialized"
    );

    match command {
        Commands::Add {
            name,
            stdout,
            stderr,
            command,
        } => handle_add(&mut ctx, command, name, stdout, stderr),
        Commands::List => handle_list(&ctx),
        Commands::Remove { id } => handle_remove(&mut ctx, &id),
        Commands::Open { artifacts } => handle_open(&ctx, artifacts),
        Commands::Doctor { force } => handle_doctor(&ctx, force),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prefixes an error with the operation that produced it.
fn failed(operation: &'static str) -> impl Fn(StartupError) -> StartupError {
    move |e| StartupError::Api(format!("{} failed: {}", operation, e))
}

fn handle_add(
    ctx: &mut StartupContext,
    command: Vec<String>,
    name: Option<String>,
    stdout: Option<PathBuf>,
    stderr: Option<PathBuf>,
) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| failed("add")(e.into()))?;

    let mut request = AddRequest::new(command.join(" "));
    request.name = name;
    request.stdout = stdout.map(|p| absolutize(&cwd, p));
    request.stderr = stderr.map(|p| absolutize(&cwd, p));

    let result = ctx.api.add(request).map_err(failed("add"))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &StartupContext) -> Result<()> {
    let result = ctx.api.list().map_err(failed("list"))?;
    print_entries(&result.listed_entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(ctx: &mut StartupContext, id: &str) -> Result<()> {
    let result = ctx.api.remove(id).map_err(failed("remove"))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_open(ctx: &StartupContext, artifacts: bool) -> Result<()> {
    let target = if artifacts {
        OpenTarget::Artifacts
    } else {
        OpenTarget::Registry
    };
    let result = ctx.api.open(target).map_err(failed("open"))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &StartupContext, force: bool) -> Result<()> {
    let result = ctx.api.doctor(force).map_err(failed("doctor"))?;
    print_messages(&result.messages);
    Ok(())
}

/// Output paths are written into login items that run from another directory.
fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
