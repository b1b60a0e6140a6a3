use anyhow::{Context, Result};
use clap::Parser;
use headerset::cli::{Cli, OutputFormat};
use headerset::config::ResolverConfig;
use headerset::fs::HostFileSystem;
use headerset::{filelist, output, ResolutionContext, Warning};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

/// Apply command-line directives on top of the configured defaults
fn build_context<'a>(
    args: &Cli,
    config: &ResolverConfig,
    fs: &'a HostFileSystem,
) -> ResolutionContext<'a, HostFileSystem> {
    let mut ctx = ResolutionContext::from_config(config, fs);

    if let Some(install_name) = &args.install_name {
        ctx = ctx.with_install_name(install_name, args.dynamiclib || config.dynamic_library);
    } else if args.dynamiclib {
        ctx = ctx.with_framework_name(None);
    }

    for (class, paths) in args.extra_headers() {
        ctx = ctx.with_extra_headers(class, paths.iter().cloned());
    }
    for (class, patterns) in args.exclusions() {
        ctx = ctx.with_exclusions(class, patterns.iter().cloned());
    }
    for (class, path) in args.umbrellas() {
        ctx = ctx.with_umbrella(class, path.clone());
    }

    ctx
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => ResolverConfig::from_toml(path)?,
        None => ResolverConfig::default(),
    };

    let fs = HostFileSystem::new();
    let base = filelist::load_headers(&fs, &args.file_lists)
        .context("Failed to load header file lists")?;

    let ctx = build_context(&args, &config, &fs);
    let resolution = match ctx.resolve(base) {
        Ok(resolution) => resolution,
        Err(failure) => {
            print_warnings(&failure.warnings);
            return Err(failure.into());
        }
    };
    print_warnings(&resolution.warnings);

    match args.format {
        OutputFormat::Text => {
            print!("{}", output::render_text(&resolution, args.include_excluded));
        }
        OutputFormat::Json => {
            let json = output::render_json(&resolution, ctx.framework_name())
                .context("Failed to serialize resolution")?;
            println!("{}", json);
        }
    }

    Ok(())
}
