use anyhow::{Context, Result};
use clap::Parser;
use leanwm_core::Manager;
use std::path::PathBuf;
use x11rb_display_server::{X11rbDisplayServer, X11rbWindowHandle};

/// A small weighted-tiling window manager for X11.
#[derive(Parser, Debug)]
#[command(version, about, help_template = leanwm::utils::get_help_template())]
struct Args {
    /// Configuration file to use instead of `$XDG_CONFIG_HOME/leanwm/config.toml`.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,

    /// Print the parsed configuration when checking.
    #[arg(short, long, requires = "check")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.check {
        let config = leanwm::load(args.config.as_deref())?;
        config.check(args.verbose);
        return config.validate();
    }

    leanwm::utils::log::setup_logging()?;
    tracing::info!("leanwm booting...");

    let config = leanwm::load(args.config.as_deref())?;
    config.validate().context("invalid configuration")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("couldn't init Tokio runtime")?;
    // The display server registers its socket with the reactor while it is built.
    let _rt_guard = rt.enter();

    let manager = Manager::<X11rbWindowHandle, leanwm::Config, X11rbDisplayServer>::new(config)
        .context("couldn't take over the display")?;
    manager.register_child_hook();
    rt.block_on(manager.event_loop());

    tracing::info!("Completed");
    Ok(())
}
