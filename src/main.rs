use clap::Parser;
use color_eyre::Result;
use eyre::WrapErr as _;
use tracing::info;
use varnish_statsd::{
    init_logging,
    parse_config,
    Args,
    Scheduler,
    VarnishCollector,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    info!("Starting varnish-statsd...");

    let config = parse_config(&args.config).wrap_err("cannot load configuration")?;
    config.lint();
    info!(
        varnish_url = %config.varnish_url,
        statsd_addr = %config.statsd_addr,
        prefix = %config.statsd_prefix,
        "configuration loaded"
    );

    let interval = config.sleep_period();
    let scheduler = Scheduler::new(VarnishCollector::new(config), interval);
    match scheduler.run().await? {}
}
