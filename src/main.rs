use clap::Parser;
use docgen::cli::{print_error, run, Args};

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper internals are noisy at debug
    builder.filter_module("hyper", log::LevelFilter::Warn);
    builder.filter_module("reqwest", log::LevelFilter::Warn);
    builder.target(env_logger::Target::Stderr).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env must be loaded before clap reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args);

    let result = match args.to_config() {
        Ok(config) => run(&config, args.dry_run).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
