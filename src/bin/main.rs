use coordmap::{cli, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());
    let config = cli::load_config(&cli);
    telemetry::init(cli.verbose, config.logging.stdout_format);

    if let Err(e) = cli::run(cli, config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
