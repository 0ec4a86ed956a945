use cazcheck::cli::Cli;
use cazcheck::config::{Config, ConfigLoader};
use cazcheck::utils::{block_on, logging};
use cazcheck::{GatewayEvent, Handler};
use std::fs;
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    logging::init();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if cli.mileage_rate {
        config.enable_mileage_rate = true;
    }

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    // Fails here, before any request, when the MOT key is missing
    let handler = Handler::new(config)?;

    let event = match (&cli.vrn, &cli.event) {
        (Some(vrn), _) => GatewayEvent::for_vrn(vrn.clone()),
        (None, Some(path)) => serde_json::from_str(&fs::read_to_string(path)?)?,
        (None, None) => {
            let stdin = io::stdin();
            serde_json::from_reader(stdin.lock())?
        }
    };

    let response = block_on(handler.handle(&event))??;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
