use colored::Colorize;
use ipmap::models::DisplayOptions;
use ipmap::output::print_set;
use ipmap::{build_set, read_config, SetTypeRegistry};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::io::Write;

/// Console logging used when `log4rs.yml` is missing.
fn init_default_logging() -> Result<(), Box<dyn Error>> {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    if log4rs::init_file("log4rs.yml", Default::default()).is_err() {
        init_default_logging()?;
    }
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = read_config(None)?;
    let registry = SetTypeRegistry::with_builtin();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for set_config in &config.sets {
        let set = build_set(&registry, set_config)
            .inspect_err(|e| log::error!("{} {}: {e}", "failed".on_red(), set_config.name))?;
        let options = DisplayOptions::for_netmask(set.header().netmask(), set_config.show_blocks);
        print_set(&set_config.name, &set_config.set_type, &set, options, &mut out)?;
        writeln!(out)?;
        set.destroy();
    }

    log::info!("#End main() {} sets", config.sets.len());
    Ok(())
}
