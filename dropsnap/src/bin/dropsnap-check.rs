use anyhow::Result;
use clap::{arg, command};
use dropsnap::utils::file_handler::load_config_file;
use dropsnap::utils::log::setup_logging;
use dropsnap_core::{ActionTable, DisplayServer};
use std::path::PathBuf;
use xlib_display_server::XlibDisplayServer;

fn main() -> Result<()> {
    let matches = command!("dropsnap Check")
        .about("Checks the configuration file")
        .help_template(dropsnap::utils::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs received configuration file."),
            arg!([INPUT] "Sets the input file to use. Uses the default config file otherwise."),
        ])
        .get_matches();

    let config_file = matches.get_one::<String>("INPUT").map(PathBuf::from);
    let verbose = matches.get_flag("verbose");

    println!(
        "\x1b[0;94m::\x1b[0m dropsnap version: {}",
        env!("CARGO_PKG_VERSION")
    );

    println!("\x1b[0;94m::\x1b[0m Loading configuration . . .");
    match load_config_file(config_file) {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            if verbose {
                dbg!(&config);
                // Shows what the display server does during the window manager check.
                if let Err(err) = setup_logging(&config.log_level) {
                    println!("Logging unavailable: {err}");
                }
            }
            let problems = config.check(verbose);
            if problems.is_empty() {
                println!("\x1b[0;92m    -> Configuration OK \x1b[0m");
            }
            for problem in problems {
                println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m {problem} \x1b[0m");
            }
        }
        Err(e) => {
            println!("Configuration failed. Reason: {e:?}");
        }
    }

    println!("\x1b[0;94m::\x1b[0m Checking window manager . . .");
    check_window_manager(verbose);

    println!("\x1b[0;94m::\x1b[0m Available drop zone actions:");
    for name in ActionTable::default().names() {
        println!("    {name}");
    }

    Ok(())
}

fn check_window_manager(verbose: bool) {
    let server = match XlibDisplayServer::new() {
        Ok(server) => server,
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m {err} \x1b[0m");
            return;
        }
    };
    if !server.supports_moveresize() {
        println!("\x1b[1;93mWARN: The window manager does not advertise _NET_MOVERESIZE_WINDOW.\x1b[0m");
    }
    match server.managed_windows() {
        Ok(windows) => {
            if verbose {
                println!(":: Managed windows: {windows:?}");
            }
            println!(
                "\x1b[0;92m    -> Window manager OK ({} managed windows) \x1b[0m",
                windows.len()
            );
        }
        Err(err) => {
            println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m Cannot read _NET_CLIENT_LIST: {err} \x1b[0m");
        }
    }
}
