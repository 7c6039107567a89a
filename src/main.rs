use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, Level, LevelFilter};

use nitfio::utils::logger::Logger;
use nitfio::commands::{CommandFactory, NitfioCommandFactory};
use nitfio::segment::SegmentHandlerFactory;

fn main() {
    let matches = ClapCommand::new("nitfio")
        .version("0.1.0")
        .author("Maurice Schilpp")
        .about("Stream bands and segments out of NITF-style imagery files")
        .arg(
            Arg::new("input")
                .help("Input file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write the log to this file instead of the console")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar while copying")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("segment")
                .short('s')
                .long("segment")
                .help("Read the segment at OFFSET:LENGTH (decimal or 0x hex)")
                .value_name("OFFSET:LENGTH")
                .conflicts_with_all(["extract-band", "copy-blocks"])
                .required(false),
        )
        .arg(
            Arg::new("handler")
                .long("handler")
                .help(format!(
                    "Segment type handler ({})",
                    SegmentHandlerFactory::available_names().join(", ")
                ))
                .value_name("NAME")
                .requires("segment")
                .required(false),
        )
        .arg(
            Arg::new("extract-band")
                .short('b')
                .long("extract-band")
                .help("Extract band N of a raw pixel file")
                .value_name("N")
                .conflicts_with("copy-blocks")
                .required(false),
        )
        .arg(
            Arg::new("layout")
                .long("layout")
                .help("TOML file with a [layout] table")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("bands")
                .long("bands")
                .help("Number of bands in the raw file")
                .value_name("COUNT")
                .required(false),
        )
        .arg(
            Arg::new("bytes-per-pixel")
                .long("bytes-per-pixel")
                .help("Bytes per pixel of one band")
                .value_name("BYTES")
                .required(false),
        )
        .arg(
            Arg::new("start")
                .long("start")
                .help("File offset of the first pixel")
                .value_name("OFFSET")
                .required(false),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .help("Rows per band")
                .value_name("ROWS")
                .required(false),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .help("Columns per band")
                .value_name("COLUMNS")
                .required(false),
        )
        .arg(
            Arg::new("interleave")
                .long("interleave")
                .help("Band organization (pixel or band)")
                .value_name("MODE")
                .required(false),
        )
        .arg(
            Arg::new("swap")
                .long("swap")
                .help("Swap the byte order of every sample")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("png")
                .long("png")
                .help("Save the extracted band as a WIDTHxHEIGHT grayscale image")
                .value_name("WxH")
                .requires("extract-band")
                .required(false),
        )
        .arg(
            Arg::new("copy-blocks")
                .long("copy-blocks")
                .help("Copy uncompressed blocks verbatim")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("blocks")
                .long("blocks")
                .help("Block grid as ROWSxCOLUMNS")
                .value_name("RxC")
                .requires("copy-blocks")
                .required(false),
        )
        .arg(
            Arg::new("block-size")
                .long("block-size")
                .help("Size of one block in bytes")
                .value_name("BYTES")
                .requires("copy-blocks")
                .required(false),
        )
        .arg(
            Arg::new("data-offset")
                .long("data-offset")
                .help("File offset of the first block")
                .value_name("OFFSET")
                .requires("copy-blocks")
                .required(false),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            let level = if verbose { Level::Debug } else { Level::Info };
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => {
            let filter = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
            env_logger::Builder::new()
                .filter_level(filter)
                .parse_default_env()
                .init();
        }
    }

    let factory = NitfioCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
