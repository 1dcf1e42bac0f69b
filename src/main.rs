use clap::{Arg, ArgGroup, Command};
use log::LevelFilter;
use rand::rngs::OsRng;
use rsa_lab::ops;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("rsa_lab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("textbook RSA: key generation, file encryption, Fermat factorization")
        .arg(
            Arg::new("loglevel")
                .long("loglevel")
                .short('l')
                .value_parser(["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])
                .default_value("WARNING")
                .help("set the logging level"),
        )
        .arg(
            Arg::new("keygen")
                .long("keygen")
                .short('k')
                .value_name("KEY_LENGTH")
                .value_parser(clap::value_parser!(u64))
                .help("generate new keys with the given length"),
        )
        .arg(
            Arg::new("encrypt")
                .long("encrypt")
                .short('e')
                .value_name("FILE")
                .help("file to encrypt"),
        )
        .arg(
            Arg::new("decrypt")
                .long("decrypt")
                .short('d')
                .value_name("FILE")
                .help("file to decrypt"),
        )
        .arg(
            Arg::new("crack")
                .long("crack")
                .short('c')
                .value_name("MODULUS")
                .help("RSA modulus to factor with the Fermat attack"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .short('m')
                .value_name("TRIES")
                .value_parser(clap::value_parser!(u64))
                .requires("crack")
                .help("maximum number of tries for --crack (default: unlimited)"),
        )
        .group(
            ArgGroup::new("action")
                .args(["keygen", "encrypt", "decrypt", "crack"])
                .required(true),
        )
        .get_matches();

    let level = match matches.get_one::<String>("loglevel").map(String::as_str) {
        Some("DEBUG") => LevelFilter::Debug,
        Some("INFO") => LevelFilter::Info,
        Some("ERROR") | Some("CRITICAL") => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Key files live in the working directory, as does the in/out convention
    let key_dir = Path::new(".");

    if let Some(bits) = matches.get_one::<u64>("keygen") {
        ops::save_keys(*bits, key_dir, &mut OsRng)?;
    } else if let Some(file) = matches.get_one::<String>("encrypt") {
        ops::encrypt_file(Path::new(file), key_dir)?;
    } else if let Some(file) = matches.get_one::<String>("decrypt") {
        ops::decrypt_file(Path::new(file), key_dir)?;
    } else if let Some(modulus) = matches.get_one::<String>("crack") {
        let max_tries = matches.get_one::<u64>("max").copied();
        let factored = ops::crack(modulus, max_tries)?;
        println!(
            "Success! p = {}, q = {}, tries = {}",
            factored.p, factored.q, factored.tries
        );
    }

    Ok(())
}
