use std::process::ExitCode;

use qingstor::{
    model::pairs::{Credential, Endpoint, Pair},
    Storager,
};
use tracing::{error, info, span, Instrument, Level};

fn parse_args() -> Result<Vec<Pair>, qingstor::model::error::Error> {
    let matches = clap::Command::new("qingstor-inspect")
        .about("Resolve a QingStor bucket and print the storager it maps to")
        .arg(clap::Arg::new("BUCKET").required(true).index(1))
        .arg(
            clap::Arg::new("credential")
                .long("credential")
                .env("QINGSTOR_CREDENTIAL")
                .required(true)
                .help("hmac:<access_key>:<secret_key>"),
        )
        .arg(
            clap::Arg::new("endpoint")
                .long("endpoint")
                .help("<http|https>:<host>[:<port>]"),
        )
        .arg(clap::Arg::new("location").long("location"))
        .arg(clap::Arg::new("work-dir").long("work-dir"))
        .arg(
            clap::Arg::new("disable-uri-cleaning")
                .long("disable-uri-cleaning")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let mut pairs = Vec::new();

    if let Some(cred) = matches.get_one::<String>("credential") {
        pairs.push(Pair::Credential(Credential::parse(cred)?));
    }
    if let Some(ep) = matches.get_one::<String>("endpoint") {
        pairs.push(Pair::Endpoint(Endpoint::parse(ep)?));
    }
    if let Some(bucket) = matches.get_one::<String>("BUCKET") {
        pairs.push(Pair::Name(bucket.clone()));
    }
    if let Some(location) = matches.get_one::<String>("location") {
        pairs.push(Pair::Location(location.clone()));
    }
    if let Some(work_dir) = matches.get_one::<String>("work-dir") {
        pairs.push(Pair::WorkDir(work_dir.clone()));
    }
    if matches.get_flag("disable-uri-cleaning") {
        pairs.push(Pair::DisableUriCleaning(true));
    }

    Ok(pairs)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().json().init();

    let span = span!(Level::INFO, "main", context = "main");

    async {
        info!("called");

        let pairs = match parse_args() {
            Err(err) => {
                error!(error_message=%err, error_group="parse_args");
                return ExitCode::FAILURE;
            }
            Ok(pairs) => pairs,
        };

        let (srv, store) = match qingstor::new(&pairs).await {
            Err(err) => {
                error!(error_message=%err, error_group="new_storager");
                return ExitCode::FAILURE;
            }
            Ok(v) => v,
        };

        let meta = store.metadata();
        info!(servicer=%srv, storager=%store, "resolved");
        println!("{}", srv);
        println!("{}", store);
        println!("name={} location={} work_dir={}", meta.name, meta.location, meta.work_dir);

        ExitCode::SUCCESS
    }
    .instrument(span)
    .await
}
