use gql_wait::{run_wait, Config, Error, Inputs, WaitOptions};
use log::{error, info};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(flatten)]
    inputs: Inputs,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    #[structopt(name = "wait")]
    /// Poll a GraphQL query until its response satisfies a condition
    Wait(WaitOptions),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("gql-wait starting");

    // Bad inputs are fatal before anything is sent to GitHub
    let config = Config::resolve(&opts.inputs).map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!("using {:?}", config);

    match opts.command {
        Command::Wait(options) => {
            let data = run_wait(&config, &options).await.map_err(|e| {
                error!("{}", e);
                e
            })?;
            println!("{}", serde_json::to_string_pretty(&data)?);

            Ok(())
        }
    }
}
