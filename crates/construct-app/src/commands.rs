//! Runs one CLI command against the application shell

use std::{
    io::{BufRead as _, Write as _},
    path::Path,
};

use anyhow::Context as _;
use construct_client_core::{Client, DataApi, KeyValueStorage, MemoryStorage, MockApi};
use construct_shared::{
    req_args::{LoginReqArgs, RegisterReqArgs},
    route::Route,
};
use secrecy::SecretString;
use tracing::info;

use crate::{
    cli::{Cli, Command},
    configuration::Configuration,
    App,
};

#[tracing::instrument(skip(cli, configuration))]
pub async fn run(cli: Cli, configuration: Configuration) -> anyhow::Result<()> {
    let server_address = cli
        .server
        .clone()
        .unwrap_or_else(|| configuration.client.server_address.clone());
    let storage: Box<dyn KeyValueStorage> = if cli.no_persist || !configuration.storage.persist {
        Box::new(MemoryStorage::default())
    } else {
        Box::new(construct_client_core::FileStorage::new(
            configuration.storage.path.clone(),
        ))
    };
    let client = Client::new(server_address, storage);
    if cli.use_mock_data || configuration.client.use_mock_data {
        info!("using built in records");
        execute(App::new(client, MockApi::new()), cli.command).await
    } else {
        execute(App::new(client.clone(), client), cli.command).await
    }
}

async fn execute<A: DataApi>(mut app: App<A>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = password_or_prompt(password, "Password")?;
            if !app.submit_login(LoginReqArgs::new(username, password)) {
                println!("Already logged in, log out first.");
            }
        }
        Command::Register {
            username,
            email,
            password,
            password2,
        } => {
            let password = password_or_prompt(password, "Password")?;
            let password2 = password_or_prompt(password2, "Confirm Password")?;
            if !app.submit_register(RegisterReqArgs::new(username, email, password, password2)) {
                println!("Already logged in, log out first.");
            }
        }
        Command::Logout => app.logout(),
        Command::Status => {
            let session = app.client().session();
            match session.username() {
                Some(username) => println!("Logged in as {username}"),
                None => println!("Not logged in"),
            }
            return Ok(());
        }
        Command::Open { path } => app.navigate(Route::parse(&path)),
        Command::InitiatePayment { amount, method } => {
            if !app.submit_payment(&amount, method) {
                println!("Please log in to initiate payments.");
            }
        }
        Command::UploadImage { file } => {
            let selection = file.as_deref().map(read_selection).transpose()?;
            if !app.submit_image(selection) {
                println!("Please log in to upload images.");
            }
        }
    }
    app.settle().await;
    println!("{}\n\n{}", app.route(), app.screen());
    Ok(())
}

fn read_selection(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{path:?} does not name a file"))?;
    Ok((name, bytes))
}

fn password_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<SecretString> {
    if let Some(value) = value {
        return Ok(value.into());
    }
    print!("{prompt}: ");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string().into())
}
