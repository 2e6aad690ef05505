use anyhow::{bail, Context, Result};
use azrm::arm::http::format_arm_error;
use azrm::config::Config;
use azrm::resourceids::{ResourceGroupId, SubscriptionId};
use azrm::services::apicenter::v2024_03_01::apidefinitions::{self, DefinitionId, VersionId};
use azrm::services::resources::v2022_09_01::{providers, resourcegroups};
use azrm::services::storage::v2023_01_01::storageaccounts::{
    self, StorageAccountCheckNameAvailabilityParameters, StorageAccountId,
};
use azrm::{ArmClient, IdRegistry, ResourceId};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Command line client for Azure Resource Manager
#[derive(Parser, Debug)]
#[command(name = "azrm", version = azrm::VERSION, about, long_about = None)]
struct Args {
    /// Azure subscription to use
    #[arg(short, long, global = true)]
    subscription: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and normalise resource IDs
    #[command(subcommand)]
    Id(IdCommand),
    /// Resource groups in the subscription
    #[command(subcommand)]
    Groups(GroupsCommand),
    /// Storage accounts
    #[command(subcommand)]
    Storage(StorageCommand),
    /// Resource provider registrations
    #[command(subcommand)]
    Providers(ProvidersCommand),
    /// API Center definitions
    #[command(subcommand)]
    Apicenter(ApiCenterCommand),
    /// Persisted configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum IdCommand {
    /// List the resource ID types this build knows
    Types,
    /// Parse an ID as the given type
    Parse {
        id_type: String,
        id: String,
        #[arg(long)]
        insensitive: bool,
    },
    /// Rewrite an ID's fixed segments in canonical casing
    Recase { id: String },
}

#[derive(Subcommand, Debug)]
enum GroupsCommand {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Show {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum StorageCommand {
    List {
        #[arg(short = 'g', long)]
        resource_group: Option<String>,
    },
    /// Show a storage account by ID
    Show { id: String },
    CheckName { name: String },
}

#[derive(Subcommand, Debug)]
enum ProvidersCommand {
    Register { namespace: String },
}

#[derive(Subcommand, Debug)]
enum ApiCenterCommand {
    /// List the definitions under an API version ID
    Definitions { version_id: String },
    /// Export a definition's specification
    Export { definition_id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    SetSubscription { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azrm {} started with log level: {:?}", azrm::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azrm").join("azrm.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azrm").join("azrm.log");
    }
    PathBuf::from("azrm.log")
}

fn print<T: Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {err:#}");
            None
        }
    };

    if let Err(err) = run(args).await {
        match err.downcast_ref::<azrm::Error>() {
            Some(api_err) => eprintln!("Error: {}", format_arm_error(api_err)),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();
    if let Some(subscription) = &args.subscription {
        config.subscription_id = Some(subscription.clone());
    }

    match args.command {
        Command::Id(command) => run_id(command, args.output),
        Command::Config(ConfigCommand::SetSubscription { id }) => {
            config.set_subscription(&id)?;
            tracing::info!("Default subscription set to {}", id);
            println!("Default subscription set to {id}");
            Ok(())
        }
        command => {
            let client = ArmClient::from_config(&config).context("Failed to initialise the ARM client")?;
            run_remote(command, &client, &config, args.output).await
        }
    }
}

fn run_id(command: IdCommand, output: OutputFormat) -> Result<()> {
    let registry = IdRegistry::with_known_ids();

    match command {
        IdCommand::Types => {
            let names: Vec<&str> = registry.names().collect();
            print(output, &names)
        }
        IdCommand::Parse {
            id_type,
            id,
            insensitive,
        } => {
            let result = registry.parse_as(&id_type, &id, insensitive)?;
            print(output, &result.to_map())
        }
        IdCommand::Recase { id } => {
            println!("{}", registry.recase(&id));
            Ok(())
        }
    }
}

async fn run_remote(command: Command, client: &ArmClient, config: &Config, output: OutputFormat) -> Result<()> {
    let subscription = || config.effective_subscription().map(SubscriptionId::new);

    match command {
        Command::Groups(GroupsCommand::List { filter }) => {
            let groups = resourcegroups::ResourceGroupsClient::new(client.clone());
            let options = resourcegroups::ListOperationOptions { filter, top: None };
            let result = groups.list_complete(&subscription()?, options).await?;
            print(output, &result.items)
        }
        Command::Groups(GroupsCommand::Show { name }) => {
            let groups = resourcegroups::ResourceGroupsClient::new(client.clone());
            let id = ResourceGroupId::new(subscription()?.subscription_id, name);
            let response = groups.get(&id).await?;
            print(output, &response.model)
        }
        Command::Storage(StorageCommand::List { resource_group }) => {
            let accounts = storageaccounts::StorageAccountsClient::new(client.clone());
            let result = match resource_group {
                Some(group) => {
                    let id = ResourceGroupId::new(subscription()?.subscription_id, group);
                    accounts.list_by_resource_group_complete(&id).await?
                }
                None => accounts.list_complete(&subscription()?).await?,
            };
            print(output, &result.items)
        }
        Command::Storage(StorageCommand::Show { id }) => {
            let id = StorageAccountId::parse_insensitively(&id)?;
            let accounts = storageaccounts::StorageAccountsClient::new(client.clone());
            let response = accounts
                .get_properties(&id, storageaccounts::GetPropertiesOperationOptions::default())
                .await?;
            print(output, &response.model)
        }
        Command::Storage(StorageCommand::CheckName { name }) => {
            let accounts = storageaccounts::StorageAccountsClient::new(client.clone());
            let input = StorageAccountCheckNameAvailabilityParameters::new(name);
            let response = accounts.check_name_availability(&subscription()?, &input).await?;
            print(output, &response.model)
        }
        Command::Providers(ProvidersCommand::Register { namespace }) => {
            let provider_client = providers::ProvidersClient::new(client.clone());
            let id = providers::SubscriptionProviderId::new(subscription()?.subscription_id, namespace);
            let response = provider_client.register(&id).await?;
            print(output, &response.model)
        }
        Command::Apicenter(ApiCenterCommand::Definitions { version_id }) => {
            let id = VersionId::parse_insensitively(&version_id)?;
            let definitions = apidefinitions::ApiDefinitionsClient::new(client.clone());
            let result = definitions
                .list_complete(&id, apidefinitions::ListOperationOptions::default())
                .await?;
            print(output, &result.items)
        }
        Command::Apicenter(ApiCenterCommand::Export { definition_id }) => {
            let id = DefinitionId::parse_insensitively(&definition_id)?;
            let definitions = apidefinitions::ApiDefinitionsClient::new(client.clone());
            let result = definitions.export_specification_then_poll(&id).await?;
            print(output, &result)
        }
        Command::Id(_) | Command::Config(_) => bail!("command does not need the API"),
    }
}
