use {
    crate::{config::Config, home_directory::HomeDirectory},
    algofi_client::{HttpClient, Manager},
    algofi_types::{Address, AppId, DecodedState},
    anyhow::{anyhow, ensure},
    clap::{Parser, Subcommand},
    colored_json::ToColoredJson,
    serde::Serialize,
};

#[derive(Parser)]
pub struct QueryCmd {
    /// Manager application id [default: `manager.app_id` from app.toml]
    #[arg(long, global = true)]
    app_id: Option<AppId>,

    #[command(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    /// The manager's decoded global state
    Manager,
    /// A single decoded global field
    Field {
        /// Logical field name, e.g. `rewards_amount`
        name: String,
    },
    /// The storage account linked to a user account
    Storage {
        /// User account address
        account: Address,
    },
    /// A user's decoded position fields
    User {
        /// User account address
        account: Address,
    },
}

#[derive(Serialize)]
struct ManagerSummary<'a> {
    app_id: AppId,
    address: Address,
    state: &'a DecodedState,
    rewards_asset_ids: Vec<u64>,
}

#[derive(Serialize)]
struct StorageSummary {
    account: Address,
    storage_address: Address,
}

impl QueryCmd {
    pub async fn run(self, app_dir: HomeDirectory, cfg: Config) -> anyhow::Result<()> {
        let app_id = self.app_id.unwrap_or(cfg.manager.app_id);
        ensure!(
            app_id != 0,
            "manager app id is not set; use `--app-id` or set `manager.app_id` in {}",
            app_dir.config_file().display()
        );

        let mut client = HttpClient::new(cfg.algod.endpoint.as_str())?;
        if let Some(token) = cfg.algod.token {
            client = client.with_token(token);
        }

        let manager = Manager::new(client, app_id).await?;

        match self.subcmd {
            SubCmd::Manager => print_json_pretty(ManagerSummary {
                app_id: manager.app_id(),
                address: manager.address(),
                state: manager.decoded_state(),
                rewards_asset_ids: manager.rewards_asset_ids(),
            }),
            SubCmd::Field { name } => {
                let value = manager
                    .field(&name)
                    .ok_or_else(|| anyhow!("unknown manager field `{name}`"))?;
                print_json_pretty(value)
            },
            SubCmd::Storage { account } => {
                let storage_address = manager.storage_address(&account).await?;
                print_json_pretty(StorageSummary {
                    account,
                    storage_address,
                })
            },
            SubCmd::User { account } => print_json_pretty(manager.account_fields(&account).await?),
        }
    }
}

fn print_json_pretty<T>(data: T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(&data)?;
    let colored = json.to_colored_json_auto()?;

    println!("{colored}");

    Ok(())
}
